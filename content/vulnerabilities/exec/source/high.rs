if let Some(_) = form.submit {
    // Get input
    let target = form.ip.unwrap_or_default();
    let target = target.trim();

    // Set blacklist
    let substitutions = [
        ("||", ""),
        ("&", ""),
        (";", ""),
        ("| ", ""),
        ("-", ""),
        ("$", ""),
        ("(", ""),
        (")", ""),
        ("`", ""),
    ];

    // Remove any of the characters in the array (blacklist)
    let target = substitutions
        .iter()
        .fold(target.to_string(), |acc, (from, to)| acc.replace(from, to));

    // Hostname characters only, at most 255 of them
    let pattern = Regex::new(r"^[a-zA-Z0-9.-]+$")?;
    if target.len() > 255 || !pattern.is_match(&target) {
        html += &format!("<pre>Invalid target</pre>");
        return Ok(Html(html));
    }

    // Must be an IP address
    if target.parse::<IpAddr>().is_err() {
        html += &format!("<pre>Error: Invalid IP address</pre>");
        return Ok(Html(html));
    }

    // Ping the target, four echo requests
    let output = Command::new("ping")
        .args(["-c", "4", &target])
        .output()
        .await?;

    // Feedback for the end user
    html += &format!("<pre>{}</pre>", String::from_utf8_lossy(&output.stdout));
}
