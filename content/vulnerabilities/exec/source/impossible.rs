if let Some(_) = form.submit {
    // Get input
    let target = form.ip.unwrap_or_default();
    let target = target.trim();

    // Allow-list only: nothing is rewritten
    let pattern = Regex::new(r"^[a-zA-Z0-9.-]+$")?;
    if target.len() > 255 || !pattern.is_match(target) {
        html += &format!("<pre>Invalid target</pre>");
        return Ok(Html(html));
    }

    // Parse as an IPv4 or IPv6 literal
    let target: IpAddr = match target.parse() {
        Ok(ip) => ip,
        Err(_) => {
            html += &format!("<pre>Error: Invalid IP address</pre>");
            return Ok(Html(html));
        }
    };

    // The target is one argument; no shell is involved
    let output = tokio::time::timeout(
        Duration::from_secs(30),
        Command::new("ping")
            .args(["-c", "4", &target.to_string()])
            .kill_on_drop(true)
            .output(),
    )
    .await??;

    // Feedback for the end user
    html += &format!("<pre>{}</pre>", escape_html(&String::from_utf8_lossy(&output.stdout)));
}
