if let Some(_) = form.submit {
    // Get input
    let target = form.ip.unwrap_or_default();

    // Set blacklist
    let substitutions = [("&&", ""), (";", "")];

    // Remove any of the characters in the array (blacklist)
    let target = substitutions
        .iter()
        .fold(target, |acc, (from, to)| acc.replace(from, to));

    // Ping the target, four echo requests
    let output = Command::new("ping")
        .args(["-c", "4", &target])
        .output()
        .await?;

    // Feedback for the end user
    html += &format!("<pre>{}</pre>", String::from_utf8_lossy(&output.stdout));
}
