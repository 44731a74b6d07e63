//! HTML rendering for the lab pages
//!
//! Anything derived from request input goes through `escape_html`. Help
//! bodies and highlighted listings come from the content root and are
//! embedded as-is.

use lab_common::{SecurityLevel, MODULES};
use lab_engine::disclosure::SourceListing;
use lab_engine::{escape_html, DiagnosticReport};
use url::form_urlencoded;

const STYLE: &str = "body{font-family:sans-serif;margin:2em;max-width:70em}\
pre{background:#f4f4f4;padding:1em;overflow:auto}\
.levels span{margin-right:1em}.vulnerable_code_area{border:1px solid #ccc;padding:1em}";

/// Wrap a body in the shared page chrome
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} :: vulnlab</title>\n<style>{style}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

pub fn index_page(default_security: SecurityLevel) -> String {
    let mut html = String::from("<h1>vulnlab</h1>\n");
    html += &format!(
        "<p>Default security level: <b>{}</b></p>\n",
        default_security
    );

    html += "<h2>Labs</h2>\n<ul>\n";
    for level in SecurityLevel::ALL {
        html += &format!(
            "<li><a href=\"/vulnerabilities/exec/?security={0}\">Command Injection ({0})</a></li>\n",
            level
        );
    }
    html += "</ul>\n";

    html += "<h2>Help and source</h2>\n<ul>\n";
    for module in MODULES {
        html += &format!(
            "<li>{name}: \
             <a href=\"/vulnerabilities/view_help?id={id}&amp;security={level}&amp;locale=en\">help</a> \
             <a href=\"/vulnerabilities/view_source?id={id}&amp;security={level}\">source</a> \
             <a href=\"/vulnerabilities/view_source_all?id={id}\">all levels</a></li>\n",
            name = module.name,
            id = module.id,
            level = default_security,
        );
    }
    html += "</ul>\n";

    layout("Welcome", &html)
}

/// Ping form, with the result block when a diagnostic ran
pub fn exec_page(level: SecurityLevel, policy: &str, report: Option<&DiagnosticReport>) -> String {
    let mut html = String::from("<h1>Vulnerability: Command Injection</h1>\n");
    html += &format!(
        "<p class=\"levels\"><span>Security level: <b>{}</b></span><span>{}</span></p>\n",
        level,
        escape_html(policy)
    );

    html += "<div class=\"vulnerable_code_area\">\n<h2>Ping a device</h2>\n";
    html += &format!(
        "<form name=\"ping\" action=\"/vulnerabilities/exec/?security={}\" method=\"post\">\n\
         <p>Enter an IP address:\n\
         <input type=\"text\" name=\"ip\" size=\"30\">\n\
         <input type=\"submit\" name=\"Submit\" value=\"Submit\">\n\
         </p>\n</form>\n",
        level
    );

    if let Some(report) = report {
        html += &format!("<pre>{}</pre>\n", escape_html(report.display_text()));
    }
    html += "</div>\n";

    html += &format!(
        "<p><a href=\"/vulnerabilities/view_help?id=exec&amp;security={0}&amp;locale=en\">View Help</a> \
         <a href=\"/vulnerabilities/view_source?id=exec&amp;security={0}\">View Source</a></p>\n",
        level
    );

    layout("Vulnerability: Command Injection", &html)
}

/// Help page; the body is a trusted fragment from the content root
pub fn help_page(body: &str) -> String {
    let html = format!("<div id=\"container\">\n{}\n</div>\n", body);
    layout("Help", &html)
}

pub fn source_page(listing: &SourceListing) -> String {
    let mut html = String::from("<div id=\"container\">\n");
    html += &format!("<h1>{} Source</h1>\n", escape_html(listing.vulnerability));
    html += &source_section(listing);
    html += &format!(
        "<p><a href=\"/vulnerabilities/view_source_all?id={}\">Compare All Levels</a></p>\n",
        query_value(&listing.id)
    );
    html += "</div>\n";

    layout(&format!("{} Source", listing.vulnerability), &html)
}

/// All levels, weakest first
pub fn source_all_page(listings: &[SourceListing]) -> String {
    let vulnerability = listings
        .first()
        .map(|l| l.vulnerability)
        .unwrap_or(lab_common::UNKNOWN_VULNERABILITY);

    let mut html = String::from("<div id=\"container\">\n");
    html += &format!("<h1>{} Source</h1>\n", escape_html(vulnerability));
    for listing in listings {
        html += &format!("<h2>{} {} Source</h2>\n", capitalize(listing.security.as_str()), escape_html(vulnerability));
        html += &source_section(listing);
    }
    html += "</div>\n";

    layout(&format!("{} Source", vulnerability), &html)
}

/// Body for requests missing a required parameter
pub fn not_found_page(placeholder: &str) -> String {
    layout("Not Found", placeholder)
}

fn source_section(listing: &SourceListing) -> String {
    let mut html = format!(
        "<h3>{}</h3>\n<div class=\"code\">\n{}</div>\n",
        escape_html(&listing.source.path),
        listing.source.html
    );
    if let Some(script) = &listing.script {
        html += &format!(
            "<h3>{}</h3>\n<div class=\"code\">\n{}</div>\n",
            escape_html(&script.path),
            script.html
        );
    }
    html
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Percent-encode a query parameter value
fn query_value(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
