//! Input sanitization and validation primitives
//!
//! Two families live here:
//! - blacklists, which remove enumerated substrings and are incomplete by
//!   construction (anything not listed survives);
//! - allow-list checks, which accept only inputs matching a permitted shape.

use lazy_static::lazy_static;
use regex::Regex;
use std::net::IpAddr;
use tracing::debug;

/// Longest hostname accepted by the format check
pub const MAX_TARGET_LEN: usize = 255;

/// Characters stripped from both ends of a target: space, tab, newline,
/// carriage return, NUL and vertical tab. Other Unicode whitespace is kept.
pub const TRIMMED_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

lazy_static! {
    static ref HOST_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9.-]+$").unwrap();
    static ref PATH_SEGMENT_PATTERN: Regex = Regex::new(r"(?i)^[a-z0-9_-]+$").unwrap();
}

/// Ordered table of substrings to strip from input
#[derive(Debug, Clone)]
pub struct Blacklist {
    name: &'static str,
    substitutions: &'static [(&'static str, &'static str)],
}

const MEDIUM_SUBSTITUTIONS: &[(&str, &str)] = &[("&&", ""), (";", "")];

const HIGH_SUBSTITUTIONS: &[(&str, &str)] = &[
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

impl Blacklist {
    /// Command separators only
    pub fn medium() -> Self {
        Self {
            name: "medium",
            substitutions: MEDIUM_SUBSTITUTIONS,
        }
    }

    /// Separators, substitution syntax and option dashes
    pub fn high() -> Self {
        Self {
            name: "high",
            substitutions: HIGH_SUBSTITUTIONS,
        }
    }

    /// Apply every substitution in table order.
    ///
    /// Each entry rewrites the output of the previous one, so removing a later
    /// entry can join characters into a form an earlier entry would have
    /// caught (`&;&` becomes `&&` under the medium table).
    pub fn apply(&self, input: &str) -> String {
        let output = self
            .substitutions
            .iter()
            .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to));
        if output != input {
            debug!(blacklist = self.name, before = input, after = %output, "Blacklist rewrote target");
        }
        output
    }
}

/// Strip `TRIMMED_CHARS` from both ends
pub fn trim_target(raw: &str) -> &str {
    raw.trim_matches(TRIMMED_CHARS)
}

/// Hostname/IP character class check plus length limit
pub fn matches_host_pattern(target: &str) -> bool {
    target.len() <= MAX_TARGET_LEN && HOST_PATTERN.is_match(target)
}

/// Strict IPv4/IPv6 literal check
pub fn is_ip_address(target: &str) -> bool {
    target.parse::<IpAddr>().is_ok()
}

/// Identifier safe to use as a single path segment
pub fn is_safe_path_segment(segment: &str) -> bool {
    PATH_SEGMENT_PATTERN.is_match(segment)
}
