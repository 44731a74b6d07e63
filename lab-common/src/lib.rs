//! Common vocabulary for the vulnlab modules
//!
//! Security levels and the vulnerability module catalog are shared by the
//! engine (policies, disclosure) and the HTTP server (routing, page titles).

pub mod level;
pub mod modules;

pub use level::{SecurityLevel, UnknownSecurityLevel};
pub use modules::{VulnerabilityModule, MODULES, UNKNOWN_VULNERABILITY};

/// Last path component of an untrusted string.
///
/// Both `/` and `\` are treated as separators so that Windows-style
/// traversal attempts are reduced the same way as Unix ones.
pub fn basename(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw)
}
