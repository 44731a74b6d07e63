//! Security levels selecting how strictly a module treats its input

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Per-request selector for the validation strength a module applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// No protection at all
    #[default]
    Low,
    /// Incomplete blacklist
    Medium,
    /// Larger blacklist plus format checks
    High,
    /// Allow-list only
    Impossible,
}

/// Returned by `SecurityLevel::from_str` for names outside the four levels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown security level: {0}")]
pub struct UnknownSecurityLevel(pub String);

impl SecurityLevel {
    /// Every level, weakest first
    pub const ALL: [SecurityLevel; 4] = [
        SecurityLevel::Low,
        SecurityLevel::Medium,
        SecurityLevel::High,
        SecurityLevel::Impossible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Low => "low",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
            SecurityLevel::Impossible => "impossible",
        }
    }

    /// Interpret an untrusted level string.
    ///
    /// Directory components are stripped first, then the name must match one
    /// of the four levels exactly. Anything else falls back to `Low`.
    pub fn normalize(raw: &str) -> Self {
        crate::basename(raw).parse().unwrap_or_default()
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = UnknownSecurityLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(SecurityLevel::Low),
            "medium" => Ok(SecurityLevel::Medium),
            "high" => Ok(SecurityLevel::High),
            "impossible" => Ok(SecurityLevel::Impossible),
            other => Err(UnknownSecurityLevel(other.to_string())),
        }
    }
}
