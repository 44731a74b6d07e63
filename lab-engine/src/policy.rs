//! Target policies for the command injection lab
//!
//! Each security level gets one `TargetPolicy`. The weaker ones are kept as
//! reference variants for learners: `Permissive` and `PartialBlacklist` let
//! hostile input reach the ping utility as its target argument. No policy can
//! change which program runs or how many arguments it gets, because the
//! runner never goes through a shell.

use crate::error::{LabError, LabResult};
use crate::security::{is_ip_address, matches_host_pattern, trim_target, Blacklist};
use crate::traits::TargetPolicy;
use crate::types::ValidatedTarget;
use lab_common::SecurityLevel;
use tracing::debug;

/// Low: input is used exactly as submitted
pub struct PermissivePolicy;

impl TargetPolicy for PermissivePolicy {
    fn level(&self) -> SecurityLevel {
        SecurityLevel::Low
    }

    fn prepare(&self, raw: &str) -> LabResult<ValidatedTarget> {
        Ok(ValidatedTarget::new(raw.to_string()))
    }

    fn description(&self) -> &'static str {
        "No sanitization: the submitted target is passed through unchanged"
    }
}

/// Medium: strips `&&` and `;`, nothing else
pub struct PartialBlacklistPolicy {
    blacklist: Blacklist,
}

impl PartialBlacklistPolicy {
    pub fn new() -> Self {
        Self {
            blacklist: Blacklist::medium(),
        }
    }
}

impl Default for PartialBlacklistPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetPolicy for PartialBlacklistPolicy {
    fn level(&self) -> SecurityLevel {
        SecurityLevel::Medium
    }

    fn prepare(&self, raw: &str) -> LabResult<ValidatedTarget> {
        Ok(ValidatedTarget::new(self.blacklist.apply(raw)))
    }

    fn description(&self) -> &'static str {
        "Blacklist: removes '&&' and ';' before use"
    }
}

/// High: trims, strips a larger blacklist, then checks format and IP syntax
pub struct StrictPolicy {
    blacklist: Blacklist,
}

impl StrictPolicy {
    pub fn new() -> Self {
        Self {
            blacklist: Blacklist::high(),
        }
    }
}

impl Default for StrictPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetPolicy for StrictPolicy {
    fn level(&self) -> SecurityLevel {
        SecurityLevel::High
    }

    fn prepare(&self, raw: &str) -> LabResult<ValidatedTarget> {
        let target = self.blacklist.apply(trim_target(raw));
        if !matches_host_pattern(&target) {
            debug!(target = %target, "Target failed host pattern");
            return Err(LabError::invalid_target(&target, "not a hostname or IP address"));
        }
        if !is_ip_address(&target) {
            return Err(LabError::invalid_ip(&target));
        }
        Ok(ValidatedTarget::new(target))
    }

    fn description(&self) -> &'static str {
        "Blacklist, then hostname pattern and IP address checks"
    }
}

/// Impossible: no rewriting at all, only an allow-list
pub struct AllowListPolicy;

impl TargetPolicy for AllowListPolicy {
    fn level(&self) -> SecurityLevel {
        SecurityLevel::Impossible
    }

    fn prepare(&self, raw: &str) -> LabResult<ValidatedTarget> {
        let target = trim_target(raw);
        if !matches_host_pattern(target) {
            return Err(LabError::invalid_target(target, "not a hostname or IP address"));
        }
        if !is_ip_address(target) {
            return Err(LabError::invalid_ip(target));
        }
        Ok(ValidatedTarget::new(target.to_string()))
    }

    fn description(&self) -> &'static str {
        "Allow-list: only a well-formed IP address is accepted"
    }
}

/// Factory for creating policies
pub struct PolicyFactory;

impl PolicyFactory {
    /// Create the policy for a security level
    pub fn create(level: SecurityLevel) -> Box<dyn TargetPolicy> {
        match level {
            SecurityLevel::Low => Box::new(PermissivePolicy),
            SecurityLevel::Medium => Box::new(PartialBlacklistPolicy::new()),
            SecurityLevel::High => Box::new(StrictPolicy::new()),
            SecurityLevel::Impossible => Box::new(AllowListPolicy),
        }
    }
}
