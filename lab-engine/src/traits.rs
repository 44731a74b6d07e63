//! Core traits for the lab engine

use crate::{LabResult, ProcessOutput, ValidatedTarget};
use async_trait::async_trait;
use lab_common::SecurityLevel;

/// Input policy applied to a diagnostic target before anything is spawned
pub trait TargetPolicy: Send + Sync {
    /// Level this policy implements
    fn level(&self) -> SecurityLevel;

    /// Sanitize and/or validate a raw target
    fn prepare(&self, raw: &str) -> LabResult<ValidatedTarget>;

    /// Short human-readable summary shown on the lab page
    fn description(&self) -> &'static str;
}

/// Spawns external programs with an explicit argument vector.
///
/// Implementations must never route arguments through a shell.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> LabResult<ProcessOutput>;
}
