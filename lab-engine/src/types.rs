//! Core data types for the lab engine

use lab_common::SecurityLevel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A target that passed its level's policy.
///
/// The wrapped string is handed to the external process as exactly one
/// argument, whatever it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedTarget(String);

impl ValidatedTarget {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Settings for the external ping utility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    /// Executable name or path
    pub program: String,
    /// Number of echo requests
    pub count: u32,
    /// Upper bound for a whole run in seconds
    pub timeout_secs: u64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            program: "ping".to_string(),
            count: 4,
            timeout_secs: 30,
        }
    }
}

/// How a diagnostic request ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiagnosticOutcome {
    /// The process ran; stdout is shown verbatim
    Completed { output: ProcessOutput },
    /// Input was refused before anything was spawned
    Rejected { message: String },
    /// Spawning failed or the run timed out
    Failed { message: String },
}

/// Everything known about one diagnostic request
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub run_id: Uuid,
    pub level: SecurityLevel,
    pub submitted: String,
    /// Argument passed to the process, when the policy accepted the input
    pub argument: Option<String>,
    pub outcome: DiagnosticOutcome,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

impl DiagnosticReport {
    /// Text shown inside the result `<pre>` block
    pub fn display_text(&self) -> &str {
        match &self.outcome {
            DiagnosticOutcome::Completed { output } => &output.stdout,
            DiagnosticOutcome::Rejected { message } => message,
            DiagnosticOutcome::Failed { message } => message,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, DiagnosticOutcome::Completed { .. })
    }
}
