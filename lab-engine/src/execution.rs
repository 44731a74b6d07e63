//! Process execution for the command injection lab

use crate::error::{LabError, LabResult};
use crate::policy::PolicyFactory;
use crate::traits::ProcessRunner;
use crate::types::{DiagnosticOutcome, DiagnosticReport, PingConfig, ProcessOutput};
use async_trait::async_trait;
use lab_common::SecurityLevel;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs programs with tokio, argument vector only
pub struct TokioProcessRunner {
    timeout: Duration,
}

impl TokioProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> LabResult<ProcessOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // dropping the future on timeout must not leave the child behind
            .kill_on_drop(true);

        let started = Instant::now();
        let child = cmd.spawn().map_err(|source| LabError::Spawn {
            program: program.to_string(),
            source,
        })?;

        // wait_with_output drains and closes both pipes before returning
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(program, timeout_ms = self.timeout.as_millis() as u64, "Process timed out and was killed");
                return Err(LabError::Timeout {
                    program: program.to_string(),
                    duration_ms: self.timeout.as_millis() as u64,
                });
            }
        };

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Builds the ping argument vector for the host platform
#[derive(Debug, Clone)]
pub struct PingCommand {
    program: String,
    count: u32,
}

impl PingCommand {
    pub fn new(program: impl Into<String>, count: u32) -> Self {
        Self {
            program: program.into(),
            count,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Echo count flag: `-n` on Windows, `-c` everywhere else
    pub fn count_flag() -> &'static str {
        if cfg!(windows) {
            "-n"
        } else {
            "-c"
        }
    }

    /// Full argument list; the target is always the last, single element
    pub fn args(&self, target: &str) -> Vec<String> {
        vec![
            Self::count_flag().to_string(),
            self.count.to_string(),
            target.to_string(),
        ]
    }
}

impl From<&PingConfig> for PingCommand {
    fn from(config: &PingConfig) -> Self {
        Self::new(config.program.clone(), config.count)
    }
}

/// Policy + ping command + runner.
///
/// Every request ends in a `DiagnosticReport`; no input makes `diagnose`
/// fail.
pub struct DiagnosticService {
    runner: Arc<dyn ProcessRunner>,
    ping: PingCommand,
}

impl DiagnosticService {
    pub fn new(runner: Arc<dyn ProcessRunner>, ping: PingCommand) -> Self {
        Self { runner, ping }
    }

    /// Apply the level's policy, then ping the target
    pub async fn diagnose(&self, level: SecurityLevel, raw: &str) -> DiagnosticReport {
        let run_id = Uuid::new_v4();
        let policy = PolicyFactory::create(level);

        let target = match policy.prepare(raw) {
            Ok(target) => target,
            Err(e) => {
                info!(%run_id, %level, error = %e, "Diagnostic target rejected");
                return self.report(run_id, level, raw, None, DiagnosticOutcome::Rejected {
                    message: e.user_message().to_string(),
                });
            }
        };

        let args = self.ping.args(target.as_str());
        debug!(%run_id, program = self.ping.program(), ?args, "Running diagnostic");

        let outcome = match self.runner.run(self.ping.program(), &args).await {
            Ok(output) => {
                info!(
                    %run_id,
                    %level,
                    exit_code = ?output.exit_code,
                    duration_ms = output.duration_ms,
                    "Diagnostic completed"
                );
                DiagnosticOutcome::Completed { output }
            }
            Err(e) => {
                warn!(%run_id, %level, error = %e, "Diagnostic failed");
                DiagnosticOutcome::Failed {
                    message: e.user_message().to_string(),
                }
            }
        };

        self.report(run_id, level, raw, Some(target.into_inner()), outcome)
    }

    fn report(
        &self,
        run_id: Uuid,
        level: SecurityLevel,
        raw: &str,
        argument: Option<String>,
        outcome: DiagnosticOutcome,
    ) -> DiagnosticReport {
        DiagnosticReport {
            run_id,
            level,
            submitted: raw.to_string(),
            argument,
            outcome,
            finished_at: chrono::Utc::now(),
        }
    }
}
