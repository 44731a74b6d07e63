use chrono::{DateTime, Utc};
use lab_engine::ContentRoot;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Health status of the lab server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub overall_status: SystemStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub content_root: ComponentStatus,
    pub ping_program: String,
}

/// Overall system status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SystemStatus {
    Healthy,
    Degraded,
}

/// Status of individual components
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ComponentStatus {
    Up,
    Down,
}

/// Reports uptime and whether disclosed content is still reachable
pub struct HealthChecker {
    start_time: Instant,
    content_root: ContentRoot,
    ping_program: String,
}

impl HealthChecker {
    pub fn new(content_root: ContentRoot, ping_program: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            content_root,
            ping_program: ping_program.into(),
        }
    }

    /// Get current system health status
    pub fn get_health_status(&self) -> HealthStatus {
        let content_root = if self.content_root.is_available() {
            ComponentStatus::Up
        } else {
            tracing::warn!(root = %self.content_root.path().display(), "Content root is not available");
            ComponentStatus::Down
        };

        let overall_status = match content_root {
            ComponentStatus::Up => SystemStatus::Healthy,
            ComponentStatus::Down => SystemStatus::Degraded,
        };

        HealthStatus {
            overall_status,
            timestamp: Utc::now(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            content_root,
            ping_program: self.ping_program.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_reports_content_root() {
        let dir = tempfile::tempdir().unwrap();
        let root_path = dir.path().join("content");
        std::fs::create_dir(&root_path).unwrap();

        let checker = HealthChecker::new(ContentRoot::new(&root_path).unwrap(), "ping");
        let status = checker.get_health_status();
        assert_eq!(status.overall_status, SystemStatus::Healthy);
        assert_eq!(status.content_root, ComponentStatus::Up);
        assert_eq!(status.ping_program, "ping");

        std::fs::remove_dir(&root_path).unwrap();
        let status = checker.get_health_status();
        assert_eq!(status.overall_status, SystemStatus::Degraded);
        assert_eq!(status.content_root, ComponentStatus::Down);
    }
}
