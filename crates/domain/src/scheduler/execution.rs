//! Execution records — one row per scheduled run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ExecutionId, ScheduledTaskId};
use crate::time::{Timestamp, iso8601};

/// Outcome of a run; only [`Running`](Self::Running) is non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Running,
    Success,
    Failed,
    Stopped,
}

impl ExecutionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Stopped => "stopped",
        })
    }
}

/// Immutable log entry of one run of a scheduled task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExecution {
    pub id: ExecutionId,
    pub task_id: ScheduledTaskId,
    pub task_name: String,
    #[serde(with = "iso8601")]
    pub started_at: Timestamp,
    #[serde(
        default,
        with = "iso8601::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub finished_at: Option<Timestamp>,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TaskExecution {
    /// Wall time of a finished run.
    #[must_use]
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_only_running_as_non_terminal() {
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(ExecutionStatus::Success.is_terminal());
        assert!(ExecutionStatus::Failed.is_terminal());
        assert!(ExecutionStatus::Stopped.is_terminal());
    }

    #[test]
    fn should_parse_execution_record() {
        let json = serde_json::json!({
            "id": "exec-1",
            "task_id": "job-1",
            "task_name": "Morning run",
            "started_at": "2025-05-01T08:00:00",
            "finished_at": "2025-05-01T08:05:00",
            "status": "failed",
            "error_message": "device offline"
        });
        let execution: TaskExecution = serde_json::from_value(json).unwrap();
        assert_eq!(execution.status, ExecutionStatus::Failed);
        assert_eq!(execution.duration(), Some(chrono::Duration::minutes(5)));
        assert_eq!(execution.error_message.as_deref(), Some("device offline"));
    }

    #[test]
    fn should_leave_duration_empty_while_running() {
        let json = serde_json::json!({
            "id": "exec-2",
            "task_id": "job-1",
            "task_name": "Morning run",
            "started_at": "2025-05-01T08:00:00Z",
            "status": "running"
        });
        let execution: TaskExecution = serde_json::from_value(json).unwrap();
        assert!(execution.duration().is_none());
    }
}
