//! Job status as reported by the batch service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Lifecycle stage of a submitted job.
///
/// Lifecycle:
/// - SUBMITTED -> PENDING -> RUNNABLE -> STARTING -> RUNNING -> SUCCEEDED
/// - any stage may end in FAILED
///
/// Variant order follows the lifecycle, so `Ord` sorts reports the same way.
/// Serialized as the service's own names (SUBMITTED, PENDING, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [JobStatus; 7] = [
        JobStatus::Submitted,
        JobStatus::Pending,
        JobStatus::Runnable,
        JobStatus::Starting,
        JobStatus::Running,
        JobStatus::Succeeded,
        JobStatus::Failed,
    ];

    /// Name used on the wire (`jobStatus` request parameter).
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::Runnable => "RUNNABLE",
            JobStatus::Starting => "STARTING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
        }
    }

    /// Is this a terminal status (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Comma separated list of valid names, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is exact: the service rejects `failed` or ` FAILED`, so do we.
impl FromStr for JobStatus {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| MonitorError::InvalidStatus {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::submitted("SUBMITTED", JobStatus::Submitted)]
    #[case::pending("PENDING", JobStatus::Pending)]
    #[case::runnable("RUNNABLE", JobStatus::Runnable)]
    #[case::starting("STARTING", JobStatus::Starting)]
    #[case::running("RUNNING", JobStatus::Running)]
    #[case::succeeded("SUCCEEDED", JobStatus::Succeeded)]
    #[case::failed("FAILED", JobStatus::Failed)]
    fn parses_every_service_name(#[case] text: &str, #[case] expected: JobStatus) {
        let parsed: JobStatus = text.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), text);
    }

    #[rstest]
    #[case::lowercase("failed")]
    #[case::padded(" FAILED")]
    #[case::empty("")]
    #[case::unknown("CANCELLED")]
    fn rejects_anything_else(#[case] text: &str) {
        let err = text.parse::<JobStatus>().unwrap_err();
        match &err {
            MonitorError::InvalidStatus { value } => assert_eq!(value, text),
            other => panic!("unexpected error: {other}"),
        }
        // The message lists what would have been accepted.
        assert!(err.to_string().contains("SUBMITTED, PENDING"));
    }

    #[test]
    fn all_is_in_lifecycle_order() {
        let mut sorted = JobStatus::ALL;
        sorted.sort();
        assert_eq!(sorted, JobStatus::ALL);
        assert_eq!(JobStatus::ALL.first(), Some(&JobStatus::Submitted));
        assert_eq!(JobStatus::ALL.last(), Some(&JobStatus::Failed));
    }

    #[test]
    fn serializes_as_service_names() {
        let s = serde_json::to_string(&JobStatus::Runnable).unwrap();
        assert_eq!(s, "\"RUNNABLE\"");
    }

    #[test]
    fn only_succeeded_and_failed_are_terminal() {
        let terminal: Vec<_> = JobStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![JobStatus::Succeeded, JobStatus::Failed]);
    }
}
