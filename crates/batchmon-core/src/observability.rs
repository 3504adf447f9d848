//! Report views returned by the monitor.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{JobId, JobName, JobStatus};

/// Count of jobs in one status on one queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCount {
    /// Taken before the first list call.
    pub logged_time: DateTime<Utc>,
    pub operation: String,
    pub queue: String,
    pub state: JobStatus,
    pub count: usize,

    /// Present only when ids were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_ids: Option<BTreeMap<JobId, JobName>>,
}

/// Counts for every status on one queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub queue: String,

    /// Earliest and latest `logged_time` of the per-status counts.
    pub time_range: (DateTime<Utc>, DateTime<Utc>),
    pub states: BTreeMap<JobStatus, usize>,
}

impl StatusSummary {
    pub fn total(&self) -> usize {
        self.states.values().sum()
    }

    /// Jobs that have not reached SUCCEEDED or FAILED yet.
    pub fn in_flight(&self) -> usize {
        self.states
            .iter()
            .filter(|(status, _)| !status.is_terminal())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Human readable rendering for the CLI.
pub trait RenderText {
    fn render_text(&self) -> String;
}

impl RenderText for StateCount {
    fn render_text(&self) -> String {
        let mut out = format!(
            "{} {} on {}: {} (at {})\n",
            self.operation,
            self.state,
            self.queue,
            self.count,
            self.logged_time.to_rfc3339()
        );
        if let Some(ids) = &self.job_ids {
            for (id, name) in ids {
                let _ = writeln!(out, "  {id}\t{name}");
            }
        }
        out
    }
}

impl RenderText for StatusSummary {
    fn render_text(&self) -> String {
        let (from, to) = self.time_range;
        let mut out = format!(
            "queue {} ({} .. {})\n",
            self.queue,
            from.to_rfc3339(),
            to.to_rfc3339()
        );
        for (status, count) in &self.states {
            let _ = writeln!(out, "  {:<10} {count}", status.as_str());
        }
        let _ = writeln!(out, "  {:<10} {}", "IN_FLIGHT", self.in_flight());
        let _ = writeln!(out, "  {:<10} {}", "TOTAL", self.total());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary() -> StatusSummary {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        StatusSummary {
            queue: "etl".to_string(),
            time_range: (at, at),
            states: JobStatus::ALL
                .into_iter()
                .enumerate()
                .map(|(i, s)| (s, i))
                .collect(),
        }
    }

    #[test]
    fn totals_and_in_flight() {
        let s = summary();
        // 0+1+2+3+4+5+6
        assert_eq!(s.total(), 21);
        // everything but SUCCEEDED (5) and FAILED (6)
        assert_eq!(s.in_flight(), 10);
    }

    #[test]
    fn summary_json_uses_service_names_as_keys() {
        let v = serde_json::to_value(summary()).unwrap();
        assert_eq!(v["states"]["RUNNABLE"], 2);
        assert_eq!(v["states"]["FAILED"], 6);
    }

    #[test]
    fn state_count_omits_ids_unless_requested() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let count = StateCount {
            logged_time: at,
            operation: "state_count".to_string(),
            queue: "etl".to_string(),
            state: JobStatus::Failed,
            count: 0,
            job_ids: None,
        };
        let v = serde_json::to_value(&count).unwrap();
        assert!(v.get("job_ids").is_none());
        assert_eq!(v["state"], "FAILED");
    }

    #[test]
    fn text_lists_statuses_in_lifecycle_order() {
        let text = summary().render_text();
        let submitted = text.find("SUBMITTED").unwrap();
        let failed = text.find("FAILED").unwrap();
        assert!(submitted < failed);
        assert!(text.contains("TOTAL"));
    }

    #[test]
    fn text_reports_in_flight_jobs() {
        let text = summary().render_text();
        let line = text
            .lines()
            .find(|l| l.trim_start().starts_with("IN_FLIGHT"))
            .unwrap();
        assert!(line.trim_end().ends_with(" 10"));
        assert!(text.contains("TOTAL      21"));
    }
}
