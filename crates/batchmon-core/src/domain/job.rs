//! Job identifiers and listing pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the batch service (`jobId`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Name given at submission (`jobName`). Not unique: resubmitting a failed
/// job under the same name is how callers retry, which is what
/// reconciliation relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for JobName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One row of a job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_id: JobId,
    pub job_name: JobName,
}

impl JobSummary {
    pub fn new(job_id: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            job_id: JobId::new(job_id),
            job_name: JobName::new(job_name),
        }
    }
}

/// One page of a job listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPage {
    pub jobs: Vec<JobSummary>,

    /// Continuation token for the next page, as returned by the service.
    pub next_token: Option<String>,
}

impl JobPage {
    pub fn last(jobs: Vec<JobSummary>) -> Self {
        Self {
            jobs,
            next_token: None,
        }
    }

    pub fn with_next(jobs: Vec<JobSummary>, token: impl Into<String>) -> Self {
        Self {
            jobs,
            next_token: Some(token.into()),
        }
    }

    /// Token to send for the next request, if there is a next page.
    ///
    /// An empty token ends the listing the same way a missing one does.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::missing(None, None)]
    #[case::empty(Some(""), None)]
    #[case::present(Some("abc"), Some("abc"))]
    fn continuation_treats_empty_as_last(
        #[case] token: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let page = JobPage {
            jobs: vec![],
            next_token: token.map(str::to_string),
        };
        assert_eq!(page.continuation(), expected);
    }

    #[test]
    fn ids_and_names_serialize_as_plain_strings() {
        let summary = JobSummary::new("8f0c", "nightly-etl");
        let v = serde_json::to_value(&summary).unwrap();
        assert_eq!(v["job_id"], "8f0c");
        assert_eq!(v["job_name"], "nightly-etl");
    }
}
