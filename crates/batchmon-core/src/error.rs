use thiserror::Error;

use crate::domain::JobStatus;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(
        "invalid job status {value:?}; expected one of: {expected} (see https://docs.aws.amazon.com/batch/latest/userguide/job_states.html)",
        expected = JobStatus::valid_names()
    )]
    InvalidStatus { value: String },

    #[error("batch api error: {0}")]
    Backend(String),

    #[error("pagination did not advance: service returned token {token:?} twice")]
    Pagination { token: String },

    #[error("no queue given and no default_queue configured")]
    MissingQueue,

    #[error("config error: {0}")]
    Config(String),
}
