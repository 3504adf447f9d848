//! Domain model (statuses, job ids/names, listing pages).

pub mod job;
pub mod status;

pub use job::{JobId, JobName, JobPage, JobSummary};
pub use status::JobStatus;
