//! BatchMonitor - queue ごとのジョブ数集計と失敗ジョブの突き合わせ

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::reconcile::failed_not_succeeded;
use crate::domain::{JobId, JobName, JobStatus};
use crate::error::MonitorError;
use crate::observability::{StateCount, StatusSummary};
use crate::ports::{BatchApi, Clock, SystemClock};

const STATE_COUNT_OPERATION: &str = "state_count";

/// Monitor over one batch service connection.
///
/// Design:
/// - The monitor owns pagination; `BatchApi` implementations serve one page.
/// - All calls are sequential, one status at a time.
/// - Status text is validated before any request is made.
pub struct BatchMonitor<A, C = SystemClock> {
    api: A,
    clock: C,
}

impl<A: BatchApi> BatchMonitor<A> {
    pub fn new(api: A) -> Self {
        Self::with_clock(api, SystemClock)
    }
}

impl<A: BatchApi, C: Clock> BatchMonitor<A, C> {
    pub fn with_clock(api: A, clock: C) -> Self {
        Self { api, clock }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Count jobs on `queue` whose status is `state`.
    ///
    /// `state` must be one of the service's status names; anything else is
    /// rejected with [`MonitorError::InvalidStatus`] without calling the
    /// service.
    pub async fn state_count(
        &self,
        queue: &str,
        state: &str,
        include_ids: bool,
    ) -> Result<StateCount, MonitorError> {
        let status: JobStatus = state.parse()?;
        self.count_jobs(queue, status, include_ids).await
    }

    /// Typed variant of [`state_count`](Self::state_count).
    pub async fn count_jobs(
        &self,
        queue: &str,
        status: JobStatus,
        include_ids: bool,
    ) -> Result<StateCount, MonitorError> {
        let logged_time = self.clock.now();
        let jobs = self.collect_jobs(queue, status).await?;
        let count = jobs.len();
        info!(queue, %status, count, "counted jobs");

        Ok(StateCount {
            logged_time,
            operation: STATE_COUNT_OPERATION.to_string(),
            queue: queue.to_string(),
            state: status,
            count,
            job_ids: include_ids.then_some(jobs),
        })
    }

    /// Walk every page for (`queue`, `status`) and merge the id -> name pairs.
    ///
    /// Stops when the service returns no token or an empty one. An id seen
    /// on several pages is kept once. A token that was already sent is a
    /// [`MonitorError::Pagination`] error.
    pub async fn collect_jobs(
        &self,
        queue: &str,
        status: JobStatus,
    ) -> Result<BTreeMap<JobId, JobName>, MonitorError> {
        let mut jobs = BTreeMap::new();
        let mut token: Option<String> = None;
        // every token already sent; a revisit means the listing cycles
        let mut seen = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self.api.list_jobs(queue, status, token.as_deref()).await?;
            pages += 1;
            debug!(
                queue,
                %status,
                page = pages,
                rows = page.jobs.len(),
                "listed jobs page"
            );

            for job in page.jobs.iter() {
                jobs.insert(job.job_id.clone(), job.job_name.clone());
            }

            let Some(next) = page.continuation() else {
                break;
            };
            if !seen.insert(next.to_string()) {
                warn!(queue, %status, token = next, "service repeated pagination token");
                return Err(MonitorError::Pagination {
                    token: next.to_string(),
                });
            }
            token = Some(next.to_string());
        }

        Ok(jobs)
    }

    /// Names of failed jobs that have no succeeded job with the same name.
    ///
    /// `external_succeeded` / `external_failed` are merged into the
    /// service's own lists, so history the service has already dropped can
    /// still take part. The result is deduplicated and sorted.
    pub async fn failed_jobs_by_name<S, F>(
        &self,
        queue: &str,
        external_succeeded: S,
        external_failed: F,
    ) -> Result<Vec<JobName>, MonitorError>
    where
        S: IntoIterator<Item = JobName>,
        F: IntoIterator<Item = JobName>,
    {
        let failed = self.collect_jobs(queue, JobStatus::Failed).await?;
        let succeeded = self.collect_jobs(queue, JobStatus::Succeeded).await?;

        let unresolved = failed_not_succeeded(
            failed.into_values().chain(external_failed),
            succeeded.into_values().chain(external_succeeded),
        );
        info!(queue, unresolved = unresolved.len(), "reconciled failed jobs");
        Ok(unresolved)
    }

    /// Count every status on `queue`, in lifecycle order.
    pub async fn status_summary(&self, queue: &str) -> Result<StatusSummary, MonitorError> {
        let mut states = BTreeMap::new();
        let mut range: Option<(DateTime<Utc>, DateTime<Utc>)> = None;

        for status in JobStatus::ALL {
            let count = self.count_jobs(queue, status, false).await?;
            let at = count.logged_time;
            range = Some(match range {
                None => (at, at),
                Some((from, to)) => (from.min(at), to.max(at)),
            });
            states.insert(status, count.count);
        }

        let time_range = range.unwrap_or_else(|| {
            let now = self.clock.now();
            (now, now)
        });

        Ok(StatusSummary {
            queue: queue.to_string(),
            time_range,
            states,
        })
    }
}
