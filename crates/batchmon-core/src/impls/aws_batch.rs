//! AwsBatchApi - AWS Batch `ListJobs` を叩く本番用実装

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_batch::Client;
use aws_sdk_batch::config::Credentials;
use aws_sdk_batch::error::DisplayErrorContext;
use tracing::{debug, warn};

use crate::config::MonitorConfig;
use crate::domain::{JobPage, JobStatus, JobSummary};
use crate::error::MonitorError;
use crate::ports::BatchApi;

/// Provider name attached to credentials that come from the config file.
const CONFIG_CREDENTIALS_PROVIDER: &str = "batchmon-config";

/// AwsBatchApi は SDK クライアントのラッパー
///
/// # 使用例
/// ```ignore
/// let api = AwsBatchApi::from_config(&MonitorConfig::default()).await?;
/// let page = api.list_jobs("my-queue", JobStatus::Failed, None).await?;
/// ```
#[derive(Clone)]
pub struct AwsBatchApi {
    client: Client,
}

impl AwsBatchApi {
    /// Build a client from monitor settings.
    ///
    /// Static credentials win over the default chain (env, profile, IMDS).
    pub async fn from_config(config: &MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        if let Some(creds) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                creds.session_token.clone(),
                None,
                CONFIG_CREDENTIALS_PROVIDER,
            ));
        }
        let shared_config = loader.load().await;
        debug!(region = %config.region, endpoint = ?config.endpoint_url, "batch client configured");

        Ok(Self::from_client(Client::new(&shared_config)))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Convert one SDK row. A row without `jobId` cannot be counted, so it is an
/// error; a missing `jobName` becomes the empty name.
fn summary_from_sdk(job: &aws_sdk_batch::types::JobSummary) -> Result<JobSummary, MonitorError> {
    let job_id = job
        .job_id()
        .ok_or_else(|| MonitorError::Backend("job summary without jobId".to_string()))?;
    let job_name = job.job_name().unwrap_or_else(|| {
        warn!(job_id, "job summary without jobName");
        ""
    });
    Ok(JobSummary::new(job_id, job_name))
}

#[async_trait]
impl BatchApi for AwsBatchApi {
    async fn list_jobs(
        &self,
        queue: &str,
        status: JobStatus,
        next_token: Option<&str>,
    ) -> Result<JobPage, MonitorError> {
        let output = self
            .client
            .list_jobs()
            .job_queue(queue)
            .job_status(aws_sdk_batch::types::JobStatus::from(status.as_str()))
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|err| MonitorError::Backend(DisplayErrorContext(&err).to_string()))?;

        let jobs = output
            .job_summary_list()
            .iter()
            .map(summary_from_sdk)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobPage {
            jobs,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
