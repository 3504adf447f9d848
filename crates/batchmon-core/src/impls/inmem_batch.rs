//! InMemoryBatchApi - 開発・テスト用のジョブ一覧 API
//!
//! # 学習ポイント
//! - (queue, status) ごとに Vec<JobSummary> を保持
//! - next_token は「次の offset」を文字列化したもの（中身は不透明として扱う）
//! - 呼び出し履歴を記録して、テストでリクエスト回数を検証できる

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{JobPage, JobStatus, JobSummary};
use crate::error::MonitorError;
use crate::ports::BatchApi;

/// A recorded `list_jobs` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCall {
    pub queue: String,
    pub status: JobStatus,
    pub next_token: Option<String>,
}

#[derive(Default)]
struct InMemoryBatchState {
    jobs: HashMap<(String, JobStatus), Vec<JobSummary>>,
    calls: Vec<ListCall>,
}

/// InMemoryBatchApi は開発用のバックエンド
///
/// # 使用例
/// ```ignore
/// let api = InMemoryBatchApi::new(2);
/// api.insert("etl", JobStatus::Failed, JobSummary::new("id-1", "daily")).await;
/// let page = api.list_jobs("etl", JobStatus::Failed, None).await?;
/// ```
#[derive(Clone)]
pub struct InMemoryBatchApi {
    page_size: usize,
    state: Arc<Mutex<InMemoryBatchState>>,
}

impl InMemoryBatchApi {
    /// `page_size` is clamped to at least 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            state: Arc::new(Mutex::new(InMemoryBatchState::default())),
        }
    }

    pub async fn insert(&self, queue: &str, status: JobStatus, job: JobSummary) {
        let mut state = self.state.lock().await;
        state
            .jobs
            .entry((queue.to_string(), status))
            .or_default()
            .push(job);
    }

    pub async fn insert_many<I>(&self, queue: &str, status: JobStatus, jobs: I)
    where
        I: IntoIterator<Item = JobSummary>,
    {
        let mut state = self.state.lock().await;
        state
            .jobs
            .entry((queue.to_string(), status))
            .or_default()
            .extend(jobs);
    }

    /// Every call made so far, oldest first.
    pub async fn calls(&self) -> Vec<ListCall> {
        self.state.lock().await.calls.clone()
    }
}

#[async_trait]
impl BatchApi for InMemoryBatchApi {
    async fn list_jobs(
        &self,
        queue: &str,
        status: JobStatus,
        next_token: Option<&str>,
    ) -> Result<JobPage, MonitorError> {
        let mut state = self.state.lock().await;
        state.calls.push(ListCall {
            queue: queue.to_string(),
            status,
            next_token: next_token.map(str::to_string),
        });

        let offset = match next_token {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| MonitorError::Backend(format!("invalid next token: {token}")))?,
        };

        let all = state
            .jobs
            .get(&(queue.to_string(), status))
            .map(Vec::as_slice)
            .unwrap_or_default();
        if offset > all.len() {
            return Err(MonitorError::Backend(format!(
                "next token out of range: {offset}"
            )));
        }

        let end = (offset + self.page_size).min(all.len());
        let jobs = all[offset..end].to_vec();
        if end < all.len() {
            Ok(JobPage::with_next(jobs, end.to_string()))
        } else {
            Ok(JobPage::last(jobs))
        }
    }
}
