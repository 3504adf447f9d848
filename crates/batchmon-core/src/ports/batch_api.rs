//! BatchApi port - ジョブ一覧 API（1 ページ単位）
//!
//! # 実装
//! - **AwsBatchApi**: AWS Batch `ListJobs`（本番用）
//! - **InMemoryBatchApi**: 開発・テスト用

use async_trait::async_trait;

use crate::domain::{JobPage, JobStatus};
use crate::error::MonitorError;

/// BatchApi は queue + status でジョブを 1 ページ分取得する
///
/// # 設計原則
/// - ページ送り（next_token のループ）は呼び出し側 `BatchMonitor` の責務
/// - 実装は 1 リクエスト = 1 呼び出しに保つ（テストで呼び出し回数を数えられる）
/// - status は検証済みの `JobStatus` しか受け取らない
#[async_trait]
pub trait BatchApi: Send + Sync {
    async fn list_jobs(
        &self,
        queue: &str,
        status: JobStatus,
        next_token: Option<&str>,
    ) -> Result<JobPage, MonitorError>;
}
