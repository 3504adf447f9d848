//! batchmon-core
//!
//! AWS Batch のジョブキューを監視するための building blocks。
//!
//! # モジュール構成
//! - **domain**: JobStatus, JobId / JobName, JobPage
//! - **ports**: BatchApi（1 ページ分の一覧取得）, Clock
//! - **impls**: AwsBatchApi（本番）, InMemoryBatchApi（開発・テスト）
//! - **app**: BatchMonitor（ページ送り・集計・突き合わせ）
//! - **observability**: StateCount / StatusSummary レポート
//! - **config**: TOML 設定
//! - **error**: MonitorError

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;

pub use app::BatchMonitor;
pub use config::MonitorConfig;
pub use error::MonitorError;
