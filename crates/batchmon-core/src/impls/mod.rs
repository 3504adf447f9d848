//! Impls - BatchApi の実装
//!
//! - **AwsBatchApi**: AWS SDK 経由の本番用
//! - **InMemoryBatchApi**: 開発・テスト用

pub mod aws_batch;
pub mod inmem_batch;

pub use self::aws_batch::AwsBatchApi;
pub use self::inmem_batch::{InMemoryBatchApi, ListCall};
