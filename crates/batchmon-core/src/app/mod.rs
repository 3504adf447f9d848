//! App - アプリケーション層
//!
//! ports を組み合わせてモニターの操作を実装します。
//!
//! # 主要コンポーネント
//! - **BatchMonitor**: ページ送り、status ごとの件数集計、サマリー
//! - **reconcile**: 失敗ジョブ名と成功ジョブ名の集合演算

pub mod monitor;
pub mod reconcile;

pub use self::monitor::BatchMonitor;
pub use self::reconcile::{failed_not_succeeded, parse_name_list};
