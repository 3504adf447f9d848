//! Ports - 外部サービスへの抽象化レイヤー
//!
//! モニターは batch サービスと時計にだけ依存します。
//! どちらも trait なので、テストではインメモリ実装と FixedClock に差し替えられます。

pub mod batch_api;
pub mod clock;

pub use self::batch_api::BatchApi;
pub use self::clock::{Clock, FixedClock, SystemClock};
