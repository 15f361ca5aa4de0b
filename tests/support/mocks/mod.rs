// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit;
pub mod delivery;
pub mod time;

/* -------------------------------- 再エクスポート -------------------------------- */

// 時刻関連
pub use time::{FixedClock, SteppingClock, fixed_now};

// 監査ログ関連
pub use audit::{FailingAuditRepo, TamperingAuditRepo, UnserializedAuditRepo, sample_entry};

// 配信関連
pub use delivery::{FlakySender, GatedSender, RecordingSender};
