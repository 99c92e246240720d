//! Compile history and usage stats
//!
//! The ledger itself is a pure value; [`store`] persists it (and the usage
//! counter) as JSON under `.luacloak/`.

pub mod ledger;
pub mod stats;
pub mod store;

pub use ledger::{CompileRecord, HistoryLedger};
pub use stats::UsageStats;
pub use store::{HistoryStore, StatsStore, DATA_DIR};
