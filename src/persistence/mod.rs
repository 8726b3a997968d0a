//! Score reporting and local fallback counters
//!
//! Features:
//! - JSON score reports for the leaderboard service (`POST /api/update`)
//! - Fire-and-forget dispatch on the web; failures are logged, never retried
//! - Per-domain scalar counters in LocalStorage as an offline fallback

pub mod local;
pub mod report;

pub use local::{KeyValueStore, LocalKeys, LocalStats, MemoryStore, StorageError, record_locally};
pub use report::{ReportError, ScoreReport, ScoreSink, UpdateResponse, report_run};
