//! Session-scoped caching layer for report data.
//!
//! This module provides a report-agnostic caching mechanism that:
//! - Serves a fetched report for a fixed freshness window (5 minutes by default)
//! - Collapses concurrent identical requests into one in-flight fetch
//! - Resolves batches with per-report failure isolation
//! - Invalidates by date range after actions that change server-side data
//!
//! Nothing is persisted; a cache lives as long as the session that built it.

mod layer;
mod storage;
mod traits;

pub use layer::ReportCache;
pub use storage::{MemoryStorage, NoopStorage};
pub use traits::LoadState;

#[cfg(test)]
pub use traits::CacheSource;
