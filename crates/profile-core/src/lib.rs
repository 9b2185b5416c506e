//! Profile sync orchestration
//!
//! This crate ties the lower layers together: the [`SyncEngine`] walks the
//! registered platform adapters, diffs each one against the canonical
//! profile, and produces a [`SyncRunResult`] suitable for rendering or
//! JSON serialization. Dry run is the default mode; apply is opt-in.

pub mod engine;
pub mod logging;
pub mod preview;
pub mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use report::{
    PlatformReport, PlatformStatus, SectionReport, SectionStatus, SyncRunResult,
};
