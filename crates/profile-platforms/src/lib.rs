//! Platform adapters for Profile Sync.
//!
//! This crate provides the per-platform half of the reconciliation engine:
//!
//! 1. **The adapter contract** — [`PlatformAdapter`], the capability-gated
//!    interface the orchestrator drives.
//!
//! 2. **Structured-API family** — [`WantedAdapter`], which issues
//!    authenticated calls against the platform's resume-management
//!    endpoints through an injected [`ResumeApi`] client and supports
//!    granular skill/career/education/activity CRUD.
//!
//! 3. **Browser-automation family** — [`BrowserAdapter`], one generic
//!    adapter parameterized by a [`BrowserPlatform`] description, which
//!    drives a web UI through an injected [`BrowserSession`] and supports
//!    only coarse field-level form updates.
//!
//! Transports are deliberately behind traits: HTTP plumbing and
//! browser-session pooling are external collaborators, not part of this
//! engine.

pub mod adapter;
pub mod browser;
pub mod client;
pub mod error;
pub mod wanted;

pub use adapter::{
    Capabilities, FetchOutcome, PlanAdd, PlanDelete, PlanUpdate, Platform, PlatformAdapter,
    Section, SectionOutcome, SetPlan,
};
pub use browser::{BrowserAdapter, BrowserPlatform};
pub use client::{ApiProfile, ApiResumeDetail, BrowserSession, ResumeApi};
pub use error::{Error, Result};
pub use wanted::WantedAdapter;
