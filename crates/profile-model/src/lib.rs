//! Canonical profile and remote snapshot types for Profile Sync.
//!
//! This crate defines the data model shared by every other crate in the
//! workspace:
//!
//! - [`CanonicalProfile`] — the immutable single-source-of-truth record a
//!   run reconciles every platform against.
//! - [`RemoteSnapshot`] — the per-platform remote state fetched once per
//!   run and diffed against the canonical record. Snapshots are ephemeral;
//!   they are never cached across runs.
//! - [`Period`] / [`parse_period`] — best-effort parsing of human-entered
//!   employment periods into remote wire dates.

pub mod error;
pub mod period;
pub mod phone;
pub mod profile;
pub mod snapshot;

pub use error::{Error, Result};
pub use period::{Period, parse_period};
pub use phone::normalize_phone;
pub use profile::{
    CanonicalProfile, CareerEntry, CertificationEntry, CurrentPosition, EducationRecord,
    PersonalInfo, Summary,
};
pub use snapshot::{
    RemoteActivity, RemoteCareer, RemoteEducation, RemoteSkill, RemoteSnapshot,
};
