//! Skill catalog, alias normalization, and skill set diffing.
//!
//! Skills are the one section treated as a fully-specified, replaceable
//! set: the canonical skill list wholly describes what the remote list
//! should look like, so deletions are intended — unlike careers, education,
//! and activities, which are append-or-update-only history.
//!
//! The [`SkillCatalog`] is a pure configuration value resolved once per run
//! and passed explicitly; there is no module-level mutable state.

pub mod catalog;
pub mod diff;
pub mod error;

pub use catalog::{SkillCatalog, TagId};
pub use diff::{SkillAddition, SkillDiff, diff_skills};
pub use error::{Error, Result};
