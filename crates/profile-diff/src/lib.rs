//! Entity matching and diff primitives.
//!
//! Everything in this crate is pure: identical inputs always yield
//! identical outputs, and nothing here performs I/O. The matcher decides
//! whether a canonical record and a remote record denote the same
//! real-world entity when the two systems share no stable identifier; the
//! diff functions turn a canonical record plus a remote snapshot into a
//! minimal change plan.

pub mod field;
pub mod matcher;
pub mod set;

pub use field::{EMPTY_PLACEHOLDER, FieldChange, compute_field_diff};
pub use matcher::{match_career, match_certification, match_education, strip_corporate_noise};
pub use set::{SetAddition, SetDiff, SetUpdate, compute_set_diff};
