//! Shared test utilities for the profile-sync workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`fixtures`] — canonical profile sample data
//! - [`api`] — [`api::InMemoryResumeApi`], a scriptable structured-API fake
//! - [`session`] — [`session::ScriptedSession`], a scriptable browser fake

pub mod api;
pub mod fixtures;
pub mod session;
