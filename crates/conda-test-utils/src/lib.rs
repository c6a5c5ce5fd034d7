//! Shared test utilities for the conda-provision workspace.
//!
//! This crate provides a scripted stand-in for the `conda` executable so
//! install/list behaviour can be exercised end to end without conda
//! installed. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`fake`] — [`FakeConda`], a shell script answering per sub-command
//! - [`payloads`] — canned `--json` payloads conda emits

pub mod fake;
pub mod payloads;

pub use fake::{FakeConda, Response};
