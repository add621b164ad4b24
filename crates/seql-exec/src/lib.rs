#![forbid(unsafe_code)]
//! seql-exec: drive a plan to completion and report on the run.
//!
//! The engine opens the root once, pulls until exhaustion or the configured
//! row limit, and returns the rows as a `Relation` with a `RunManifest`.

pub mod metrics;
pub mod runtime;

pub use runtime::{Engine, ExecError, QueryResult};
