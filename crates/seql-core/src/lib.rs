#![forbid(unsafe_code)]
//! seql-core: rows, schemas, relations, configs, manifests, and hashing.
//!
//! Pure data; no IO and no execution logic. The pull-based operators live in
//! `seql-operators`, the eager whole-relation algebra in `seql-eager`.

pub mod config;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod prelude;
pub mod schema;
pub mod types;

/// Engine version recorded in run manifests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
