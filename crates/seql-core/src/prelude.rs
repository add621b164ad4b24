//! Convenient re-exports for downstream crates.

pub use crate::config::ExecConfig;
pub use crate::error::{Error, Result};
pub use crate::hash::{Hash256, RowHasher};
pub use crate::manifest::{ManifestId, RunManifest};
pub use crate::schema::Schema;
pub use crate::types::{Relation, Row};
