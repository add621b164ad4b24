//! Run manifest for audit/replay.
//!
//! For a fixed plan and fixed input relations two runs must produce the same
//! `output_digest`; the manifest is how callers check that.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hash::Hash256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(pub Uuid);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub id: ManifestId,

    /// Stable hash of the rendered plan tree (operators and parameters).
    pub plan_hash: Hash256,

    /// Stable hash of the execution config used.
    pub config_hash: Hash256,

    /// Engine version string for provenance.
    pub engine_version: String,

    /// Digest of every emitted row, in emission order. `None` when disabled.
    pub output_digest: Option<Hash256>,

    pub rows_emitted: u64,

    /// The run stopped pulling because it hit the row limit. Rows beyond
    /// the limit may or may not have existed.
    pub limit_reached: bool,

    /// Milliseconds since Unix epoch (UTC).
    pub started_ms: u64,
    pub finished_ms: u64,
}

impl RunManifest {
    pub fn new(plan_hash: Hash256, config_hash: Hash256, started_ms: u64) -> Self {
        Self {
            id: ManifestId(Uuid::new_v4()),
            plan_hash,
            config_hash,
            engine_version: crate::VERSION.to_string(),
            output_digest: None,
            rows_emitted: 0,
            limit_reached: false,
            started_ms,
            finished_ms: started_ms,
        }
    }

    pub fn finish(
        mut self,
        finished_ms: u64,
        rows_emitted: u64,
        limit_reached: bool,
        output_digest: Option<Hash256>,
    ) -> Self {
        self.finished_ms = finished_ms;
        self.rows_emitted = rows_emitted;
        self.limit_reached = limit_reached;
        self.output_digest = output_digest;
        self
    }
}
