//! Runtime: execute an operator tree and emit a RunManifest.
//!
//! Behavior:
//! - Hashes the rendered plan and the config before running.
//! - `open`s the root exactly once, then pulls row by row on this thread.
//! - Stops at `row_limit` by simply not pulling again; the partly drained
//!   tree is dropped along with its buffers.
//! - Any operator error aborts the run.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use seql_core::config::ExecConfig;
use seql_core::hash::{hash_serde, hash_str, RowHasher};
use seql_core::manifest::RunManifest;
use seql_core::prelude::Relation;

use seql_operators::{explain, BoxedNode, Node, OpError};

use seql_plan::{compose, Catalog, PlanDocument, PlanError};

use crate::metrics::emit_span;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("operator: {0}")]
    Operator(#[from] OpError),
    #[error("plan: {0}")]
    Plan(#[from] PlanError),
    #[error("core: {0}")]
    Core(#[from] seql_core::error::Error),
}

/// Rows produced by a run plus its manifest.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub relation: Relation,
    pub manifest: RunManifest,
}

pub struct Engine {
    cfg: ExecConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ExecConfig::default())
    }
}

impl Engine {
    pub fn new(cfg: ExecConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &ExecConfig {
        &self.cfg
    }

    /// Build the operator tree for `doc`, with its inline relations layered
    /// over `base`.
    pub fn compose_document(
        &self,
        doc: &PlanDocument,
        base: &Catalog,
    ) -> Result<BoxedNode, ExecError> {
        let mut catalog = base.clone();
        for (name, rel) in &doc.relations {
            catalog.register(name.clone(), rel.clone())?;
        }
        Ok(compose(&doc.plan, &catalog)?)
    }

    /// Execute `root` to completion (or the row limit).
    pub fn run(&self, mut root: BoxedNode) -> Result<QueryResult, ExecError> {
        self.cfg.validate()?;

        let rendered = explain(root.as_ref());
        let plan_hash = hash_str(&rendered);
        let config_hash = hash_serde(&self.cfg)?;
        if self.cfg.explain_before_run {
            tracing::debug!(plan = %rendered, "executing plan");
        }

        let started_ms = now_ms();
        let clock = Instant::now();
        let manifest = RunManifest::new(plan_hash, config_hash, started_ms);

        root.open()?;

        let mut hasher = self.cfg.compute_digest.then(RowHasher::new);
        let mut rows = Vec::new();
        let mut limit_reached = false;
        loop {
            if self.cfg.row_limit.is_some_and(|limit| rows.len() >= limit) {
                limit_reached = true;
                break;
            }
            let Some(row) = root.next()? else {
                break;
            };
            if let Some(h) = hasher.as_mut() {
                h.update(&row);
            }
            rows.push(row);
        }

        let schema = root.schema().clone();
        drop(root);

        let emitted = rows.len() as u64;
        let relation = Relation::new(schema, rows)?;
        let manifest = manifest.finish(
            now_ms(),
            emitted,
            limit_reached,
            hasher.map(|h| h.finalize()),
        );

        emit_span(
            "run_finished",
            &[
                ("rows", emitted.to_string()),
                ("limit_reached", limit_reached.to_string()),
                ("elapsed_us", clock.elapsed().as_micros().to_string()),
                ("plan_hash", manifest.plan_hash.to_hex()),
            ],
        );

        Ok(QueryResult { relation, manifest })
    }

    /// Compose and run a plan document.
    pub fn run_document(
        &self,
        doc: &PlanDocument,
        base: &Catalog,
    ) -> Result<QueryResult, ExecError> {
        let root = self.compose_document(doc, base)?;
        self.run(root)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
