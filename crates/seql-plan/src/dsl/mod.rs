//! Plan documents in YAML or JSON.
//!
//! Example:
//! ```yaml
//! config: { row_limit: 10 }
//! relations:
//!   languages: { columns: [language], rows: [[Python], [Go], [JavaScript]] }
//! plan:
//!   op: order
//!   by: [0]
//!   input: { op: scan, relation: languages }
//! ```

pub mod yaml;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use seql_core::prelude::{ExecConfig, Relation};

pub use yaml::{parse_json_plan, parse_yaml_plan};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Overrides for env-derived defaults.
    #[serde(default)]
    pub config: Option<PlanConfig>,

    /// Inline relations, merged into the caller's catalog.
    #[serde(default)]
    pub relations: BTreeMap<String, Relation>,

    pub plan: PlanSpec,
}

/// Execution settings a document may pin. Unset fields keep the caller's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub row_limit: Option<usize>,
    #[serde(default)]
    pub compute_digest: Option<bool>,
    #[serde(default)]
    pub explain: Option<bool>,
}

impl PlanConfig {
    /// Layer the document's settings over `cfg`.
    pub fn apply(&self, cfg: &mut ExecConfig) {
        if let Some(limit) = self.row_limit {
            cfg.row_limit = Some(limit);
        }
        if let Some(digest) = self.compute_digest {
            cfg.compute_digest = digest;
        }
        if let Some(explain) = self.explain {
            cfg.explain_before_run = explain;
        }
    }
}

/// One operator per variant; children are nested specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum PlanSpec {
    Scan {
        relation: String,
    },
    ConstantSelect {
        input: Box<PlanSpec>,
        index: usize,
        value: String,
    },
    EqualsSelect {
        input: Box<PlanSpec>,
        left: usize,
        right: usize,
    },
    Project {
        input: Box<PlanSpec>,
        cols: Vec<usize>,
    },
    Cross {
        left: Box<PlanSpec>,
        right: Box<PlanSpec>,
    },
    Union {
        left: Box<PlanSpec>,
        right: Box<PlanSpec>,
    },
    Zip {
        left: Box<PlanSpec>,
        right: Box<PlanSpec>,
    },
    Inspect {
        input: Box<PlanSpec>,
    },
    Intersect {
        left: Box<PlanSpec>,
        right: Box<PlanSpec>,
    },
    Distinct {
        input: Box<PlanSpec>,
    },
    Order {
        input: Box<PlanSpec>,
        by: Vec<usize>,
    },
    HashJoin {
        left: Box<PlanSpec>,
        right: Box<PlanSpec>,
        left_keys: Vec<usize>,
        right_keys: Vec<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_config_overrides_only_set_fields() {
        let mut cfg = ExecConfig {
            row_limit: Some(100),
            compute_digest: false,
            explain_before_run: true,
        };
        PlanConfig {
            row_limit: Some(5),
            ..Default::default()
        }
        .apply(&mut cfg);
        assert_eq!(cfg.row_limit, Some(5));
        assert!(!cfg.compute_digest);
        assert!(cfg.explain_before_run);
    }
}
