//! Execution configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Stop pulling from the root after this many rows. The rest of the plan
    /// is dropped without being drained.
    pub row_limit: Option<usize>,

    /// Hash every emitted row into the run manifest's output digest.
    pub compute_digest: bool,

    /// Log the plan tree (at `debug`) before opening it.
    pub explain_before_run: bool,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            row_limit: None,
            compute_digest: true,
            explain_before_run: false,
        }
    }
}

impl ExecConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SEQL_ROW_LIMIT`: maximum rows pulled from the root
    /// - `SEQL_COMPUTE_DIGEST`: `true`/`false`
    /// - `SEQL_EXPLAIN`: `true`/`false`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("SEQL_ROW_LIMIT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.row_limit = Some(v);
            }
        }

        if let Ok(s) = std::env::var("SEQL_COMPUTE_DIGEST") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.compute_digest = v;
            }
        }

        if let Ok(s) = std::env::var("SEQL_EXPLAIN") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.explain_before_run = v;
            }
        }

        cfg
    }

    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.row_limit == Some(0) {
            return Err(Error::Config("row_limit must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fill_defaults() {
        let cfg: ExecConfig = serde_json::from_str(r#"{"row_limit": 3}"#).unwrap();
        assert_eq!(cfg.row_limit, Some(3));
        assert!(cfg.compute_digest);
        assert!(!cfg.explain_before_run);
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(ExecConfig::default().with_row_limit(0).validate().is_err());
        assert!(ExecConfig::default().with_row_limit(1).validate().is_ok());
    }
}
