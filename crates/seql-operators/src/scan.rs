//! Leaf operator: emits a stored relation's rows in storage order.

use std::sync::Arc;

use seql_core::prelude::{Relation, Row, Schema};

use crate::traits::{Lifecycle, Node, OpError};

pub struct Scan {
    data: Arc<Relation>,
    /// Next row to return.
    cursor: usize,
    lifecycle: Lifecycle,
}

impl Scan {
    /// The relation is shared read-only; several scans may read the same one.
    pub fn new(data: impl Into<Arc<Relation>>) -> Self {
        Self {
            data: data.into(),
            cursor: 0,
            lifecycle: Lifecycle::new("scan"),
        }
    }
}

impl Node for Scan {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn schema(&self) -> &Schema {
        self.data.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let row = self.data.rows().get(self.cursor).cloned();
        if row.is_some() {
            self.cursor += 1;
        }
        Ok(self.lifecycle.observe(row))
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn describe(&self) -> String {
        format!("scan(columns={}, rows={})", self.data.schema(), self.data.len())
    }
}
