//! Semi-join by full-row equality.
//!
//! `open` buffers `left`. A right row is emitted iff some buffered left row
//! equals it in every field. Duplicates on the right are emitted once each;
//! this is not a deduplicating set intersection (compose with `Distinct`).

use seql_core::prelude::{Row, Schema};

use crate::traits::{check_same_arity, BoxedNode, Lifecycle, Node, OpError};

pub struct Intersect {
    left: BoxedNode,
    right: BoxedNode,
    left_buffer: Vec<Row>,
    lifecycle: Lifecycle,
}

impl Intersect {
    /// Output rows are right rows, under the right schema.
    pub fn new(left: BoxedNode, right: BoxedNode) -> Self {
        Self {
            left,
            right,
            left_buffer: Vec::new(),
            lifecycle: Lifecycle::new("intersect"),
        }
    }
}

impl Node for Intersect {
    fn name(&self) -> &'static str {
        "intersect"
    }

    fn schema(&self) -> &Schema {
        self.right.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.left.open()?;
        self.right.open()?;
        check_same_arity(self.name(), self.left.schema(), self.right.schema())?;
        while let Some(row) = self.left.next()? {
            self.left_buffer.push(row);
        }
        tracing::debug!(buffered = self.left_buffer.len(), "intersect: left side materialized");
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let mut out = None;
        while let Some(row) = self.right.next()? {
            if self.left_buffer.iter().any(|l| *l == row) {
                out = Some(row);
                break;
            }
        }
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
