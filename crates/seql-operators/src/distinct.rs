//! Duplicate elimination preserving first-occurrence order.
//!
//! Nothing is materialized at `open`; the seen set grows as rows are
//! accepted and is searched linearly.

use seql_core::prelude::{Row, Schema};

use crate::traits::{BoxedNode, Lifecycle, Node, OpError};

pub struct Distinct {
    input: BoxedNode,
    seen: Vec<Row>,
    lifecycle: Lifecycle,
}

impl Distinct {
    pub fn new(input: BoxedNode) -> Self {
        Self {
            input,
            seen: Vec::new(),
            lifecycle: Lifecycle::new("distinct"),
        }
    }
}

impl Node for Distinct {
    fn name(&self) -> &'static str {
        "distinct"
    }

    fn schema(&self) -> &Schema {
        self.input.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.input.open()?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let mut out = None;
        while let Some(row) = self.input.next()? {
            if !self.seen.contains(&row) {
                self.seen.push(row.clone());
                out = Some(row);
                break;
            }
        }
        if out.is_none() {
            tracing::trace!(distinct = self.seen.len(), "distinct: input exhausted");
        }
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.input.as_ref()]
    }
}
