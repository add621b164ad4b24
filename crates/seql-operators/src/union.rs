//! Bag union: every left row, then every right row. No deduplication.

use seql_core::prelude::{Row, Schema};

use crate::traits::{check_same_arity, BoxedNode, Lifecycle, Node, OpError};

pub struct Union {
    left: BoxedNode,
    right: BoxedNode,
    lifecycle: Lifecycle,
}

impl Union {
    /// Output columns are named after `left`'s.
    pub fn new(left: BoxedNode, right: BoxedNode) -> Self {
        Self {
            left,
            right,
            lifecycle: Lifecycle::new("union"),
        }
    }
}

impl Node for Union {
    fn name(&self) -> &'static str {
        "union"
    }

    fn schema(&self) -> &Schema {
        self.left.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.left.open()?;
        self.right.open()?;
        check_same_arity(self.name(), self.left.schema(), self.right.schema())?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        // The left child latches exhaustion, so re-pulling it is cheap.
        let out = match self.left.next()? {
            Some(row) => Some(row),
            None => self.right.next()?,
        };
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
