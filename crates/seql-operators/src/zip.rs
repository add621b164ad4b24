//! Positional pairing of two inputs.
//!
//! Each pull advances both sides by one row and concatenates them. The first
//! side to run out ends the output; the other side's surplus is dropped.

use seql_core::prelude::{Row, Schema};

use crate::traits::{BoxedNode, Lifecycle, Node, OpError};

pub struct Zip {
    left: BoxedNode,
    right: BoxedNode,
    schema: Schema,
    lifecycle: Lifecycle,
}

impl Zip {
    pub fn new(left: BoxedNode, right: BoxedNode) -> Self {
        let schema = left.schema().concat(right.schema());
        Self {
            left,
            right,
            schema,
            lifecycle: Lifecycle::new("zip"),
        }
    }
}

impl Node for Zip {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.left.open()?;
        self.right.open()?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let out = match self.left.next()? {
            Some(l) => self.right.next()?.map(|r| l.concat(&r)),
            None => None,
        };
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
