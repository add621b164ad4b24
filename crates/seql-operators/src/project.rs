//! Projection onto an ordered list of column positions.
//!
//! Positions may repeat, reorder, and skip; the output schema is the matching
//! selection of the child's column names.

use seql_core::prelude::{Row, Schema};

use crate::traits::{check_indices, field, BoxedNode, Lifecycle, Node, OpError};

pub struct Project {
    input: BoxedNode,
    cols: Vec<usize>,
    schema: Schema,
    lifecycle: Lifecycle,
}

impl Project {
    pub fn new(input: BoxedNode, cols: Vec<usize>) -> Self {
        let schema = input.schema().select(&cols);
        Self {
            input,
            cols,
            schema,
            lifecycle: Lifecycle::new("project"),
        }
    }
}

impl Node for Project {
    fn name(&self) -> &'static str {
        "project"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.input.open()?;
        check_indices(self.name(), self.input.schema(), &self.cols)?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let out = match self.input.next()? {
            Some(row) => Some(
                self.cols
                    .iter()
                    .map(|&c| field("project", &row, c))
                    .collect::<Result<Row, _>>()?,
            ),
            None => None,
        };
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.input.as_ref()]
    }

    fn describe(&self) -> String {
        format!("project(cols={:?}) -> {}", self.cols, self.schema)
    }
}
