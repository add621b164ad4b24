//! Selection operators.
//!
//! Both pull from their child until a row passes the test or the child is
//! exhausted; rows are passed through unchanged.

use seql_core::prelude::{Row, Schema};

use crate::traits::{check_indices, field, BoxedNode, Lifecycle, Node, OpError};

/// Keeps rows whose field at `index` equals a literal.
pub struct ConstantSelect {
    input: BoxedNode,
    index: usize,
    value: String,
    lifecycle: Lifecycle,
}

impl ConstantSelect {
    pub fn new(input: BoxedNode, index: usize, value: impl Into<String>) -> Self {
        Self {
            input,
            index,
            value: value.into(),
            lifecycle: Lifecycle::new("constant_select"),
        }
    }
}

impl Node for ConstantSelect {
    fn name(&self) -> &'static str {
        "constant_select"
    }

    fn schema(&self) -> &Schema {
        self.input.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.input.open()?;
        check_indices(self.name(), self.input.schema(), &[self.index])?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let mut out = None;
        while let Some(row) = self.input.next()? {
            if field(self.name(), &row, self.index)? == self.value {
                out = Some(row);
                break;
            }
        }
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.input.as_ref()]
    }

    fn describe(&self) -> String {
        format!("constant_select(#{} == {:?})", self.index, self.value)
    }
}

/// Keeps rows whose fields at `left` and `right` are equal.
pub struct EqualsSelect {
    input: BoxedNode,
    left: usize,
    right: usize,
    lifecycle: Lifecycle,
}

impl EqualsSelect {
    pub fn new(input: BoxedNode, left: usize, right: usize) -> Self {
        Self {
            input,
            left,
            right,
            lifecycle: Lifecycle::new("equals_select"),
        }
    }
}

impl Node for EqualsSelect {
    fn name(&self) -> &'static str {
        "equals_select"
    }

    fn schema(&self) -> &Schema {
        self.input.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.input.open()?;
        check_indices(self.name(), self.input.schema(), &[self.left, self.right])?;
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let mut out = None;
        while let Some(row) = self.input.next()? {
            if field(self.name(), &row, self.left)? == field(self.name(), &row, self.right)? {
                out = Some(row);
                break;
            }
        }
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.input.as_ref()]
    }

    fn describe(&self) -> String {
        format!("equals_select(#{} == #{})", self.left, self.right)
    }
}
