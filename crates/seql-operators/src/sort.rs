//! In-memory stable sort on a list of key columns.
//!
//! `open` drains the input and sorts once. Keys are compared in list order by
//! byte-wise string order; rows equal on every key keep their input order.

use std::cmp::Ordering;

use seql_core::prelude::{Row, Schema};

use crate::traits::{check_indices, field, BoxedNode, Lifecycle, Node, OpError};

pub struct Order {
    input: BoxedNode,
    by: Vec<usize>,
    buffer: Vec<Row>,
    /// Next index into the sorted buffer.
    cursor: usize,
    lifecycle: Lifecycle,
}

impl Order {
    pub fn new(input: BoxedNode, by: Vec<usize>) -> Self {
        Self {
            input,
            by,
            buffer: Vec::new(),
            cursor: 0,
            lifecycle: Lifecycle::new("order"),
        }
    }
}

/// Compare two rows on `by`. Callers guarantee every key is in range.
pub fn compare_on(by: &[usize], a: &Row, b: &Row) -> Ordering {
    for &col in by {
        match a[col].cmp(&b[col]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Node for Order {
    fn name(&self) -> &'static str {
        "order"
    }

    fn schema(&self) -> &Schema {
        self.input.schema()
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.input.open()?;
        check_indices(self.name(), self.input.schema(), &self.by)?;
        let max_key = self.by.iter().copied().max();
        while let Some(row) = self.input.next()? {
            if let Some(k) = max_key {
                field(self.name(), &row, k)?;
            }
            self.buffer.push(row);
        }
        // `sort_by` is stable; ties on every key must keep input order.
        let by = &self.by;
        self.buffer.sort_by(|a, b| compare_on(by, a, b));
        tracing::debug!(buffered = self.buffer.len(), keys = ?self.by, "order: input sorted");
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let out = self.buffer.get(self.cursor).cloned();
        if out.is_some() {
            self.cursor += 1;
        }
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.input.as_ref()]
    }

    fn describe(&self) -> String {
        format!("order(by={:?})", self.by)
    }
}
