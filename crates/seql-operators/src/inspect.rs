//! Debugging tap: hands each row to a sink, then passes it through unchanged.

use std::sync::{Arc, Mutex};

use seql_core::prelude::{Row, Schema};

use crate::traits::{BoxedNode, Lifecycle, Node, OpError};

/// Caller-supplied per-row callback.
pub type RowSink = Box<dyn FnMut(&Row) + Send>;

pub struct Inspect {
    input: BoxedNode,
    sink: RowSink,
    lifecycle: Lifecycle,
}

impl Inspect {
    pub fn new(input: BoxedNode, sink: RowSink) -> Self {
        Self {
            input,
            sink,
            lifecycle: Lifecycle::new("inspect"),
        }
    }

    /// Tap that logs each row as a `tracing` event at `info`.
    pub fn logging(input: BoxedNode) -> Self {
        Self::new(
            input,
            Box::new(|row: &Row| tracing::info!(target: "seql::inspect", %row, "row")),
        )
    }

    /// Tap that appends each row to a shared buffer.
    pub fn collecting(input: BoxedNode) -> (Self, Arc<Mutex<Vec<Row>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let node = Self::new(
            input,
            Box::new(move |row: &Row| {
                if let Ok(mut rows) = sink_seen.lock() {
                    rows.push(row.clone());
                }
            }),
        );
        (node, seen)
    }
}

impl Node for Inspect {
    fn name(&self) -> &'static str {
        "inspect"
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
        let out = self.input.next()?;
        if let Some(row) = &out {
            (self.sink)(row);
        }
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.input.as_ref()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Scan;
    use crate::traits::drain;
    use seql_core::prelude::Relation;

    #[test]
    fn tap_sees_exactly_the_rows_it_passes() {
        let rel = Relation::from_literal(["c"], [["x"], ["y"]]).unwrap();
        let (mut node, seen) = Inspect::collecting(Box::new(Scan::new(rel.clone())));
        node.open().unwrap();
        let out = drain(&mut node).unwrap();
        assert_eq!(out, rel.rows());
        assert_eq!(node.next().unwrap(), None);
        assert_eq!(seen.lock().unwrap().as_slice(), rel.rows());
    }
}
