//! Cross product via block nested loop.
//!
//! `open` buffers all of `left`. Each right row is pulled exactly once and
//! paired with every buffered left row, so output is right-major, left-minor:
//! row `k` is `left[k % |L|] ++ right[k / |L|]`.

use seql_core::prelude::{Row, Schema};

use crate::traits::{BoxedNode, Lifecycle, Node, OpError};

#[derive(Debug)]
enum CrossState {
    /// Need a fresh right row before emitting.
    AwaitingOuterRow,
    /// Pairing `right` with `left_buffer[cursor..]`.
    EmittingInner { right: Row, cursor: usize },
}

pub struct Cross {
    left: BoxedNode,
    right: BoxedNode,
    schema: Schema,
    left_buffer: Vec<Row>,
    state: CrossState,
    lifecycle: Lifecycle,
}

impl Cross {
    pub fn new(left: BoxedNode, right: BoxedNode) -> Self {
        let schema = left.schema().concat(right.schema());
        Self {
            left,
            right,
            schema,
            left_buffer: Vec::new(),
            state: CrossState::AwaitingOuterRow,
            lifecycle: Lifecycle::new("cross"),
        }
    }

    fn advance(&mut self) -> Result<Option<Row>, OpError> {
        // Looping also covers an empty left buffer: every right row is
        // consumed without emitting and the pull ends on right's exhaustion.
        loop {
            if let CrossState::EmittingInner { right, cursor } = &mut self.state {
                if let Some(left) = self.left_buffer.get(*cursor) {
                    *cursor += 1;
                    return Ok(Some(left.concat(right)));
                }
            }
            match self.right.next()? {
                Some(right) => self.state = CrossState::EmittingInner { right, cursor: 0 },
                None => {
                    self.state = CrossState::AwaitingOuterRow;
                    return Ok(None);
                }
            }
        }
    }
}

impl Node for Cross {
    fn name(&self) -> &'static str {
        "cross"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.left.open()?;
        self.right.open()?;
        while let Some(row) = self.left.next()? {
            self.left_buffer.push(row);
        }
        tracing::debug!(buffered = self.left_buffer.len(), "cross: left side materialized");
        self.lifecycle.activate();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>, OpError> {
        if !self.lifecycle.pulling()? {
            return Ok(None);
        }
        let out = self.advance()?;
        Ok(self.lifecycle.observe(out))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Scan;
    use crate::traits::drain;
    use seql_core::prelude::Relation;

    fn rel(col: &str, vals: &[&str]) -> Relation {
        Relation::from_literal([col], vals.iter().map(|v| [*v])).unwrap()
    }

    #[test]
    fn output_is_right_major_left_minor() {
        let mut node = Cross::new(
            Box::new(Scan::new(rel("l", &["a", "b"]))),
            Box::new(Scan::new(rel("r", &["1", "2", "3"]))),
        );
        assert_eq!(node.schema(), &Schema::new(["l", "r"]));
        node.open().unwrap();
        let rows = drain(&mut node).unwrap();
        let expected: Vec<Row> = [
            ["a", "1"],
            ["b", "1"],
            ["a", "2"],
            ["b", "2"],
            ["a", "3"],
            ["b", "3"],
        ]
        .into_iter()
        .map(Row::from)
        .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn empty_left_yields_nothing() {
        let mut node = Cross::new(
            Box::new(Scan::new(rel("l", &[]))),
            Box::new(Scan::new(rel("r", &["1", "2"]))),
        );
        node.open().unwrap();
        assert_eq!(node.next().unwrap(), None);
        assert_eq!(node.next().unwrap(), None);
    }

    #[test]
    fn empty_right_yields_nothing() {
        let mut node = Cross::new(
            Box::new(Scan::new(rel("l", &["a"]))),
            Box::new(Scan::new(rel("r", &[]))),
        );
        node.open().unwrap();
        assert_eq!(drain(&mut node).unwrap(), Vec::<Row>::new());
    }
}
