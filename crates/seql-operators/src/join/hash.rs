//! Inner equi-join: build on `right`, probe with `left`.
//!
//! `open` drains `right` into buckets keyed by its key fields; each bucket
//! keeps right rows in arrival order. Pulls stream `left` one row at a time
//! and emit `left ++ match` for every row of the left row's bucket before
//! moving on. Left rows with an empty bucket produce nothing.

use std::collections::HashMap;

use seql_core::prelude::{Row, Schema};

use crate::traits::{check_indices, field, BoxedNode, Lifecycle, Node, OpError};

/// Ordered concatenation of a row's key fields.
type JoinKey = Vec<String>;

#[derive(Debug)]
enum ProbeState {
    /// Need the next left row.
    AwaitingOuterRow,
    /// Emitting `left` paired with `index[key][cursor..]`.
    EmittingInner {
        left: Row,
        key: JoinKey,
        cursor: usize,
    },
}

pub struct HashJoin {
    left: BoxedNode,
    right: BoxedNode,
    left_keys: Vec<usize>,
    right_keys: Vec<usize>,
    schema: Schema,
    index: HashMap<JoinKey, Vec<Row>>,
    state: ProbeState,
    lifecycle: Lifecycle,
}

impl HashJoin {
    /// Single-column join on `left[left_key] == right[right_key]`.
    pub fn new(left: BoxedNode, right: BoxedNode, left_key: usize, right_key: usize) -> Self {
        Self::on_keys(left, right, vec![left_key], vec![right_key])
    }

    /// Multi-column join; keys are compared position by position.
    pub fn on_keys(
        left: BoxedNode,
        right: BoxedNode,
        left_keys: Vec<usize>,
        right_keys: Vec<usize>,
    ) -> Self {
        let schema = left.schema().concat(right.schema());
        Self {
            left,
            right,
            left_keys,
            right_keys,
            schema,
            index: HashMap::new(),
            state: ProbeState::AwaitingOuterRow,
            lifecycle: Lifecycle::new("hash_join"),
        }
    }

    fn advance(&mut self) -> Result<Option<Row>, OpError> {
        loop {
            if let ProbeState::EmittingInner { left, key, cursor } = &mut self.state {
                let matched = self.index.get(key).and_then(|bucket| bucket.get(*cursor));
                if let Some(right) = matched {
                    *cursor += 1;
                    return Ok(Some(left.concat(right)));
                }
            }
            match self.left.next()? {
                Some(left) => {
                    let key = key_of("hash_join", &left, &self.left_keys)?;
                    self.state = ProbeState::EmittingInner {
                        left,
                        key,
                        cursor: 0,
                    };
                }
                None => {
                    self.state = ProbeState::AwaitingOuterRow;
                    return Ok(None);
                }
            }
        }
    }
}

fn key_of(op: &'static str, row: &Row, keys: &[usize]) -> Result<JoinKey, OpError> {
    keys.iter()
        .map(|&k| field(op, row, k).map(str::to_string))
        .collect()
}

impl Node for HashJoin {
    fn name(&self) -> &'static str {
        "hash_join"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&mut self) -> Result<(), OpError> {
        self.lifecycle.open()?;
        self.left.open()?;
        self.right.open()?;
        if self.left_keys.len() != self.right_keys.len() {
            return Err(OpError::SchemaArity {
                op: self.name(),
                left: self.left_keys.len(),
                right: self.right_keys.len(),
            });
        }
        check_indices(self.name(), self.left.schema(), &self.left_keys)?;
        check_indices(self.name(), self.right.schema(), &self.right_keys)?;
        let mut build_rows = 0usize;
        while let Some(row) = self.right.next()? {
            let key = key_of(self.name(), &row, &self.right_keys)?;
            self.index.entry(key).or_default().push(row);
            build_rows += 1;
        }
        tracing::debug!(
            build_rows,
            buckets = self.index.len(),
            "hash_join: build side materialized"
        );
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

    fn describe(&self) -> String {
        format!(
            "hash_join(left{:?} == right{:?})",
            self.left_keys, self.right_keys
        )
    }
}
