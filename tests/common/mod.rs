//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use seql_core::prelude::{Relation, Row};
use seql_operators::{BoxedNode, Node, Scan};

/// `name, from, resides`
pub fn people() -> Arc<Relation> {
    Arc::new(
        Relation::from_literal(
            ["name", "from", "resides"],
            [
                ["Jordan", "New York", "New York"],
                ["Lauren", "California", "New York"],
                ["Justin", "Ontario", "New York"],
                ["Devin", "California", "California"],
                ["Smudge", "Ontario", "Ontario"],
            ],
        )
        .expect("people fixture"),
    )
}

/// `location, country`
pub fn places() -> Arc<Relation> {
    Arc::new(
        Relation::from_literal(
            ["location", "country"],
            [
                ["New York", "United States"],
                ["California", "United States"],
                ["Ontario", "Canada"],
            ],
        )
        .expect("places fixture"),
    )
}

pub fn languages(vals: &[&str]) -> Arc<Relation> {
    Arc::new(
        Relation::from_literal(["language"], vals.iter().map(|v| [*v])).expect("languages"),
    )
}

pub fn scan(rel: &Arc<Relation>) -> BoxedNode {
    Box::new(Scan::new(Arc::clone(rel)))
}

pub fn rows<const N: usize>(literal: &[[&str; N]]) -> Vec<Row> {
    literal.iter().map(|r| Row::from(*r)).collect()
}

/// Open `node` and pull it to exhaustion, checking every row's arity.
pub fn run(mut node: BoxedNode) -> Vec<Row> {
    node.open().expect("open");
    let mut out = Vec::new();
    while let Some(row) = node.next().expect("next") {
        assert_eq!(
            row.arity(),
            node.schema().arity(),
            "{} emitted a row of the wrong arity",
            node.name()
        );
        out.push(row);
    }
    out
}
