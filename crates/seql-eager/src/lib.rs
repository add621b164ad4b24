#![forbid(unsafe_code)]
//! seql-eager: whole-relation-at-a-time algebra.
//!
//! Each function takes complete relations and returns a new one. There is no
//! state and no laziness; this is the baseline the pull-based operators are
//! checked against. `join` is a plain nested loop so it can serve as the
//! reference for the hash join.

use seql_core::prelude::{Error, Relation, Result, Row, Schema};

fn check(rel: &Relation, cols: &[usize]) -> Result<()> {
    let arity = rel.schema().arity();
    match cols.iter().find(|&&c| c >= arity) {
        Some(c) => Err(Error::Schema(format!(
            "column index {c} out of range for arity {arity}"
        ))),
        None => Ok(()),
    }
}

fn check_same_arity(left: &Relation, right: &Relation) -> Result<()> {
    if left.schema().arity() != right.schema().arity() {
        return Err(Error::Schema(format!(
            "incompatible arities {} and {}",
            left.schema().arity(),
            right.schema().arity()
        )));
    }
    Ok(())
}

fn filtered(rel: &Relation, keep: impl Fn(&Row) -> bool) -> Result<Relation> {
    let rows: Vec<Row> = rel.rows().iter().filter(|r| keep(r)).cloned().collect();
    Relation::new(rel.schema().clone(), rows)
}

/// Rows whose `i`-th field equals `value`.
pub fn constant_select(rel: &Relation, i: usize, value: &str) -> Result<Relation> {
    check(rel, &[i])?;
    filtered(rel, |r| r[i] == value)
}

/// Rows whose `i`-th and `j`-th fields are equal.
pub fn equals_select(rel: &Relation, i: usize, j: usize) -> Result<Relation> {
    check(rel, &[i, j])?;
    filtered(rel, |r| r[i] == r[j])
}

pub fn project(rel: &Relation, cols: &[usize]) -> Result<Relation> {
    check(rel, cols)?;
    let rows: Vec<Row> = rel
        .rows()
        .iter()
        .map(|r| cols.iter().map(|&c| r[c].as_str()).collect::<Row>())
        .collect();
    Relation::new(rel.schema().select(cols), rows)
}

/// Every pairing, right-major and left-minor.
pub fn cross(left: &Relation, right: &Relation) -> Result<Relation> {
    let mut rows = Vec::with_capacity(left.len() * right.len());
    for r in right.rows() {
        for l in left.rows() {
            rows.push(l.concat(r));
        }
    }
    Relation::new(left.schema().concat(right.schema()), rows)
}

pub fn union(left: &Relation, right: &Relation) -> Result<Relation> {
    check_same_arity(left, right)?;
    let rows: Vec<Row> = left.rows().iter().chain(right.rows()).cloned().collect();
    Relation::new(left.schema().clone(), rows)
}

pub fn zip(left: &Relation, right: &Relation) -> Result<Relation> {
    let rows: Vec<Row> = left
        .rows()
        .iter()
        .zip(right.rows())
        .map(|(l, r)| l.concat(r))
        .collect();
    Relation::new(left.schema().concat(right.schema()), rows)
}

/// Right rows that equal some left row, duplicates kept.
pub fn intersect(left: &Relation, right: &Relation) -> Result<Relation> {
    check_same_arity(left, right)?;
    filtered(right, |r| left.rows().contains(r))
}

pub fn distinct(rel: &Relation) -> Result<Relation> {
    let mut rows: Vec<Row> = Vec::new();
    for r in rel.rows() {
        if !rows.contains(r) {
            rows.push(r.clone());
        }
    }
    Relation::new(rel.schema().clone(), rows)
}

/// Stable sort on `by`, byte-wise string order.
pub fn order(rel: &Relation, by: &[usize]) -> Result<Relation> {
    check(rel, by)?;
    let mut rows = rel.rows().to_vec();
    rows.sort_by(|a, b| {
        by.iter()
            .map(|&c| a[c].cmp(&b[c]))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Relation::new(rel.schema().clone(), rows)
}

/// Nested-loop inner equi-join on `left[i] == right[j]`, left-major.
pub fn join(left: &Relation, right: &Relation, i: usize, j: usize) -> Result<Relation> {
    check(left, &[i])?;
    check(right, &[j])?;
    let mut rows = Vec::new();
    for l in left.rows() {
        for r in right.rows() {
            if l[i] == r[j] {
                rows.push(l.concat(r));
            }
        }
    }
    Relation::new(left.schema().concat(right.schema()), rows)
}

/// Empty relation with the given column names.
pub fn empty(columns: &[&str]) -> Relation {
    Relation::empty(Schema::new(columns.iter().copied()))
}
