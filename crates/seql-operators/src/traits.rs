//! Node trait + common interfaces.
//!
//! The contract is two calls in mandatory order: `open` exactly once, which
//! opens every child first, then `next` repeatedly. `Ok(None)` means the
//! node is exhausted and it stays exhausted. Errors are fail-fast: a node
//! that returns `Err` aborts the whole pull chain.

use seql_core::prelude::{Row, Schema};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("{op}: column index {index} out of range for arity {arity}")]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        arity: usize,
    },

    #[error("{op}: lifecycle violation: {detail}")]
    Lifecycle { op: &'static str, detail: String },

    #[error("{op}: incompatible input arities {left} and {right}")]
    SchemaArity {
        op: &'static str,
        left: usize,
        right: usize,
    },
}

/// Trait that all operators implement.
///
/// Invariants:
/// - `schema()` is fixed at construction and every emitted row has its arity.
/// - `open` opens children before doing any work of its own.
/// - After the first `Ok(None)`, `next` keeps returning `Ok(None)`.
/// - A node whose `open` returned `Err` is never pullable.
pub trait Node: Send {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Declared output schema.
    fn schema(&self) -> &Schema;

    /// Prepare for pulling. Blocking operators materialize input here.
    fn open(&mut self) -> Result<(), OpError>;

    /// Next output row, or `None` once exhausted.
    fn next(&mut self) -> Result<Option<Row>, OpError>;

    /// Direct inputs, left to right.
    fn children(&self) -> Vec<&dyn Node>;

    /// One-line rendering with parameters, used by `explain`.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

pub type BoxedNode = Box<dyn Node>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, children wired, buffers empty.
    #[default]
    Composed,
    /// `open` began but did not complete. Only observable after an `open`
    /// that returned `Err`; the node never becomes pullable.
    Failed,
    Active,
    Exhausted,
}

/// Per-node lifecycle state machine shared by every operator.
#[derive(Debug, Clone, Copy)]
pub struct Lifecycle {
    op: &'static str,
    phase: Phase,
}

impl Lifecycle {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            phase: Phase::Composed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Transition `Composed -> Failed`; a node is never opened twice.
    ///
    /// The operator calls [`Lifecycle::activate`] as the last step of a
    /// successful `open`. Any early return leaves the node `Failed`.
    pub fn open(&mut self) -> Result<(), OpError> {
        match self.phase {
            Phase::Composed => {
                self.phase = Phase::Failed;
                Ok(())
            }
            _ => Err(OpError::Lifecycle {
                op: self.op,
                detail: "open called on a node that was already opened".into(),
            }),
        }
    }

    /// Transition `Failed -> Active` once `open` has fully succeeded.
    pub fn activate(&mut self) {
        if self.phase == Phase::Failed {
            self.phase = Phase::Active;
        }
    }

    /// Whether a pull should do work. `Ok(false)` once exhausted.
    pub fn pulling(&self) -> Result<bool, OpError> {
        match self.phase {
            Phase::Composed => Err(OpError::Lifecycle {
                op: self.op,
                detail: "next called before open".into(),
            }),
            Phase::Failed => Err(OpError::Lifecycle {
                op: self.op,
                detail: "next called after a failed open".into(),
            }),
            Phase::Active => Ok(true),
            Phase::Exhausted => Ok(false),
        }
    }

    /// Record a pull result; the first `None` latches `Exhausted`.
    pub fn observe(&mut self, out: Option<Row>) -> Option<Row> {
        if out.is_none() {
            self.phase = Phase::Exhausted;
        }
        out
    }
}

/// Checked field access.
pub(crate) fn field<'r>(op: &'static str, row: &'r Row, index: usize) -> Result<&'r str, OpError> {
    row.get(index).ok_or(OpError::IndexOutOfRange {
        op,
        index,
        arity: row.arity(),
    })
}

/// Reject any index that is not a position of `schema`.
pub(crate) fn check_indices(
    op: &'static str,
    schema: &Schema,
    indices: &[usize],
) -> Result<(), OpError> {
    let arity = schema.arity();
    match indices.iter().find(|&&i| i >= arity) {
        Some(&index) => Err(OpError::IndexOutOfRange { op, index, arity }),
        None => Ok(()),
    }
}

/// Reject two inputs whose declared arities differ.
pub(crate) fn check_same_arity(
    op: &'static str,
    left: &Schema,
    right: &Schema,
) -> Result<(), OpError> {
    if left.arity() != right.arity() {
        return Err(OpError::SchemaArity {
            op,
            left: left.arity(),
            right: right.arity(),
        });
    }
    Ok(())
}

/// Pull an already-opened node to exhaustion.
pub fn drain(node: &mut dyn Node) -> Result<Vec<Row>, OpError> {
    let mut rows = Vec::new();
    while let Some(row) = node.next()? {
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_rejects_pull_before_open() {
        let lc = Lifecycle::new("scan");
        assert!(matches!(
            lc.pulling(),
            Err(OpError::Lifecycle { op: "scan", .. })
        ));
    }

    #[test]
    fn lifecycle_rejects_second_open() {
        let mut lc = Lifecycle::new("order");
        lc.open().unwrap();
        lc.activate();
        assert!(lc.open().is_err());
    }

    #[test]
    fn lifecycle_latches_exhaustion() {
        let mut lc = Lifecycle::new("zip");
        lc.open().unwrap();
        lc.activate();
        assert_eq!(lc.observe(Some(Row::from(["a"]))), Some(Row::from(["a"])));
        assert_eq!(lc.phase(), Phase::Active);
        assert_eq!(lc.observe(None), None);
        assert_eq!(lc.phase(), Phase::Exhausted);
        assert!(!lc.pulling().unwrap());
        // A re-open after being driven is still a violation.
        assert!(lc.open().is_err());
    }

    #[test]
    fn lifecycle_stays_failed_without_activate() {
        let mut lc = Lifecycle::new("union");
        lc.open().unwrap();
        assert_eq!(lc.phase(), Phase::Failed);
        assert!(matches!(
            lc.pulling(),
            Err(OpError::Lifecycle { op: "union", .. })
        ));
        // Neither a retry nor a late observe makes it pullable.
        assert!(lc.open().is_err());
        assert!(lc.pulling().is_err());
    }

    #[test]
    fn index_checks_report_arity() {
        let schema = Schema::new(["a", "b"]);
        assert!(check_indices("project", &schema, &[1, 0, 1]).is_ok());
        assert_eq!(
            check_indices("project", &schema, &[0, 2]),
            Err(OpError::IndexOutOfRange {
                op: "project",
                index: 2,
                arity: 2
            })
        );
    }
}
