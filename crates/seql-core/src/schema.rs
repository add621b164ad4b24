//! Relation schemas: an ordered list of column names.
//!
//! Every field in seql is text, so a schema carries names only. Names are
//! expected to be unique but this is not enforced; `index_of` returns the
//! first match.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub columns: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of columns; every row produced under this schema has this many fields.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, idx: usize) -> Option<&str> {
        self.columns.get(idx).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Schema of `self` followed by `other` (cross product, zip, join output).
    pub fn concat(&self, other: &Schema) -> Schema {
        let mut columns = Vec::with_capacity(self.arity() + other.arity());
        columns.extend(self.columns.iter().cloned());
        columns.extend(other.columns.iter().cloned());
        Schema { columns }
    }

    /// Schema of a projection onto `cols`, in the given order.
    ///
    /// Positions past the arity are named `#<idx>`; the projecting operator
    /// rejects them before any row flows.
    pub fn select(&self, cols: &[usize]) -> Schema {
        Schema {
            columns: cols
                .iter()
                .map(|&i| {
                    self.column(i)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("#{i}"))
                })
                .collect(),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.columns.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_reorders_and_repeats() {
        let schema = Schema::new(["name", "from", "resides"]);
        let projected = schema.select(&[2, 0, 2]);
        assert_eq!(projected, Schema::new(["resides", "name", "resides"]));
    }

    #[test]
    fn select_marks_unknown_positions() {
        let schema = Schema::new(["a"]);
        assert_eq!(schema.select(&[0, 3]).columns, vec!["a", "#3"]);
    }

    #[test]
    fn concat_keeps_left_then_right() {
        let l = Schema::new(["name", "from"]);
        let r = Schema::new(["location", "country"]);
        assert_eq!(
            l.concat(&r),
            Schema::new(["name", "from", "location", "country"])
        );
        assert_eq!(l.concat(&r).index_of("country"), Some(3));
    }
}
