//! Rows and relations: the immutable values every operator consumes.
//!
//! A `Relation` is storage: a schema plus rows whose arity was checked on
//! construction. Operators never mutate one; they build new `Row`s instead.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Schema;

/// An ordered, fixed-arity sequence of text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    /// New row holding `self`'s fields followed by `other`'s.
    pub fn concat(&self, other: &Row) -> Row {
        let mut fields = Vec::with_capacity(self.arity() + other.arity());
        fields.extend(self.0.iter().cloned());
        fields.extend(other.0.iter().cloned());
        Row(fields)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}

impl Deref for Row {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Row(fields)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Row {
    fn from(fields: [S; N]) -> Self {
        Row(fields.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

/// Serialized shape of a relation: `{ "columns": [...], "rows": [[...], ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RelationDoc {
    columns: Schema,
    #[serde(default)]
    rows: Vec<Row>,
}

/// A schema plus a finite ordered sequence of rows of matching arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RelationDoc", into = "RelationDoc")]
pub struct Relation {
    schema: Schema,
    rows: Vec<Row>,
}

impl Relation {
    /// Build a relation, rejecting any row whose arity differs from the schema.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        let expected = schema.arity();
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.arity() != expected) {
            return Err(Error::Arity {
                row,
                expected,
                found: bad.arity(),
            });
        }
        Ok(Self { schema, rows })
    }

    /// Build a relation from literal column names and rows.
    pub fn from_literal<C, R, S>(columns: C, rows: R) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schema = Schema::new(columns);
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|r| r.into_iter().collect::<Row>())
            .collect();
        Self::new(schema, rows)
    }

    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl TryFrom<RelationDoc> for Relation {
    type Error = Error;

    fn try_from(doc: RelationDoc) -> Result<Self> {
        Relation::new(doc.columns, doc.rows)
    }
}

impl From<Relation> for RelationDoc {
    fn from(rel: Relation) -> Self {
        RelationDoc {
            columns: rel.schema,
            rows: rel.rows,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.schema)?;
        writeln!(f, "----")?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
