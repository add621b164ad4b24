//! Named relations available to `scan` steps.

use std::collections::BTreeMap;
use std::sync::Arc;

use seql_core::prelude::Relation;

use crate::error::PlanError;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    relations: BTreeMap<String, Arc<Relation>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rel` under `name`; names are unique.
    pub fn register(&mut self, name: impl Into<String>, rel: Relation) -> Result<(), PlanError> {
        let name = name.into();
        if self.relations.contains_key(&name) {
            return Err(PlanError::DuplicateRelation(name));
        }
        self.relations.insert(name, Arc::new(rel));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<Relation>, PlanError> {
        self.relations
            .get(name)
            .cloned()
            .ok_or_else(|| PlanError::UnknownRelation(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(String::as_str)
    }

    /// Load relations from a JSON object of `name -> {columns, rows}`.
    pub fn from_json(text: &str) -> Result<Self, PlanError> {
        let docs: BTreeMap<String, Relation> = serde_json::from_str(text)?;
        let mut catalog = Self::new();
        for (name, rel) in docs {
            catalog.register(name, rel)?;
        }
        Ok(catalog)
    }
}
