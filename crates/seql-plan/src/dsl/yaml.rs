//! Parsers for plan documents.

use crate::dsl::PlanDocument;
use crate::error::PlanError;

pub fn parse_yaml_plan(text: &str) -> Result<PlanDocument, PlanError> {
    let doc: PlanDocument = serde_yaml::from_str(text)?;
    tracing::debug!(relations = doc.relations.len(), "parsed yaml plan");
    Ok(doc)
}

pub fn parse_json_plan(text: &str) -> Result<PlanDocument, PlanError> {
    let doc: PlanDocument = serde_json::from_str(text)?;
    tracing::debug!(relations = doc.relations.len(), "parsed json plan");
    Ok(doc)
}
