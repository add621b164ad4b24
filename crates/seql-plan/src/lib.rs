#![forbid(unsafe_code)]
//! seql-plan: describe a plan as data and compose it into nodes.
//!
//! There is no optimizer. A `PlanSpec` tree maps one-to-one onto operator
//! constructors, so the document's nesting is the physical plan.

pub mod catalog;
pub mod compose;
pub mod dsl;
pub mod error;

pub use catalog::Catalog;
pub use compose::compose;
pub use dsl::{parse_json_plan, parse_yaml_plan, PlanConfig, PlanDocument, PlanSpec};
pub use error::PlanError;
