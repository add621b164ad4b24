//! `PlanSpec` -> operator tree, by direct constructor nesting.

use seql_operators::{
    BoxedNode, ConstantSelect, Cross, Distinct, EqualsSelect, HashJoin, Inspect, Intersect,
    Order, Project, Scan, Union, Zip,
};

use crate::catalog::Catalog;
use crate::dsl::PlanSpec;
use crate::error::PlanError;

pub fn compose(spec: &PlanSpec, catalog: &Catalog) -> Result<BoxedNode, PlanError> {
    let node: BoxedNode = match spec {
        PlanSpec::Scan { relation } => Box::new(Scan::new(catalog.get(relation)?)),
        PlanSpec::ConstantSelect {
            input,
            index,
            value,
        } => Box::new(ConstantSelect::new(
            compose(input, catalog)?,
            *index,
            value.clone(),
        )),
        PlanSpec::EqualsSelect { input, left, right } => {
            Box::new(EqualsSelect::new(compose(input, catalog)?, *left, *right))
        }
        PlanSpec::Project { input, cols } => {
            Box::new(Project::new(compose(input, catalog)?, cols.clone()))
        }
        PlanSpec::Cross { left, right } => Box::new(Cross::new(
            compose(left, catalog)?,
            compose(right, catalog)?,
        )),
        PlanSpec::Union { left, right } => Box::new(Union::new(
            compose(left, catalog)?,
            compose(right, catalog)?,
        )),
        PlanSpec::Zip { left, right } => Box::new(Zip::new(
            compose(left, catalog)?,
            compose(right, catalog)?,
        )),
        PlanSpec::Inspect { input } => Box::new(Inspect::logging(compose(input, catalog)?)),
        PlanSpec::Intersect { left, right } => Box::new(Intersect::new(
            compose(left, catalog)?,
            compose(right, catalog)?,
        )),
        PlanSpec::Distinct { input } => Box::new(Distinct::new(compose(input, catalog)?)),
        PlanSpec::Order { input, by } => Box::new(Order::new(compose(input, catalog)?, by.clone())),
        PlanSpec::HashJoin {
            left,
            right,
            left_keys,
            right_keys,
        } => {
            if left_keys.is_empty() || left_keys.len() != right_keys.len() {
                return Err(PlanError::Invalid(format!(
                    "hash_join needs matching non-empty key lists, got {} and {}",
                    left_keys.len(),
                    right_keys.len()
                )));
            }
            Box::new(HashJoin::on_keys(
                compose(left, catalog)?,
                compose(right, catalog)?,
                left_keys.clone(),
                right_keys.clone(),
            ))
        }
    };
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seql_core::prelude::Relation;
    use seql_operators::Node;

    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        c.register(
            "c",
            Relation::from_literal(["location", "country"], [["Ontario", "Canada"]]).unwrap(),
        )
        .unwrap();
        c
    }

    #[test]
    fn scan_of_unknown_relation_fails() {
        let spec = PlanSpec::Scan {
            relation: "missing".into(),
        };
        assert!(matches!(
            compose(&spec, &catalog()),
            Err(PlanError::UnknownRelation(name)) if name == "missing"
        ));
    }

    #[test]
    fn composed_schema_follows_nesting() {
        let spec = PlanSpec::Project {
            input: Box::new(PlanSpec::Cross {
                left: Box::new(PlanSpec::Scan {
                    relation: "c".into(),
                }),
                right: Box::new(PlanSpec::Scan {
                    relation: "c".into(),
                }),
            }),
            cols: vec![3, 0],
        };
        let node = compose(&spec, &catalog()).unwrap();
        assert_eq!(node.schema().columns, vec!["country", "location"]);
    }

    #[test]
    fn mismatched_join_keys_are_invalid() {
        let scan = Box::new(PlanSpec::Scan {
            relation: "c".into(),
        });
        let spec = PlanSpec::HashJoin {
            left: scan.clone(),
            right: scan,
            left_keys: vec![0],
            right_keys: vec![],
        };
        assert!(matches!(
            compose(&spec, &catalog()),
            Err(PlanError::Invalid(_))
        ));
    }
}
