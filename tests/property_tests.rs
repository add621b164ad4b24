//! Randomized checks of the operator algebra against the eager baseline.

mod common;

use std::sync::Arc;

use common::{run, scan};
use proptest::prelude::*;
use seql_core::prelude::{Relation, Row};
use seql_operators::{Cross, Distinct, HashJoin, Intersect, Order, Union, Zip};

/// Relations of the given arity over a tiny alphabet, so keys collide often.
fn relation(arity: usize, max_rows: usize) -> impl Strategy<Value = Arc<Relation>> {
    prop::collection::vec(prop::collection::vec("[a-c]", arity), 0..max_rows).prop_map(
        move |rows| {
            let columns: Vec<String> = (0..arity).map(|i| format!("c{i}")).collect();
            Arc::new(Relation::from_literal(columns, rows).expect("generated rows fit arity"))
        },
    )
}

fn sorted(mut rows: Vec<Row>) -> Vec<Row> {
    rows.sort();
    rows
}

proptest! {
    #[test]
    fn cross_is_right_major_left_minor(l in relation(2, 6), r in relation(1, 6)) {
        let out = run(Box::new(Cross::new(scan(&l), scan(&r))));
        prop_assert_eq!(out.len(), l.len() * r.len());
        for (k, row) in out.iter().enumerate() {
            let expected = l.rows()[k % l.len()].concat(&r.rows()[k / l.len()]);
            prop_assert_eq!(row, &expected);
        }
    }

    #[test]
    fn distinct_is_idempotent(x in relation(2, 12)) {
        let once = run(Box::new(Distinct::new(scan(&x))));
        let twice = run(Box::new(Distinct::new(Box::new(Distinct::new(scan(&x))))));
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, seql_eager::distinct(&x).unwrap().into_rows());
    }

    #[test]
    fn order_is_stable(keys in prop::collection::vec("[a-c]", 0..16)) {
        // The second column records input position.
        let rows: Vec<[String; 2]> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| [k.clone(), format!("{i:03}")])
            .collect();
        let rel = Arc::new(Relation::from_literal(["k", "pos"], rows).unwrap());
        let out = run(Box::new(Order::new(scan(&rel), vec![0])));
        prop_assert_eq!(out.len(), rel.len());
        for pair in out.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a[0] < b[0] || (a[0] == b[0] && a[1] < b[1]));
        }
        prop_assert_eq!(out, seql_eager::order(&rel, &[0]).unwrap().into_rows());
    }

    #[test]
    fn hash_join_matches_nested_loop(
        l in relation(2, 8),
        r in relation(2, 8),
        i in 0usize..2,
        j in 0usize..2,
    ) {
        let out = run(Box::new(HashJoin::new(scan(&l), scan(&r), i, j)));
        let reference = seql_eager::join(&l, &r, i, j).unwrap().into_rows();
        prop_assert_eq!(sorted(out), sorted(reference));
    }

    #[test]
    fn zip_emits_min_rows(a in relation(1, 10), b in relation(2, 10)) {
        let out = run(Box::new(Zip::new(scan(&a), scan(&b))));
        prop_assert_eq!(out.len(), a.len().min(b.len()));
        prop_assert_eq!(out, seql_eager::zip(&a, &b).unwrap().into_rows());
    }

    #[test]
    fn intersect_and_union_match_eager(l in relation(1, 8), r in relation(1, 8)) {
        let out = run(Box::new(Intersect::new(scan(&l), scan(&r))));
        prop_assert_eq!(out, seql_eager::intersect(&l, &r).unwrap().into_rows());
        let out = run(Box::new(Union::new(scan(&l), scan(&r))));
        prop_assert_eq!(out, seql_eager::union(&l, &r).unwrap().into_rows());
    }
}
