//! End-to-end queries over the people/places/languages fixtures.

mod common;

use common::{languages, people, places, rows, run, scan};
use seql_core::prelude::Schema;
use seql_operators::{
    ConstantSelect, Cross, Distinct, EqualsSelect, HashJoin, Inspect, Intersect, Node, Order,
    Project, Union, Zip,
};

#[test]
fn test_scan_returns_storage_order() {
    let r = people();
    assert_eq!(run(scan(&r)), r.rows());
}

#[test]
fn test_lives_where_they_are_from() {
    let out = run(Box::new(EqualsSelect::new(scan(&people()), 1, 2)));
    assert_eq!(
        out,
        rows(&[
            ["Jordan", "New York", "New York"],
            ["Devin", "California", "California"],
            ["Smudge", "Ontario", "Ontario"],
        ])
    );
}

#[test]
fn test_what_country_smudge_lives_in() {
    let plan = Project::new(
        Box::new(ConstantSelect::new(
            Box::new(Project::new(
                Box::new(EqualsSelect::new(
                    Box::new(Cross::new(scan(&people()), scan(&places()))),
                    2,
                    3,
                )),
                vec![0, 4],
            )),
            0,
            "Smudge",
        )),
        vec![1],
    );
    assert_eq!(plan.schema(), &Schema::new(["country"]));
    assert_eq!(run(Box::new(plan)), rows(&[["Canada"]]));
}

#[test]
fn test_intersect_languages() {
    let out = run(Box::new(Intersect::new(
        scan(&languages(&["Go", "Kotlin"])),
        scan(&languages(&["Python", "Go", "JavaScript"])),
    )));
    assert_eq!(out, rows(&[["Go"]]));
}

#[test]
fn test_order_languages() {
    let out = run(Box::new(Order::new(
        scan(&languages(&["Python", "Go", "JavaScript"])),
        vec![0],
    )));
    assert_eq!(out, rows(&[["Go"], ["JavaScript"], ["Python"]]));
}

#[test]
fn test_distinct_of_union_keeps_first_occurrence() {
    let out = run(Box::new(Distinct::new(Box::new(Union::new(
        scan(&languages(&["Go", "Kotlin"])),
        scan(&languages(&["Python", "Go", "JavaScript"])),
    )))));
    assert_eq!(out, rows(&[["Go"], ["Kotlin"], ["Python"], ["JavaScript"]]));
}

#[test]
fn test_union_is_left_then_right_without_dedup() {
    let c = places();
    let out = run(Box::new(Union::new(scan(&c), scan(&c))));
    let mut expected = c.rows().to_vec();
    expected.extend(c.rows().iter().cloned());
    assert_eq!(out, expected);
}

#[test]
fn test_zip_truncates_to_shorter_input() {
    let out = run(Box::new(Zip::new(scan(&people()), scan(&places()))));
    assert_eq!(
        out,
        rows(&[
            ["Jordan", "New York", "New York", "New York", "United States"],
            ["Lauren", "California", "New York", "California", "United States"],
            ["Justin", "Ontario", "New York", "Ontario", "Canada"],
        ])
    );
}

#[test]
fn test_inspect_is_transparent() {
    let c = places();
    let (tap, seen) = Inspect::collecting(scan(&c));
    let out = run(Box::new(tap));
    assert_eq!(out, c.rows());
    assert_eq!(seen.lock().unwrap().as_slice(), c.rows());
}

#[test]
fn test_hash_join_matches_where_they_reside() {
    let out = run(Box::new(Project::new(
        Box::new(HashJoin::new(scan(&people()), scan(&places()), 2, 0)),
        vec![0, 4],
    )));
    assert_eq!(
        out,
        rows(&[
            ["Jordan", "United States"],
            ["Lauren", "United States"],
            ["Justin", "United States"],
            ["Devin", "United States"],
            ["Smudge", "Canada"],
        ])
    );
}

#[test]
fn test_multi_key_hash_join() {
    let out = run(Box::new(HashJoin::on_keys(
        scan(&people()),
        scan(&people()),
        vec![1, 2],
        vec![2, 1],
    )));
    // Only rows with from == resides pair with themselves under the swapped key.
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|r| r[0] == r[3]));
}
