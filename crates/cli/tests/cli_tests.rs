use std::path::Path;

use assert_cmd::Command;
use itemseed_core::Item;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("itemseed").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed the items table"));
}

#[test]
fn test_cli_help_lists_connection_flags() {
    let mut cmd = Command::cargo_bin("itemseed").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--sslmode"))
        .stdout(predicate::str::contains("--seed-file"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let mut cmd = Command::cargo_bin("itemseed").unwrap();
    cmd.arg("--port").arg("5432").assert().failure();
}

#[test]
fn bundled_seed_data_matches_the_item_shape() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/seed_data.json");
    let raw = std::fs::read_to_string(path).unwrap();
    let items: Vec<Item> = serde_json::from_str(&raw).unwrap();

    assert!(!items.is_empty());
    let mut ids: Vec<i64> = items.iter().map(|item| item.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), items.len(), "seed ids must be unique");

    for item in &items {
        assert_eq!(item.embedding_ada002.len(), items[0].embedding_ada002.len());
        assert_eq!(item.embedding_nomic.len(), items[0].embedding_nomic.len());
    }
}
