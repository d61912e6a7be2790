use std::fs;

use serde_json::Value;
use shopscout_cli::commands::{rank, seed};
use tempfile::TempDir;

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be json")
}

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("stores.json");
    fs::write(
        &path,
        r#"[
            {
                "name": "Value Mart",
                "category": "Groceries",
                "inventory": [
                    { "itemName": "Flour", "price": 1.99, "qualityScore": 5.0, "inStock": true },
                    { "itemName": "Eggs", "price": 2.49, "qualityScore": 5.5, "inStock": true }
                ]
            },
            {
                "name": "Organic Emporium",
                "category": "Groceries",
                "inventory": [
                    { "itemName": "Flour", "price": 4.99, "qualityScore": 9.5, "inStock": true },
                    { "itemName": "Eggs", "price": 6.49, "qualityScore": 9.0, "inStock": true }
                ]
            }
        ]"#,
    )
    .expect("write catalog fixture");
    path
}

#[test]
fn rank_returns_picks_for_a_fulfillable_basket() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let result = rank::run(
        vec!["flour".to_string(), "eggs".to_string()],
        "price".to_string(),
        Some(catalog),
    );
    assert_eq!(result.exit_code, 0, "expected successful rank run");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "rank");
    assert_eq!(payload["status"], "ok");

    let selection: Value =
        serde_json::from_str(payload["message"].as_str().expect("message")).expect("selection json");
    assert_eq!(selection["outcome"], "picks");
    assert_eq!(selection["top_pick"]["store_name"], "Value Mart");
    assert_eq!(selection["avoid"]["store_name"], "Organic Emporium");
}

#[test]
fn rank_reports_no_viable_options_when_nothing_matches() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let result = rank::run(vec!["caviar".to_string()], "quality".to_string(), Some(catalog));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    let selection: Value =
        serde_json::from_str(payload["message"].as_str().expect("message")).expect("selection json");
    assert_eq!(selection["outcome"], "no_viable_options");
}

#[test]
fn rank_rejects_an_unknown_mode() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let result = rank::run(vec!["flour".to_string()], "cheap".to_string(), Some(catalog));
    assert_eq!(result.exit_code, 2, "expected client input failure code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "client_input");
}

#[test]
fn rank_fails_cleanly_on_a_missing_catalog() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("nope.json");

    let result = rank::run(vec!["flour".to_string()], "balanced".to_string(), Some(missing));
    assert_eq!(result.exit_code, 4, "expected catalog failure code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "catalog");
}

#[test]
fn seed_writes_a_catalog_that_rank_can_consume() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = dir.path().join("data").join("stores.json");

    let result = seed::run(false, Some(catalog.clone()));
    assert_eq!(result.exit_code, 0, "expected seed to write the demo catalog");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "seed");
    assert_eq!(payload["status"], "ok");

    let ranked = rank::run(
        vec!["flour".to_string(), "eggs".to_string(), "milk".to_string()],
        "quality".to_string(),
        Some(catalog),
    );
    assert_eq!(ranked.exit_code, 0);

    let rank_payload = parse_payload(&ranked.output);
    let selection: Value = serde_json::from_str(rank_payload["message"].as_str().expect("message"))
        .expect("selection json");
    assert_eq!(selection["top_pick"]["store_name"], "Organic Emporium");
}

#[test]
fn seed_refuses_to_clobber_without_force() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = dir.path().join("stores.json");
    fs::write(&catalog, "[]").expect("pre-existing file");

    let result = seed::run(false, Some(catalog.clone()));
    assert_eq!(result.exit_code, 4, "expected destination refusal");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "destination_exists");
    assert_eq!(fs::read_to_string(&catalog).expect("read"), "[]");

    let forced = seed::run(true, Some(catalog.clone()));
    assert_eq!(forced.exit_code, 0, "expected forced overwrite to succeed");
    assert_ne!(fs::read_to_string(&catalog).expect("read"), "[]");
}
