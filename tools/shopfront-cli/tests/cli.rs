use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;

/// Run `shopfront` inside `dir` with a fresh config file, returning stdout.
fn shopfront(dir: &Path, args: &[&str]) -> String {
    let assert = cargo_bin_cmd!("shopfront")
        .current_dir(dir)
        .args(["--config", "shopfront.toml"])
        .args(args)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output")
}

fn json(dir: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    serde_json::from_str(&shopfront(dir, &full)).expect("json output")
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("shopfront")
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    dir
}

#[test]
fn config_init_writes_valid_defaults() {
    let dir = workspace();
    assert!(dir.path().join("shopfront.toml").is_file());

    let output = shopfront(dir.path(), &["config", "validate"]);
    assert!(output.contains("Configuration is valid"), "{output}");

    let fee = json(dir.path(), &["config", "get", "shipping.flat_fee"]);
    assert_eq!(fee["value"], 300.0);
}

#[test]
fn add_merges_and_persists() {
    let dir = workspace();
    let add = [
        "cart", "add", "--id", "7", "--name", "Kafa", "--price", "750.00", "--variant-id", "1",
        "--variant-name", "500g",
    ];

    shopfront(dir.path(), &add);
    let cart = json(dir.path(), &[&add[..], &["--quantity", "2"]].concat());

    let lines = cart["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["key"], "7:1");
    assert_eq!(lines[0]["quantity"], 3);
    assert_eq!(cart["summary"]["subtotal"], 2250.0);
    assert_eq!(cart["summary"]["shipping"], 300.0);

    let on_disk: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(".shopfront").join("cart.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk[0]["quantity"], 3);
}

#[test]
fn update_zero_is_ignored_and_remove_works() {
    let dir = workspace();
    shopfront(
        dir.path(),
        &["cart", "add", "--id", "1", "--name", "Med", "--price", "450", "-q", "2"],
    );
    shopfront(
        dir.path(),
        &["cart", "add", "--id", "2", "--name", "Čaj", "--price", "300"],
    );

    let cart = json(dir.path(), &["cart", "update", "1", "0"]);
    assert_eq!(cart["lines"][0]["quantity"], 2);

    let found = json(dir.path(), &["cart", "contains", "1"]);
    assert_eq!(found["in_cart"], true);

    let cart = json(dir.path(), &["cart", "remove", "1"]);
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["summary"]["item_count"], 1);

    let found = json(dir.path(), &["cart", "contains", "1"]);
    assert_eq!(found["in_cart"], false);
}

#[test]
fn checkout_builds_order_request() {
    let dir = workspace();
    shopfront(
        dir.path(),
        &["cart", "add", "--id", "1", "--name", "Med", "--price", "450", "-q", "2"],
    );

    let output = shopfront(
        dir.path(),
        &["--json", "checkout", "--name", "Ana", "--phone", "0601234567", "--clear"],
    );
    let order: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(order["customer_name"], "Ana");
    assert_eq!(order["items"][0]["product_id"], "1");
    assert_eq!(order["items"][0]["quantity"], 2);

    let cart = json(dir.path(), &["cart", "show"]);
    assert_eq!(cart["summary"]["lines"], 0);
}

#[test]
fn checkout_of_empty_cart_fails() {
    let dir = workspace();
    cargo_bin_cmd!("shopfront")
        .current_dir(dir.path())
        .args(["checkout", "--name", "Ana", "--phone", "060"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn clear_with_yes_skips_prompt() {
    let dir = workspace();
    shopfront(
        dir.path(),
        &["cart", "add", "--id", "1", "--name", "Med", "--price", "450"],
    );

    let cart = json(dir.path(), &["cart", "clear", "--yes"]);
    assert_eq!(cart["lines"].as_array().unwrap().len(), 0);
    assert_eq!(cart["summary"]["grand_total"], 0.0);
}

#[test]
fn add_rejects_product_id_with_key_separator() {
    let dir = workspace();
    cargo_bin_cmd!("shopfront")
        .current_dir(dir.path())
        .args(["cart", "add", "--id", "1:a", "--name", "Med", "--price", "450"])
        .assert()
        .failure();

    assert!(!dir.path().join(".shopfront").join("cart.json").exists());
}
