#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn drillbox(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("drillbox"));
    cmd.env("DRILLBOX_DATA", data.path().as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn inventory_upsert_and_sell_workflow() {
    let data = TempDir::new().unwrap();

    drillbox(&data)
        .args(["inventory", "add", "Shirt", "50000", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product added: Shirt"));

    drillbox(&data)
        .args(["inventory", "add", "shirt", "55000", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product updated: Shirt (stock 6)"));

    drillbox(&data)
        .args(["inventory", "sell", "SHIRT", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Insufficient stock"));

    drillbox(&data)
        .args(["inventory", "sell", "Shirt", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out of stock"));

    drillbox(&data)
        .args(["inventory", "list", "--available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products."));

    let saved = fs::read_to_string(data.path().join("inventory.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"name": "Shirt", "price": 55000.0, "stock": 0}])
    );
}

#[test]
fn sell_rejects_non_positive_quantity() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["inventory", "sell", "Ghost", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn invalid_product_fields_are_reported() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["inventory", "add", "Shirt", "cheap", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price: not numeric"));
    assert!(!data.path().join("inventory.json").exists());
}

#[test]
fn corrupt_store_opens_empty() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("library.json"), "{ not json").unwrap();
    drillbox(&data)
        .args(["library", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books."));
}

#[test]
fn library_loan_state_machine() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["library", "add", "A1", "Rayuela"])
        .assert()
        .success();

    drillbox(&data)
        .args(["library", "borrow", "a1", "Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lent to Ana"));

    drillbox(&data)
        .args(["library", "borrow", "A1", "Luis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already on loan to Ana"));

    drillbox(&data)
        .args(["library", "list", "--on-loan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rayuela"));

    drillbox(&data)
        .args(["library", "return", "A1"])
        .assert()
        .success();

    drillbox(&data)
        .args(["library", "return", "A1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not on loan"));
}

#[test]
fn tasks_append_and_list() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["tasks", "add", "Estudiar", "Python"])
        .assert()
        .success();
    drillbox(&data)
        .args(["tasks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Estudiar Python"));
    assert_eq!(
        fs::read_to_string(data.path().join("tasks.txt")).unwrap(),
        "Estudiar Python\n"
    );
}

#[test]
fn analyze_reports_column_stats() {
    let data = TempDir::new().unwrap();
    fs::write(
        data.path().join("people.csv"),
        "name,age\nAna,20\nLuis,x\nMarta,22.5\n",
    )
    .unwrap();

    drillbox(&data)
        .args(["analyze", "people.csv", "age"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mean:   21.25"))
        .stdout(predicate::str::contains("max:    22.50"));

    drillbox(&data)
        .args(["analyze", "people.csv", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no numeric values"));
}

#[test]
fn report_is_written_to_data_dir() {
    let data = TempDir::new().unwrap();
    fs::write(
        data.path().join("students.csv"),
        "name,courses\nAna,PY;JS\nLuis,XX\n",
    )
    .unwrap();
    fs::write(
        data.path().join("courses.json"),
        r#"[{"id": "PY", "name": "Python"}, {"id": "JS", "name": "JavaScript"}]"#,
    )
    .unwrap();

    drillbox(&data)
        .args(["report", "students.csv", "courses.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana: Python, JavaScript"));

    assert_eq!(
        fs::read_to_string(data.path().join("report.txt")).unwrap(),
        "Ana: Python, JavaScript\nLuis: (no courses)\n"
    );
}

#[test]
fn vat_uses_configured_rate() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["drill", "vat", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("19.00"));

    drillbox(&data)
        .args(["config", "tax-rate", "0.21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tax-rate set to 0.21"));

    drillbox(&data)
        .args(["drill", "vat", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("21.00"));

    drillbox(&data)
        .args(["config", "tax-rate", "3"])
        .assert()
        .failure();
}

#[test]
fn malformed_discount_entry_is_rejected() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["drill", "discount", "Camisa:50000", "Gorra"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed entry 'Gorra'"));

    drillbox(&data)
        .args(["drill", "discount", "Camisa:50000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Camisa: 50000.00 -> 45000.00"));
}

#[test]
fn small_drills() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args(["drill", "bmi", "70", "1,75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 22.86 (normal)"));

    drillbox(&data)
        .args(["drill", "above", "5", "12", "3", "40"])
        .assert()
        .success()
        .stdout("12 40\n");

    drillbox(&data)
        .args(["drill", "count", "3", "1"])
        .assert()
        .success()
        .stdout("counter 1: 3\ncounter 2: 1\n");

    drillbox(&data)
        .args(["drill", "explore", r#"[1, [2, 3], {"a": 4}]"#])
        .assert()
        .success()
        .stdout("1 (depth 1)\n  2 (depth 2)\n  3 (depth 2)\n  4 (depth 2)\n");
}

#[test]
fn profile_card_cleans_optional_fields() {
    let data = TempDir::new().unwrap();
    drillbox(&data)
        .args([
            "drill", "profile", "  Ana  María ", "28", "leer", "LEER", "run!", "-n",
            "Twitter=ana", "-n", "github=ana28",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User profile\nName: Ana María\nAge: 28\nHobbies: leer\n\
             Social networks: github=ana28, twitter=@ana\n",
        ))
        .stdout(predicate::str::contains("Left out: run!"));

    drillbox(&data)
        .args(["drill", "profile", "Ana", "121"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("age: must be between 0 and 120"));
}
