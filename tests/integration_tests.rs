//! Integration tests for the CCT CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Each test works in its own temp directory, so the default catalog.db
//! lands there.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a cct command rooted in a temp directory
fn cct(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cct").unwrap();
    cmd.current_dir(tmp.path());
    cmd
}

/// Helper to create an initialized catalog in a temp directory
fn setup_catalog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    cct(&tmp).arg("init").assert().success();
    tmp
}

/// Helper to add a part with a category, part number, and material
fn add_part(tmp: &TempDir, category: &str, number: &str, name: &str, material: &str) {
    cct(tmp)
        .args([
            "part",
            "add",
            "--category",
            category,
            "--part-number",
            number,
            "--name",
            name,
            "--material",
            material,
        ])
        .assert()
        .success();
}

/// A usage export with the verbatim spreadsheet headers, including the
/// embedded carriage returns inside the quoted usage column names
fn usage_csv() -> String {
    let mut csv = String::new();
    csv.push_str("\"Primary Vendor\",\"Part Number\",");
    csv.push_str("\"Total Rolling\r\r\n 12 Months\",");
    csv.push_str("\"Average Monthly\r\r\n Usage Rolling12\"\r\n");
    csv.push_str("MIDSTATE,WHL-PUR-STA40-1234,\"1,200\",100\r\n");
    csv.push_str("MIDSTATE,,5,1\r\n");
    csv.push_str("MEGA,AXL-SST-ZER40-2345,36,3\r\n");
    csv
}

#[test]
fn test_init_seeds_reference_data() {
    let tmp = TempDir::new().unwrap();

    cct(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized catalog"))
        .stdout(predicate::str::contains("9 categories"));

    cct(&tmp)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wheels"))
        .stdout(predicate::str::contains("Brush Guards"));
}

#[test]
fn test_init_twice_requires_force() {
    let tmp = setup_catalog();

    cct(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    cct(&tmp)
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized catalog"));
}

#[test]
fn test_import_counts_blank_part_number_as_error() {
    let tmp = setup_catalog();
    let csv_path = tmp.path().join("usage.csv");
    fs::write(&csv_path, usage_csv()).unwrap();

    cct(&tmp)
        .args(["import", "usage.csv", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 3"))
        .stdout(predicate::str::contains("\"created\": 2"))
        .stdout(predicate::str::contains("\"updated\": 0"))
        .stdout(predicate::str::contains("\"errors\": 1"));
}

#[test]
fn test_import_populates_vendor_usage_and_category() {
    let tmp = setup_catalog();
    fs::write(tmp.path().join("usage.csv"), usage_csv()).unwrap();
    cct(&tmp).args(["import", "usage.csv"]).assert().success();

    cct(&tmp)
        .args(["part", "show", "WHL-PUR-STA40-1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vendor: MIDSTATE"))
        .stdout(predicate::str::contains("rolling_12_month_usage: 1200"))
        .stdout(predicate::str::contains("category_id: 1"));

    // Re-importing the same file updates instead of duplicating
    cct(&tmp)
        .args(["import", "usage.csv", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\": 0"))
        .stdout(predicate::str::contains("\"updated\": 2"));
}

#[test]
fn test_extract_fills_attributes_from_identifiers() {
    let tmp = setup_catalog();
    fs::write(tmp.path().join("usage.csv"), usage_csv()).unwrap();
    cct(&tmp).args(["import", "usage.csv"]).assert().success();

    cct(&tmp)
        .args(["extract", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 2"))
        .stdout(predicate::str::contains("\"updated\": 2"))
        .stdout(predicate::str::contains("\"with_material\": 2"));

    cct(&tmp)
        .args(["part", "show", "AXL-SST-ZER40-2345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("material: Stainless Steel"));

    // A second pass finds nothing left to do
    cct(&tmp)
        .args(["extract", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 0"));
}

#[test]
fn test_categorize_reports_unmatched_parts() {
    let tmp = setup_catalog();
    let mut csv = String::new();
    csv.push_str("\"Primary Vendor\",\"Part Number\"\r\n");
    csv.push_str("ACOR,MYSTERY-001\r\n");
    fs::write(tmp.path().join("usage.csv"), csv).unwrap();
    cct(&tmp).args(["import", "usage.csv"]).assert().success();

    cct(&tmp)
        .args(["categorize", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 1"))
        .stdout(predicate::str::contains("\"categorized\": 0"))
        .stdout(predicate::str::contains("\"skipped\": 1"));
}

#[test]
fn test_check_reports_stainless_violation() {
    let tmp = setup_catalog();
    add_part(&tmp, "Rigs", "RIG-T-1", "Stainless Rigid Rig", "Stainless Steel");
    add_part(&tmp, "Axles", "AXL-T-1", "Steel Threaded Axle", "Steel");

    cct(&tmp)
        .args(["check", "RIG-T-1", "AXL-T-1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Stainless Steel rigs require Stainless Steel axles.",
        ));
}

#[test]
fn test_check_passes_with_matching_axle() {
    let tmp = setup_catalog();
    add_part(&tmp, "Rigs", "RIG-T-1", "Stainless Rigid Rig", "Stainless Steel");
    add_part(&tmp, "Axles", "AXL-T-2", "Stainless Zerk Axle", "Stainless Steel");

    cct(&tmp)
        .args(["check", "RIG-T-1", "AXL-T-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No compatibility issues"));
}

#[test]
fn test_check_unknown_part_fails() {
    let tmp = setup_catalog();

    cct(&tmp)
        .args(["check", "GHOST-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_bom_export_header_and_quantities() {
    let tmp = setup_catalog();
    add_part(&tmp, "Wheels", "WHL-B-1", "Soft Tread Wheel", "Rubber");
    add_part(&tmp, "Axles", "AXL-B-1", "Steel Axle", "Steel");

    cct(&tmp)
        .args(["bom", "WHL-B-1:2", "AXL-B-1", "-o", "bom.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 line(s)"));

    let exported = fs::read_to_string(tmp.path().join("bom.csv")).unwrap();
    let mut lines = exported.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"Part Number\",\"Name\",\"Category\",\"Material\",\"Type\",\"Size\",\"Quantity\""
    );
    let wheel_line = lines.next().unwrap();
    assert!(wheel_line.contains("\"WHL-B-1\""));
    assert!(wheel_line.contains("\"Wheels\""));
    assert!(wheel_line.ends_with("\"2\""));
}

#[test]
fn test_bom_to_stdout() {
    let tmp = setup_catalog();
    add_part(&tmp, "Wheels", "WHL-B-2", "Plain Wheel", "Nylon");

    cct(&tmp)
        .args(["bom", "WHL-B-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Part Number\""))
        .stdout(predicate::str::contains("\"WHL-B-2\""));
}

#[test]
fn test_part_list_filters_by_category() {
    let tmp = setup_catalog();
    add_part(&tmp, "Wheels", "WHL-L-1", "Listed Wheel", "Rubber");
    add_part(&tmp, "Axles", "AXL-L-1", "Listed Axle", "Steel");

    cct(&tmp)
        .args(["part", "list", "--category", "Wheels", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WHL-L-1"))
        .stdout(predicate::str::contains("AXL-L-1").not());

    cct(&tmp)
        .args(["part", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_status_dashboard() {
    let tmp = setup_catalog();
    add_part(&tmp, "Wheels", "WHL-S-1", "Status Wheel", "Rubber");

    cct(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog Status"))
        .stdout(predicate::str::contains("Total parts:"))
        .stdout(predicate::str::contains("Wheels"));
}

#[test]
fn test_part_show_unknown_fails() {
    let tmp = setup_catalog();

    cct(&tmp)
        .args(["part", "show", "NOPE-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
