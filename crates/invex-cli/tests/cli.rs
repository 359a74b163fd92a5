use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const GREEK_INVOICE: &str = "ΑΛΦΑ ΤΕΧΝΙΚΗ ΑΕ
ΤΙΜΟΛΟΓΙΟ ΠΑΡΟΧΗΣ ΥΠΗΡΕΣΙΩΝ
Αριθμός: 000245
Ημερομηνία: 05/03/2024
Πελάτης: ΒΗΤΑ ΕΠΕ
Α.Φ.Μ.: 094019245
ΣΥΝΟΛΟ: 1.234,56 €
";

/// Config with both remote tiers off and the feedback store inside `dir`.
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    let config = json!({
        "extraction": { "enable_ai": false, "enable_document_ai": false },
        "feedback": { "path": dir.join("feedback.json"), "max_entries": 50 }
    });
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

fn invex(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("invex").unwrap();
    cmd.env_remove("OPENAI_API_KEY").arg("--config").arg(config);
    cmd
}

fn record(vat: &str, date: &str) -> Value {
    json!({
        "vatNumber": vat,
        "clientName": "ΒΗΤΑ ΕΠΕ",
        "supplier": "ΑΛΦΑ ΤΕΧΝΙΚΗ ΑΕ",
        "documentNumber": "000245",
        "date": date,
        "amount": 1.234,
        "currency": "€"
    })
}

#[test]
fn test_process_greek_text_invoice_as_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("invoice.txt");
    fs::write(&input, GREEK_INVOICE).unwrap();

    let output = invex(&config)
        .args(["process", "--no-ai"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let data: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["vatNumber"], "094019245");
    assert_eq!(data["documentNumber"], "000245");
    assert_eq!(data["date"], "2024-03-05");
    assert_eq!(data["currency"], "€");
}

#[test]
fn test_process_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("invoice.txt");
    let out = dir.path().join("out.csv");
    fs::write(&input, GREEK_INVOICE).unwrap();

    invex(&config)
        .args(["process", "-f", "csv", "-o"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("vatNumber,clientName,supplier,documentNumber,date,amount,currency"));
    assert!(csv.contains("094019245"));
}

#[test]
fn test_process_rejects_non_invoice() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("notes.txt");
    fs::write(&input, "Meeting notes for Tuesday").unwrap();

    invex(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not look like an invoice"));
}

#[test]
fn test_process_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    invex(&config)
        .args(["process", "no-such-invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("a.txt"), GREEK_INVOICE).unwrap();
    fs::write(inbox.join("b.txt"), GREEK_INVOICE).unwrap();

    let pattern = format!("{}/*.txt", inbox.display());
    invex(&config)
        .args(["batch", &pattern, "--summary", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"))
        .stdout(predicate::str::contains("1 served from cache"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.contains("a.txt,success,pattern,65,094019245"));
}

#[test]
fn test_config_path_and_init() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fresh.json");

    invex(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    invex(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    invex(&config)
        .args(["config", "set", "extraction.ai_confidence_threshold", "80"])
        .assert()
        .success();
    invex(&config)
        .args(["config", "get", "extraction.ai_confidence_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("80"));

    invex(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_feedback_record_and_stats() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let original = dir.path().join("original.json");
    let corrected = dir.path().join("corrected.json");
    fs::write(&original, record("Unknown", "2024-03-05").to_string()).unwrap();
    fs::write(&corrected, record("094019245", "2024-03-05").to_string()).unwrap();

    invex(&config)
        .args(["feedback", "record", "--rating", "3", "--method", "pattern", "--original"])
        .arg(&original)
        .arg("--corrected")
        .arg(&corrected)
        .assert()
        .success()
        .stdout(predicate::str::contains("corrected fields: vatNumber"));

    assert!(dir.path().join("feedback.json").exists());

    let output = invex(&config)
        .args(["feedback", "stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["pattern"]["totalRatings"], 1);
    assert_eq!(stats["pattern"]["averageRating"], 3.0);
    assert_eq!(stats["pattern"]["commonIssues"][0][0], "vatNumber");
}

#[test]
fn test_feedback_rejects_bad_rating() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let original = dir.path().join("original.json");
    fs::write(&original, record("094019245", "2024-03-05").to_string()).unwrap();

    invex(&config)
        .args(["feedback", "record", "--rating", "9", "--method", "gpt", "--original"])
        .arg(&original)
        .arg("--corrected")
        .arg(&original)
        .assert()
        .failure();
}
