use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BBVA_RECEIPT: &str = "BBVA México
Importe transferido: $67.28
Fecha de operación: 18 agosto 2025
Cuenta de retiro: -3773
Beneficiario: Osvaldo Fabian Ramiro Balboa
Clave de rastreo: MBAN010025081800655903904
";

const PARTIAL_RECEIPT: &str = "Pago
Monto: 500.50
";

fn write_config(dir: &Path, json: &str) -> String {
    let path = dir.join("config.json");
    fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

fn recibo(config: &str) -> Command {
    let mut cmd = Command::cargo_bin("recibo").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn extract_json_from_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let input = dir.path().join("bbva.txt");
    fs::write(&input, BBVA_RECEIPT).unwrap();

    recibo(&config)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""bank":"BBVA""#))
        .stdout(predicate::str::contains(r#""amount":"67.28""#))
        .stdout(predicate::str::contains(r#""date":"2025-08-18T00:00:00""#));
}

#[test]
fn extract_csv_from_stdin() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    recibo(&config)
        .args(["extract", "-", "--format", "csv"])
        .write_stdin(PARTIAL_RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "bank,amount,reference,date,account,beneficiary",
        ))
        .stdout(predicate::str::contains(",500.50,,,,"));
}

#[test]
fn extract_unstructured_text_gives_empty_object() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    recibo(&config)
        .args(["extract", "-", "--review"])
        .write_stdin("TEXTO SIN DATOS RELEVANTES")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{}"))
        .stderr(predicate::str::contains("needs-review"));
}

#[test]
fn extract_rejects_oversized_input() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), r#"{"extraction": {"max_input_chars": 10}}"#);

    recibo(&config)
        .args(["extract", "-"])
        .write_stdin(BBVA_RECEIPT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_input_chars"));
}

#[test]
fn extract_uses_custom_bank_from_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"{"extraction": {"custom_banks": [{"code": "INBURSA", "keywords": ["inbursa"]}]}}"#,
    );

    recibo(&config)
        .args(["extract", "-"])
        .write_stdin("Inbursa\nImporte: $20.00")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""bank":"INBURSA""#));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    recibo(&config)
        .env_remove("RUST_LOG")
        .args(["-v", "extract", "-"])
        .write_stdin("Monto: 10.00")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"amount":"10.00"}"#))
        .stderr(predicate::str::contains("Extracted 1/6 fields from 12 characters"));
}

#[test]
fn rust_log_overrides_verbosity() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    recibo(&config)
        .env("RUST_LOG", "debug")
        .args(["extract", "-"])
        .write_stdin("BBVA\nImporte: $67.28")
        .assert()
        .success()
        .stderr(predicate::str::contains("Detected bank"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), BBVA_RECEIPT).unwrap();
    fs::write(input_dir.join("b.txt"), PARTIAL_RECEIPT).unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    recibo(&config)
        .args(["batch", &pattern, "--summary", "-j", "2", "--output-dir"])
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files"));

    assert!(output_dir.join("a.json").exists());
    assert!(output_dir.join("b.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a.txt,auto-accept,BBVA,67.28,"));
    assert!(lines[2].starts_with("b.txt,needs-review,,500.50,"));
}

#[test]
fn banks_lists_detection_order() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    recibo(&config)
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("BBVA"))
        .stdout(predicate::str::contains("NU"))
        .stdout(predicate::str::contains("GENERIC"));
}

#[test]
fn config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");
    let config = config.to_string_lossy().into_owned();

    recibo(&config)
        .args(["config", "set", "review.min_fields", "5"])
        .assert()
        .success();

    recibo(&config)
        .args(["config", "get", "review.min_fields"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));

    recibo(&config)
        .args(["config", "set", "review.min_fields", "9"])
        .assert()
        .failure();
}
