use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn vobo() -> Command {
    let mut cmd: Command = cargo_bin_cmd!("vobo").into();
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Minimal DOCX package: a zip holding only word/document.xml. The
/// structured reader refuses it and the zip/XML fallback reads it, which
/// exercises the full fallback chain end to end.
fn write_docx(path: &Path, xml_body: &str) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    write!(
        writer,
        "<w:document><w:body>{}</w:body></w:document>",
        xml_body
    )
    .unwrap();
    writer.finish().unwrap();
}

/// A filled-in request document with every field the parser knows.
fn request_docx(dir: &Path) -> PathBuf {
    let path = dir.join("solicitud.docx");
    write_docx(
        &path,
        "<w:p><w:r><w:t>En Santiago, a 12 de agosto de 2025</w:t></w:r></w:p>\
         <w:p><w:r><w:t>NOMBRE: Juana Pérez</w:t></w:r></w:p>\
         <w:p><w:r><w:t>REQUIRENTE (UNIDAD): Unidad de Compras</w:t></w:r></w:p>\
         <w:p><w:r><w:t>OBJETIVO: Adquisición de insumos</w:t></w:r></w:p>\
         <w:p><w:r><w:t>MONTO ESTIMADO: $ 1.250.000</w:t></w:r></w:p>",
    );
    path
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd = vobo();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("vobo"));
}

// --- Process ---

#[test]
fn process_missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    vobo()
        .args(["process", "no_such.docx"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn process_docx_extracts_fields() {
    let tmp = TempDir::new().unwrap();
    let input = request_docx(tmp.path());

    vobo()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Juana Pérez")
                .and(predicate::str::contains("12 de agosto de 2025"))
                .and(predicate::str::contains("Unidad de Compras"))
                .and(predicate::str::contains("Monto Estimado: 1250000")),
        );
}

#[test]
fn process_json_output() {
    let tmp = TempDir::new().unwrap();
    let input = request_docx(tmp.path());

    vobo()
        .args(["process", input.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"estimated_amount\":1250000")
                .and(predicate::str::contains("\"blank\":false"))
                .and(predicate::str::contains("Juana Pérez")),
        );
}

#[test]
fn process_unsupported_extension_reports_it() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("notas.txt");
    fs::write(&input, "solo texto plano").unwrap();

    vobo()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("unsupported extension"))
        .stderr(predicate::str::contains("no text could be extracted"));
}

// --- Register ---

#[test]
fn process_save_appends_to_register() {
    let tmp = TempDir::new().unwrap();
    let input = request_docx(tmp.path());
    let register = tmp.path().join("registro.csv");

    vobo()
        .args([
            "process",
            input.to_str().unwrap(),
            "--save",
            "--received",
            "05/08/2025",
            "--signoff-date",
            "12/08/2025",
            "--register",
            register.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to register (1 rows)"));

    let raw = fs::read_to_string(&register).unwrap();
    assert!(raw.starts_with("Fecha Documento,Solicitante (Nombre),"));
    assert!(raw.contains("Juana Pérez"));
    assert!(raw.contains("05/08/2025"));
    assert!(raw.contains("Firmado"));
}

#[test]
fn register_show_lists_saved_rows() {
    let tmp = TempDir::new().unwrap();
    let input = request_docx(tmp.path());
    let register = tmp.path().join("registro.csv");

    vobo()
        .args([
            "process",
            input.to_str().unwrap(),
            "--save",
            "--register",
            register.to_str().unwrap(),
        ])
        .assert()
        .success();

    vobo()
        .args(["register", "--register", register.to_str().unwrap(), "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Juana Pérez")
                .and(predicate::str::contains("Pendiente"))
                .and(predicate::str::contains("1 rows")),
        );
}

#[test]
fn register_show_handles_missing_file() {
    let tmp = TempDir::new().unwrap();
    let register = tmp.path().join("no_existe.csv");

    vobo()
        .args(["register", "--register", register.to_str().unwrap(), "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("register is empty"));
}

#[test]
fn register_export_writes_csv() {
    let tmp = TempDir::new().unwrap();
    let input = request_docx(tmp.path());
    let register = tmp.path().join("registro.csv");

    vobo()
        .args([
            "process",
            input.to_str().unwrap(),
            "--save",
            "--register",
            register.to_str().unwrap(),
        ])
        .assert()
        .success();

    vobo()
        .args([
            "register",
            "--register",
            register.to_str().unwrap(),
            "export",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Fecha Documento,")
                .and(predicate::str::contains("solicitud.docx")),
        );
}

// --- Batch ---

#[test]
fn batch_processes_glob_with_summary() {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    request_docx(&docs);
    let out = tmp.path().join("out");

    let pattern = format!("{}/*.docx", docs.display());
    vobo()
        .args([
            "batch",
            &pattern,
            "--output-dir",
            out.to_str().unwrap(),
            "--format",
            "json",
            "--summary",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("solicitud.docx")
                .and(predicate::str::contains("1 successful, 0 failed")),
        );

    assert!(out.join("solicitud.json").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("solicitud.docx,ok"));
}

#[test]
fn batch_fails_without_matches() {
    let tmp = TempDir::new().unwrap();
    let pattern = format!("{}/*.docx", tmp.path().display());

    vobo()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no matching files"));
}

// --- Doctor / Config ---

#[test]
fn doctor_reports_tools() {
    vobo().arg("doctor").assert().success().stdout(
        predicate::str::contains("pdftoppm").and(predicate::str::contains("tesseract")),
    );
}

#[test]
fn config_path_prints_location() {
    vobo()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
