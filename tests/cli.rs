#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cloneform_cmd() -> Command {
    Command::new(cargo_bin("cloneform"))
}

const CONFIG: &str = r#"{
    "model": { "formName": "Contact", "values": { "name": "Ada" } },
    "attributes": {
        "name": {},
        "email": { "type": "input", "inputType": "email" },
        "sep": { "type": "raw", "value": "<hr>" }
    },
    "columns": 2,
    "rowName": "contact-row",
    "rowGroupName": "contacts"
}"#;

#[test]
fn render_writes_fieldset_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fieldset.json");
    let out = temp.path().join("fieldset.html");
    fs::write(&config, CONFIG).unwrap();

    cloneform_cmd()
        .args(["render", "--config", config.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<fieldset id=\"clonnable-field-widget-w0\""));
    assert!(html.contains("<input type=\"email\""));
    assert!(html.contains("\t\t<hr>\n"));
}

#[test]
fn render_page_links_clone_assets() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fieldset.json");
    fs::write(&config, CONFIG).unwrap();

    cloneform_cmd()
        .args(["render", "--page", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!doctype html>"))
        .stdout(predicate::str::contains("<script src=\"cloneform.js\"></script>"));
}

#[test]
fn form_id_ties_controls_to_the_form() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fieldset.json");
    fs::write(&config, CONFIG).unwrap();

    cloneform_cmd()
        .args([
            "render",
            "--page",
            "--form-id",
            "contact-form",
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<form id=\"contact-form\">"))
        .stdout(predicate::str::contains(
            "data-groupname=\"contacts\" form=\"contact-form\"",
        ))
        .stdout(predicate::str::contains("form=\"w0\"").not());
}

#[test]
fn render_without_model_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fieldset.json");
    fs::write(&config, r#"{ "attributes": { "a": {} } }"#).unwrap();

    cloneform_cmd()
        .args(["render", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the 'model' property must be set"));
}

#[test]
fn layout_lists_cells_in_order() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fieldset.json");
    fs::write(&config, CONFIG).unwrap();

    cloneform_cmd()
        .args(["layout", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0\t0\t0\t6\tname\n0\t1\t1\t6\temail\n1\t0\t2\t6\tsep\n",
        ));
}
