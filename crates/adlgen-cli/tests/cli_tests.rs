//! Integration tests for the adlgen binary.

#![allow(non_snake_case)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const AST: &str = r#"{
  "app.model": {
    "name": "app.model",
    "decls": {
      "Point": {
        "name": "Point",
        "type_": {"struct_": {"fields": [
          {"name": "x", "serializedName": "x", "typeExpr": {"typeRef": {"primitive": "Int32"}},
           "default": {"just": 0}},
          {"name": "y", "serializedName": "y", "typeExpr": {"typeRef": {"primitive": "Int32"}}}
        ]}}
      }
    }
  }
}"#;

fn adlgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_adlgen"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn write_ast(dir: &TempDir, json: &str) {
    fs::write(dir.path().join("ast.json"), json).unwrap();
}

#[test]
fn generate___go_mod_project___writes_module_files() {
    let dir = TempDir::new().unwrap();
    write_ast(&dir, AST);
    fs::write(dir.path().join("go.mod"), "module example.com/proj\n").unwrap();
    fs::create_dir_all(dir.path().join("gen")).unwrap();

    let out = adlgen(dir.path(), &["generate", "-I", "ast.json", "-O", "gen"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let body = fs::read_to_string(dir.path().join("gen/app/model/model.go")).unwrap();
    assert!(body.contains("package model"));
    assert!(body.contains("func Make_Point(\n\ty int32,\n) Point {"));
    assert!(dir.path().join("gen/app/model/model_ast.go").exists());
}

#[test]
fn generate___exclude_ast___no_descriptor_file() {
    let dir = TempDir::new().unwrap();
    write_ast(&dir, AST);

    let out = adlgen(
        dir.path(),
        &["generate", "-I", "ast.json", "-O", "gen", "--module-path", "example.com/p", "--exclude-ast"],
    );

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("gen/app/model/model.go").exists());
    assert!(!dir.path().join("gen/app/model/model_ast.go").exists());
}

#[test]
fn generate___project_file___supplies_module_path_and_output() {
    let dir = TempDir::new().unwrap();
    write_ast(&dir, AST);
    fs::write(
        dir.path().join("adlgen.toml"),
        "[project]\nmodule_path = \"example.com/p\"\n\n[output]\ndir = \"out\"\n",
    )
    .unwrap();

    let out = adlgen(dir.path(), &["generate", "-I", "ast.json"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("out/app/model/model.go").exists());
}

#[test]
fn generate___missing_input___fails() {
    let dir = TempDir::new().unwrap();

    let out = adlgen(
        dir.path(),
        &["generate", "-I", "missing.json", "--module-path", "example.com/p"],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing.json"));
}

#[test]
fn generate___unresolved_reference___resolution_exit_code() {
    let dir = TempDir::new().unwrap();
    write_ast(
        &dir,
        r#"{"m": {"name": "m", "decls": {"S": {"name": "S", "type_": {"struct_": {"fields": [
            {"name": "a", "serializedName": "a",
             "typeExpr": {"typeRef": {"reference": {"moduleName": "m", "name": "Missing"}}}}
        ]}}}}}}"#,
    );

    let out = adlgen(dir.path(), &["generate", "-I", "ast.json", "--module-path", "example.com/p"]);

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unresolved reference: m.Missing"));
}

#[test]
fn api___self_nesting_root___capability_exit_code() {
    let dir = TempDir::new().unwrap();
    write_ast(
        &dir,
        r#"{
          "common.http": {"name": "common.http", "decls": {"CapabilityApi": {"name": "CapabilityApi",
            "type_": {"struct_": {"typeParams": ["C", "S", "V"], "fields": [
              {"name": "service", "serializedName": "service", "typeExpr": {"typeRef": {"typeParam": "V"}}}
            ]}}}}},
          "app": {"name": "app", "decls": {"Root": {"name": "Root", "type_": {"struct_": {"fields": [
            {"name": "me", "serializedName": "me", "typeExpr": {
              "typeRef": {"reference": {"moduleName": "common.http", "name": "CapabilityApi"}},
              "parameters": [
                {"typeRef": {"primitive": "String"}},
                {"typeRef": {"primitive": "Int64"}},
                {"typeRef": {"reference": {"moduleName": "app", "name": "Root"}}}
              ]}}
          ]}}}}}
        }"#,
    );

    let out = adlgen(
        dir.path(),
        &["api", "-I", "ast.json", "-O", "gen", "--module-path", "example.com/p", "app.Root"],
    );

    assert_eq!(out.status.code(), Some(4));
    assert!(!dir.path().join("gen").exists());
}

#[test]
fn api___two_roots_in_one_module___config_exit_code_and_nothing_written() {
    let dir = TempDir::new().unwrap();
    write_ast(
        &dir,
        r#"{
          "app": {"name": "app", "decls": {
            "Root": {"name": "Root", "type_": {"struct_": {"fields": []}}},
            "Other": {"name": "Other", "type_": {"struct_": {"fields": []}}}
          }}
        }"#,
    );

    let out = adlgen(
        dir.path(),
        &["api", "-I", "ast.json", "-O", "gen", "--module-path", "example.com/p", "app.Root", "app.Other"],
    );

    assert_eq!(out.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&out.stderr).contains("one root per module"));
    assert!(!dir.path().join("gen").exists());
}

#[test]
fn check___valid_project_file___succeeds() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("adlgen.toml"), "[project]\nmodule_path = \"example.com/p\"\n").unwrap();

    let out = adlgen(dir.path(), &["check"]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Project file is valid!"));
}

#[test]
fn check___invalid_project_file___fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("adlgen.toml"), "[output]\nextension = \".go\"\n").unwrap();

    let out = adlgen(dir.path(), &["check"]);

    assert_eq!(out.status.code(), Some(1));
}
