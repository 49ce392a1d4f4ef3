#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GenConfig___from_empty_json___uses_defaults() {
    let config = GenConfig::from_json(b"").unwrap();

    assert_eq!(config.runtime_import, "github.com/adl-lang/goadl_rt/v3");
    assert_eq!(config.descriptor_suffix, "ast");
    assert_eq!(config.extension, "go");
    assert!(!config.exclude_ast);
}

#[test]
fn GenConfig___partial_json___fills_missing_fields() {
    let json = br#"{"module_path": "example.com/app", "exclude_ast": true}"#;

    let config = GenConfig::from_json(json).unwrap();

    assert_eq!(config.module_path, "example.com/app");
    assert!(config.exclude_ast);
    assert_eq!(config.banner, "// Code generated by adlgen - DO NOT EDIT.");
}

#[test]
fn GenConfig___runtime_path___joins_subpackage() {
    let config = GenConfig::default();

    assert_eq!(
        config.runtime_path("sys/adlast"),
        "github.com/adl-lang/goadl_rt/v3/sys/adlast"
    );
}

#[test]
fn GenConfig___bundle_for___first_prefix_match_wins() {
    let config = GenConfig::new("example.com/app", "out")
        .with_bundle(BundleMap::new("common", "example.com/common/v1"))
        .with_bundle(BundleMap::new("common.http", "example.com/http"));

    let bundle = config.bundle_for("common.http.api").unwrap();

    assert_eq!(bundle.import_root, "example.com/common/v1");
    assert!(config.bundle_for("app.api").is_none());
}

#[test]
fn GenConfig___missing_module_path___fails_validation() {
    let config = GenConfig::default();

    let err = config.validate().unwrap_err();

    assert!(matches!(err, GenError::Config(_)));
}

#[test]
fn GenConfig___complete___validates() {
    let config = GenConfig::new("example.com/app", "out").with_mid_path("gen");

    assert!(config.validate().is_ok());
}

#[test_case("common|example.com/common", "common", "example.com/common", None)]
#[test_case("a.b|example.com/ab|v1.2.0", "a.b", "example.com/ab", Some("v1.2.0"))]
fn BundleMap___parse___splits_on_pipe(
    text: &str,
    prefix: &str,
    root: &str,
    version: Option<&str>,
) {
    let bm = BundleMap::parse(text).unwrap();

    assert_eq!(bm.module_prefix, prefix);
    assert_eq!(bm.import_root, root);
    assert_eq!(bm.version.as_deref(), version);
}

#[test_case("common" ; "missing root")]
#[test_case("|example.com/x" ; "empty prefix")]
#[test_case("a|b|c|d" ; "too many parts")]
fn BundleMap___parse_malformed___returns_config_error(text: &str) {
    let err = BundleMap::parse(text).unwrap_err();

    assert!(matches!(err, GenError::Config(_)));
}
