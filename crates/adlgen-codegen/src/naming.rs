//! Naming convention utilities for Go code generation.
//!
//! Schema identifiers are mostly carried over unchanged. The conversions below
//! cover exported names, keyword collisions and package names derived from
//! import paths.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `word` | [`public`] | `Word` |
//! | `type` | [`go_escape`] | `type_` |
//! | `goMod` | [`param_name`] | `gomod` |
//! | `github.com/x/go-uuid` | [`pkg_from_import`] | `gouuid` |

/// Go's reserved words. Identifiers equal to one of these get a trailing `_`.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Upper-case the first letter so the identifier is exported.
///
/// # Examples
///
/// ```
/// use adlgen_codegen::naming::public;
///
/// assert_eq!(public("name"), "Name");
/// assert_eq!(public("goMod"), "GoMod");
/// assert_eq!(public(""), "");
/// ```
pub fn public(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Append `_` to identifiers that collide with a Go keyword.
///
/// # Examples
///
/// ```
/// use adlgen_codegen::naming::go_escape;
///
/// assert_eq!(go_escape("type"), "type_");
/// assert_eq!(go_escape("kind"), "kind");
/// ```
pub fn go_escape(name: &str) -> String {
    if GO_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Lower-cased, keyword-escaped form used for function parameters.
pub fn param_name(field: &str) -> String {
    go_escape(&field.to_lowercase())
}

/// Derive a package name from the last segment of an import path.
///
/// Characters that cannot appear in an identifier are dropped. A `pkg` prefix
/// is added when nothing is left or the result does not start with a
/// lower-case letter or underscore.
///
/// # Examples
///
/// ```
/// use adlgen_codegen::naming::pkg_from_import;
///
/// assert_eq!(pkg_from_import("github.com/adl-lang/goadl_rt/v3/sys/adlast"), "adlast");
/// assert_eq!(pkg_from_import("example.com/app/test01"), "test01");
/// assert_eq!(pkg_from_import("github.com/x/go-uuid"), "gouuid");
/// assert_eq!(pkg_from_import("example.com/Types"), "pkgTypes");
/// ```
pub fn pkg_from_import(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    let ident: String = last
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    match ident.chars().next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => ident,
        _ => format!("pkg{ident}"),
    }
}

/// The Go package name of a schema module: its last dotted segment.
pub fn module_package(module: &str) -> &str {
    module.rsplit('.').next().unwrap_or(module)
}

/// Directory segments a module is generated into (`a.b.c` -> `a/b/c`).
pub fn module_dir(module: &str) -> String {
    module.replace('.', "/")
}
