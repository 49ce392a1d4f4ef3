//! Declarations provided by the Go runtime rather than by input modules
//!
//! The runtime ships generated code for `sys.types` and the Go configuration
//! annotations, so they resolve without being part of the input set.

use crate::annotations::GO_CONFIG_MODULE;
use crate::model::{Decl, Field, Module, ScopedName, TypeExpr};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

pub const SYS_TYPES: &str = "sys.types";

fn tp(name: &str) -> TypeExpr {
    TypeExpr::type_param(name)
}

fn prim(name: &str) -> TypeExpr {
    TypeExpr::primitive(name)
}

fn sys(name: &str, params: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::reference(ScopedName::new(SYS_TYPES, name), params)
}

fn go_config(name: &str) -> TypeExpr {
    TypeExpr::reference(ScopedName::new(GO_CONFIG_MODULE, name), vec![])
}

fn sys_types() -> Module {
    Module::new(SYS_TYPES)
        .with_decl(Decl::new_struct(
            "Pair",
            &["T1", "T2"],
            vec![Field::new("v1", tp("T1")), Field::new("v2", tp("T2"))],
        ))
        .with_decl(Decl::new_union(
            "Either",
            &["T1", "T2"],
            vec![Field::new("left", tp("T1")), Field::new("right", tp("T2"))],
        ))
        .with_decl(Decl::new_union(
            "Maybe",
            &["T"],
            vec![Field::new("nothing", prim("Void")), Field::new("just", tp("T"))],
        ))
        .with_decl(Decl::new_union(
            "Result",
            &["T", "E"],
            vec![Field::new("ok", tp("T")), Field::new("error", tp("E"))],
        ))
        .with_decl(Decl::new_struct(
            "MapEntry",
            &["K", "V"],
            vec![
                Field::new("key", tp("K")).with_serialized_name("k"),
                Field::new("value", tp("V")).with_serialized_name("v"),
            ],
        ))
        .with_decl(Decl::new_newtype(
            "Map",
            &["K", "V"],
            TypeExpr::vector(sys("Pair", vec![tp("K"), tp("V")])),
        ))
        .with_decl(Decl::new_newtype("Set", &["T"], TypeExpr::vector(tp("T"))))
}

fn go_config_module() -> Module {
    let string = || prim("String");
    Module::new(GO_CONFIG_MODULE)
        .with_decl(Decl::new_struct(
            "GoCustomType",
            &[],
            vec![
                Field::new("gotype", go_config("GoType")),
                Field::new("helpers", go_config("GoHelpers")),
            ],
        ))
        .with_decl(Decl::new_struct(
            "GoType",
            &[],
            vec![
                Field::new("import_path", string()),
                Field::new("pkg", string()),
                Field::new("name", string()),
                Field::new("type_constraints", TypeExpr::vector(string()))
                    .with_default(serde_json::json!([])),
            ],
        ))
        .with_decl(Decl::new_struct(
            "GoHelpers",
            &[],
            vec![
                Field::new("import_path", string()),
                Field::new("pkg", string()),
                Field::new("name", string()),
            ],
        ))
        .with_decl(Decl::new_typedef(
            "TypeParamConstraintList",
            &[],
            TypeExpr::vector(string()),
        ))
}

pub(crate) static BUILTIN_MODULES: Lazy<BTreeMap<String, Module>> = Lazy::new(|| {
    [sys_types(), go_config_module()]
        .into_iter()
        .map(|m| (m.name.clone(), m))
        .collect()
});

/// True when the module is supplied by the runtime.
pub fn is_builtin_module(name: &str) -> bool {
    BUILTIN_MODULES.contains_key(name)
}
