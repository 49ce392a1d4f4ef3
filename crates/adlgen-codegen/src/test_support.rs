//! Shared fixtures for unit tests

use adlgen_core::annotations::custom_type_name;
use adlgen_core::{Decl, Field, GenConfig, Module, Resolver, ScopedName, TypeExpr};
use serde_json::json;

pub(crate) const HTTP: &str = "common.http";

pub(crate) fn config() -> GenConfig {
    GenConfig::new("example.com/proj", "out")
}

pub(crate) fn prim(name: &str) -> TypeExpr {
    TypeExpr::primitive(name)
}

pub(crate) fn tp(name: &str) -> TypeExpr {
    TypeExpr::type_param(name)
}

pub(crate) fn local(module: &str, name: &str, params: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::reference(ScopedName::new(module, name), params)
}

pub(crate) fn post(req: TypeExpr, resp: TypeExpr) -> TypeExpr {
    local(HTTP, "HttpPost", vec![req, resp])
}

pub(crate) fn get(resp: TypeExpr) -> TypeExpr {
    local(HTTP, "HttpGet", vec![resp])
}

pub(crate) fn cap(module: &str, name: &str) -> TypeExpr {
    local(
        HTTP,
        "CapabilityApi",
        vec![prim("String"), prim("Int64"), local(module, name, vec![])],
    )
}

fn dict_annotation() -> serde_json::Value {
    json!({
        "gotype": {
            "import_path": "github.com/adl-lang/goadl_rt/v3/customtypes",
            "pkg": "customtypes",
            "name": "MapMap",
            "type_constraints": ["comparable"]
        },
        "helpers": {
            "import_path": "github.com/adl-lang/goadl_rt/v3/customtypes",
            "pkg": "customtypes",
            "name": "MapHelper"
        }
    })
}

pub(crate) fn test01() -> Module {
    let t1 = |n: &str| local("test01", n, vec![]);
    Module::new("test01")
        .with_decl(Decl::new_struct("A", &[], vec![Field::new("x", prim("Int32"))]))
        .with_decl(Decl::new_struct(
            "Pair",
            &["A", "B"],
            vec![Field::new("first", tp("A")), Field::new("second", tp("B"))],
        ))
        .with_decl(Decl::new_struct(
            "IntPair",
            &[],
            vec![Field::new(
                "p",
                local("test01", "Pair", vec![prim("Int32"), prim("Int32")]),
            )],
        ))
        .with_decl(Decl::new_typedef("Listy", &["T"], TypeExpr::vector(tp("T"))))
        .with_decl(Decl::new_typedef("Str", &[], prim("String")))
        .with_decl(
            Decl::new_struct(
                "Dict",
                &["K", "V"],
                vec![Field::new(
                    "entries",
                    TypeExpr::vector(local("test01", "Pair", vec![tp("K"), tp("V")])),
                )],
            )
            .with_annotation(custom_type_name(), dict_annotation()),
        )
        .with_decl(Decl::new_union(
            "U",
            &["T"],
            vec![
                Field::new("a", prim("Int32")),
                Field::new("b", tp("T")),
                Field::new("c", prim("Void")),
            ],
        ))
        .with_decl(Decl::new_newtype("Id", &[], prim("String")))
        .with_decl(Decl::new_struct(
            "B",
            &[],
            vec![
                Field::new("count", prim("Int32")).with_default(json!(42)),
                Field::new("name", prim("String")).with_default(json!("say \"hi\"")),
                Field::new("tags", TypeExpr::vector(prim("String"))).with_default(json!([])),
                Field::new("unit", prim("Void")),
                Field::new("a", t1("A")),
                Field::new("type", prim("Bool")).with_serialized_name("kind"),
            ],
        ))
        .with_decl(Decl::new_struct(
            "Box",
            &["T"],
            vec![Field::new("tok", TypeExpr::type_token(tp("T")))],
        ))
        .with_decl(Decl::new_struct(
            "Holder",
            &[],
            vec![Field::new("b", local("test01", "Box", vec![prim("Int32")]))],
        ))
        .with_decl(Decl::new_struct(
            "GenHolder",
            &["X"],
            vec![Field::new("b", local("test01", "Box", vec![tp("X")]))],
        ))
}

pub(crate) fn test02() -> Module {
    Module::new("test02").with_decl(Decl::new_struct(
        "C",
        &[],
        vec![Field::new("a", local("test01", "A", vec![]))],
    ))
}

/// The capability marker declarations.
pub(crate) fn http() -> Module {
    Module::new(HTTP)
        .with_decl(Decl::new_struct(
            "HttpPost",
            &["I", "O"],
            vec![
                Field::new("path", prim("String")),
                Field::new("reqType", TypeExpr::type_token(tp("I"))),
                Field::new("respType", TypeExpr::type_token(tp("O"))),
            ],
        ))
        .with_decl(Decl::new_struct(
            "HttpGet",
            &["O"],
            vec![
                Field::new("path", prim("String")),
                Field::new("respType", TypeExpr::type_token(tp("O"))),
            ],
        ))
        .with_decl(Decl::new_struct(
            "CapabilityApi",
            &["C", "S", "V"],
            vec![
                Field::new("token", TypeExpr::type_token(tp("C"))),
                Field::new("service", tp("V")),
            ],
        ))
}

/// `api.Root` -> `user: api.User` -> `admin: api.Admin`.
pub(crate) fn api() -> Module {
    Module::new("api")
        .with_decl(Decl::new_struct(
            "Root",
            &[],
            vec![
                Field::new("ping", get(prim("String"))),
                Field::new("login", post(prim("String"), prim("String"))),
                Field::new("user", cap("api", "User")),
            ],
        ))
        .with_decl(Decl::new_struct(
            "User",
            &[],
            vec![
                Field::new("profile", get(prim("String"))),
                Field::new("admin", cap("api", "Admin")),
            ],
        ))
        .with_decl(Decl::new_struct(
            "Admin",
            &[],
            vec![Field::new("purge", post(prim("String"), prim("Void")))],
        ))
}

pub(crate) fn fixture_resolver() -> Resolver {
    Resolver::from_modules([test01(), test02(), http(), api()])
}
