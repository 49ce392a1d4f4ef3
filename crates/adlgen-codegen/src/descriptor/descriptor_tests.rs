#![allow(non_snake_case)]

use super::*;
use crate::test_support::{config, fixture_resolver};
use adlgen_core::ScopedName;

fn descriptor(name: &str) -> String {
    let r = fixture_resolver();
    let cfg = config();
    let mut f = GoFile::new(&r, &cfg, "test01");
    let decl = r.resolve(&ScopedName::new("test01", name)).unwrap().clone();
    let mut out = String::new();
    f.gen_descriptor(&decl, &mut out).unwrap();
    out
}

#[test]
fn gen_descriptor___plain_struct___texpr_has_no_args() {
    let out = descriptor("A");

    assert!(out.contains("func Texpr_A() adlast.ATypeExpr[A] {\n"));
    assert!(out.contains(
        "\tte := adlast.Make_ATypeExpr[A](adlast.Make_TypeExpr(adlast.Make_TypeRef_reference(adlast.Make_ScopedName(\"test01\", \"A\")), []adlast.TypeExpr{}))\n"
    ));
}

#[test]
fn gen_descriptor___generic_struct___texpr_takes_one_arg_per_param() {
    let out = descriptor("Pair");

    assert!(out.contains(
        "func Texpr_Pair[A any, B any](a adlast.ATypeExpr[A], b adlast.ATypeExpr[B]) adlast.ATypeExpr[Pair[A, B]] {"
    ));
    assert!(out.contains("[]adlast.TypeExpr{a.Value, b.Value}))"));
}

#[test]
fn gen_descriptor___concrete_instantiation___field_texpr_is_parameter_free() {
    let out = descriptor("IntPair");

    assert!(out.contains(
        "adlast.Make_TypeExpr(adlast.Make_TypeRef_reference(adlast.Make_ScopedName(\"test01\", \"Pair\")), []adlast.TypeExpr{\
         adlast.Make_TypeExpr(adlast.Make_TypeRef_primitive(\"Int32\"), []adlast.TypeExpr{}), \
         adlast.Make_TypeExpr(adlast.Make_TypeRef_primitive(\"Int32\"), []adlast.TypeExpr{})})"
    ));
    assert!(!out.contains("Make_TypeRef_typeParam"));
    assert!(out.contains("func Texpr_IntPair() adlast.ATypeExpr[IntPair]"));
}

#[test]
fn gen_descriptor___struct_ast___lists_fields_with_serialized_names() {
    let out = descriptor("B");

    assert!(out.contains("func AST_B() adlast.ScopedDecl {"));
    assert!(out.contains("adlast.Make_Field(\n\"type\",\n\"kind\",\n"));
    assert!(out.contains("types.Make_Maybe_just[any](float64(42))"));
    assert!(out.contains("return adlast.Make_ScopedDecl(\"test01\", decl)"));
}

#[test]
fn gen_descriptor___union___uses_union_decl_type() {
    let out = descriptor("U");

    assert!(out.contains("adlast.Make_DeclType_union_(\nadlast.Make_Union(\n[]adlast.Ident{\"T\"},"));
}

#[test]
fn gen_descriptor___newtype___carries_maybe_default() {
    let out = descriptor("Id");

    assert!(out.contains("adlast.Make_DeclType_newtype_("));
    assert!(out.contains("types.Make_Maybe_nothing[any]()"));
}

#[test]
fn gen_descriptor___generic_typedef___skips_texpr_keeps_ast() {
    let out = descriptor("Listy");

    assert!(!out.contains("func Texpr_Listy"));
    assert!(out.contains("func AST_Listy() adlast.ScopedDecl"));
    assert!(out.contains("adlast.Make_DeclType_type_("));
}

#[test]
fn gen_descriptor___every_decl___registers_in_init() {
    let out = descriptor("A");

    assert!(out.contains(
        "func init() {\n\tgoadl.RESOLVER.Register(\n\t\tadlast.Make_ScopedName(\"test01\", \"A\"),\n\t\tAST_A(),\n\t)\n}"
    ));
    assert!(!out.contains("RegisterHelper"));
}

#[test]
fn gen_descriptor___custom_type___names_go_type_and_registers_helper() {
    let out = descriptor("Dict");

    assert!(out.contains(
        "func Texpr_Dict[K comparable, V any](k adlast.ATypeExpr[K], v adlast.ATypeExpr[V]) adlast.ATypeExpr[customtypes.MapMap[K, V]]"
    ));
    assert!(out.contains("\tgoadl.RESOLVER.RegisterHelper(\n\t\tadlast.Make_ScopedName(\"test01\", \"Dict\"),\n\t\t(*customtypes.MapHelper)(nil),\n\t)\n"));
}

#[test]
fn gen_descriptor___annotations___render_as_map_literal() {
    let out = descriptor("Dict");

    assert!(out.contains(
        "customtypes.MapMap[adlast.ScopedName, any]{\nadlast.Make_ScopedName(\"adlc.config.go_\", \"GoCustomType\"): map[string]any{"
    ));
}
