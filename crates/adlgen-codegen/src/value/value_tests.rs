#![allow(non_snake_case)]

use super::*;
use crate::test_support::{config, fixture_resolver, local, prim, tp};
use serde_json::json;
use test_case::test_case;

fn render(te: &TypeExpr, val: Value) -> GenResult<String> {
    let r = fixture_resolver();
    let cfg = config();
    let mut f = GoFile::new(&r, &cfg, "test01");
    f.go_value(te, &val, "test")
}

#[test_case("Int32", json!(42), "42")]
#[test_case("Int64", json!(-7), "-7")]
#[test_case("Word8", json!(255), "255")]
#[test_case("Double", json!(1.5), "1.5")]
#[test_case("Bool", json!(true), "true")]
#[test_case("Void", json!(null), "struct{}{}")]
fn go_value___scalars___render_directly(p: &str, val: Value, expected: &str) {
    assert_eq!(render(&prim(p), val).unwrap(), expected);
}

#[test]
fn go_value___string___is_escaped() {
    let out = render(&prim("String"), json!("say \"hi\"\n")).unwrap();

    assert_eq!(out, r#""say \"hi\"\n""#);
}

#[test]
fn go_value___number_for_string___is_invalid() {
    let err = render(&prim("String"), json!(3)).unwrap_err();

    assert!(matches!(err, GenError::InvalidDefault { .. }));
}

#[test]
fn go_value___byte_vector___decodes_base64() {
    let out = render(&prim("ByteVector"), json!("AQL/")).unwrap();

    assert_eq!(out, "[]byte{0x01, 0x02, 0xff}");
}

#[test]
fn go_value___json___renders_any_literal_with_sorted_keys() {
    let out = render(&prim("Json"), json!({"b": [1, null], "a": "x"})).unwrap();

    assert_eq!(
        out,
        "map[string]any{\n\"a\": \"x\",\n\"b\": []any{\nfloat64(1),\nnil,\n},\n}"
    );
}

#[test]
fn go_value___empty_vector___is_empty_literal() {
    let out = render(&TypeExpr::vector(prim("String")), json!([])).unwrap();

    assert_eq!(out, "[]string{}");
}

#[test]
fn go_value___vector___renders_each_element() {
    let out = render(&TypeExpr::vector(prim("Int32")), json!([1, 2])).unwrap();

    assert_eq!(out, "[]int32{\n1,\n2,\n}");
}

#[test]
fn go_value___string_map___sorts_keys() {
    let out = render(&TypeExpr::string_map(prim("Bool")), json!({"z": true, "a": false})).unwrap();

    assert_eq!(out, "map[string]bool{\n\"a\": false,\n\"z\": true,\n}");
}

#[test]
fn go_value___nullable___is_nil_or_addr() {
    let te = TypeExpr::nullable(prim("Int32"));

    assert_eq!(render(&te, json!(null)).unwrap(), "nil");
    assert_eq!(render(&te, json!(5)).unwrap(), "goadl.Addr[int32](5)");
}

#[test]
fn go_value___nullable_inside_vector___instantiates_element_type() {
    let te = TypeExpr::vector(TypeExpr::nullable(prim("Double")));

    assert_eq!(
        render(&te, json!([1.5, null])).unwrap(),
        "[]*float64{\ngoadl.Addr[float64](1.5),\nnil,\n}"
    );
}

#[test]
fn go_value___type_token___is_invalid() {
    let err = render(&TypeExpr::type_token(prim("Int32")), json!(null)).unwrap_err();

    assert!(matches!(err, GenError::InvalidDefault { .. }));
}

#[test]
fn go_value___type_param___is_unbound() {
    let err = render(&tp("T"), json!(1)).unwrap_err();

    assert!(matches!(err, GenError::UnboundTypeParam { .. }));
}

#[test]
fn go_value___struct___uses_make_all_in_field_order() {
    let te = local("test01", "Pair", vec![prim("Int32"), prim("String")]);

    let out = render(&te, json!({"second": "s", "first": 1})).unwrap();

    assert_eq!(out, "MakeAll_Pair[int32, string](\n1,\n\"s\",\n)");
}

#[test]
fn go_value___struct_missing_field___takes_declared_default() {
    let te = local("test01", "B", vec![]);

    let out = render(&te, json!({"a": {"x": 1}, "kind": true})).unwrap();

    assert_eq!(
        out,
        "MakeAll_B(\n42,\n\"say \\\"hi\\\"\",\n[]string{},\nstruct{}{},\nMakeAll_A(\n1,\n),\ntrue,\n)"
    );
}

#[test]
fn go_value___struct_missing_required_field___is_invalid() {
    let te = local("test01", "A", vec![]);

    let err = render(&te, json!({})).unwrap_err();

    assert!(matches!(err, GenError::InvalidDefault { ref location, .. } if location == "test.x"));
}

#[test]
fn go_value___struct_from_array___is_invalid() {
    let err = render(&local("test01", "A", vec![]), json!([1])).unwrap_err();

    assert!(matches!(err, GenError::InvalidDefault { .. }));
}

#[test]
fn go_value___union_object___uses_branch_constructor() {
    let te = local("test01", "U", vec![prim("String")]);

    let out = render(&te, json!({"b": "x"})).unwrap();

    assert_eq!(out, "Make_U_b[string](\n\"x\",\n)");
}

#[test]
fn go_value___union_bare_name___is_void_branch() {
    let te = local("test01", "U", vec![prim("String")]);

    let out = render(&te, json!("c")).unwrap();

    assert_eq!(out, "Make_U_c[string](\nstruct{}{},\n)");
}

#[test]
fn go_value___union_unknown_branch___is_invalid() {
    let te = local("test01", "U", vec![prim("String")]);

    let err = render(&te, json!({"zz": 1})).unwrap_err();

    assert!(matches!(err, GenError::InvalidDefault { ref reason, .. } if reason.contains("zz")));
}

#[test]
fn go_value___union_with_two_keys___is_invalid() {
    let te = local("test01", "U", vec![prim("String")]);

    let err = render(&te, json!({"a": 1, "b": "x"})).unwrap_err();

    assert!(matches!(err, GenError::InvalidDefault { .. }));
}

#[test]
fn go_value___newtype___converts_inner_literal() {
    let out = render(&local("test01", "Id", vec![]), json!("abc")).unwrap();

    assert_eq!(out, "Id(\"abc\")");
}

#[test]
fn go_value___generic_alias___renders_right_hand_side() {
    let te = local("test01", "Listy", vec![prim("Int32")]);

    let out = render(&te, json!([3])).unwrap();

    assert_eq!(out, "[]int32{\n3,\n}");
}

#[test]
fn go_value___custom_type___constructs_through_helper() {
    let te = local("test01", "Dict", vec![prim("String"), prim("Int32")]);

    let out = render(&te, json!([])).unwrap();

    assert!(out.starts_with("customtypes.MapHelper{}.Construct([]adlast.TypeExpr{"));
    assert!(out.ends_with(", []any{}).(customtypes.MapMap[string, int32])"));
}

#[test]
fn go_value___cross_module_struct___is_qualified() {
    let r = fixture_resolver();
    let cfg = config();
    let mut f = GoFile::new(&r, &cfg, "test02");

    let out = f
        .go_value(&local("test01", "A", vec![]), &json!({"x": 9}), "test")
        .unwrap();

    assert_eq!(out, "test01.MakeAll_A(\n9,\n)");
}

#[test]
fn texpr_literal___nested___renders_constructor_calls() {
    let r = fixture_resolver();
    let cfg = config();
    let mut f = GoFile::new(&r, &cfg, "test01");

    let out = f.texpr_literal(&TypeExpr::vector(tp("T"))).unwrap();

    assert_eq!(
        out,
        "adlast.Make_TypeExpr(adlast.Make_TypeRef_primitive(\"Vector\"), []adlast.TypeExpr{\
         adlast.Make_TypeExpr(adlast.Make_TypeRef_typeParam(\"T\"), []adlast.TypeExpr{})})"
    );
}

#[test]
fn annotations_literal___empty___is_empty_map() {
    let r = fixture_resolver();
    let cfg = config();
    let mut f = GoFile::new(&r, &cfg, "test01");

    let out = f.annotations_literal(&Annotations::new()).unwrap();

    assert_eq!(out, "customtypes.MapMap[adlast.ScopedName, any]{}");
}

#[test]
fn any_literal___scalars___render_go_values() {
    assert_eq!(any_literal(&json!(null)), "nil");
    assert_eq!(any_literal(&json!(false)), "false");
    assert_eq!(any_literal(&json!(2)), "float64(2)");
    assert_eq!(any_literal(&json!("q")), "\"q\"");
}
