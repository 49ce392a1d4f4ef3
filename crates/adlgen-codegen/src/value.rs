//! Default-value literal synthesis
//!
//! Field defaults arrive as decoded JSON. [`GoFile::go_value`] renders one as
//! Go construction syntax for the field's type, following the same rules the
//! runtime decoder applies to wire data: struct fields missing from the value
//! take the declaration's own default, unions are a bare branch name or a
//! single-key object, newtypes decode as their underlying type.

use crate::gofile::GoFile;
use crate::imports::ImportSpec;
use adlgen_core::annotations::custom_type;
use adlgen_core::{
    Annotations, DeclType, GenError, GenResult, GoCustomType, Primitive, Struct, TypeBindings,
    TypeExpr, TypeRef, Union,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

static NULL: Value = Value::Null;

fn invalid(location: &str, reason: impl Into<String>) -> GenError {
    GenError::InvalidDefault {
        location: location.to_string(),
        reason: reason.into(),
    }
}

/// `f()` or a call with one argument per line.
pub(crate) fn call(func: &str, args: &[String]) -> String {
    if args.is_empty() {
        format!("{func}()")
    } else {
        format!("{func}(\n{},\n)", args.join(",\n"))
    }
}

/// `T{}` or a composite literal with one element per line.
fn composite(ty: &str, elems: &[String]) -> String {
    if elems.is_empty() {
        format!("{ty}{{}}")
    } else {
        format!("{ty}{{\n{},\n}}", elems.join(",\n"))
    }
}

/// A Go string literal. JSON string escaping is valid Go escaping.
pub(crate) fn string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

/// Render arbitrary JSON as a Go `any` literal.
///
/// Numbers are `float64`, matching what `encoding/json` produces for `any`.
pub fn any_literal(val: &Value) -> String {
    match val {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format!("float64({n})"),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let elems: Vec<String> = items.iter().map(any_literal).collect();
            composite("[]any", &elems)
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let elems: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}: {}", string_literal(k), any_literal(&map[k])))
                .collect();
            composite("map[string]any", &elems)
        }
    }
}

impl GoFile<'_> {
    /// Render `val` as a Go expression of type `te`.
    ///
    /// `location` names the value in diagnostics, e.g. `test01.B::count`.
    pub fn go_value(&mut self, te: &TypeExpr, val: &Value, location: &str) -> GenResult<String> {
        match &te.type_ref {
            TypeRef::Primitive(name) => self.primitive_value(name, te, val, location),
            TypeRef::TypeParam(name) => Err(GenError::UnboundTypeParam {
                name: name.clone(),
                context: location.to_string(),
            }),
            TypeRef::Reference(_) => self.reference_value(te, val, location),
        }
    }

    fn primitive_value(
        &mut self,
        name: &str,
        te: &TypeExpr,
        val: &Value,
        location: &str,
    ) -> GenResult<String> {
        let p = Primitive::from_name(name).ok_or_else(|| GenError::UnknownPrimitive(name.to_string()))?;
        if te.parameters.len() != p.arity() {
            return Err(GenError::ArityMismatch {
                decl: name.to_string(),
                expected: p.arity(),
                actual: te.parameters.len(),
            });
        }
        match p {
            _ if p.is_numeric() => match val {
                Value::Number(n) => Ok(n.to_string()),
                other => Err(invalid(location, format!("expected a number, got {other}"))),
            },
            Primitive::Bool => match val {
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(invalid(location, format!("expected a bool, got {other}"))),
            },
            Primitive::String => match val {
                Value::String(s) => Ok(string_literal(s)),
                other => Err(invalid(location, format!("expected a string, got {other}"))),
            },
            Primitive::ByteVector => {
                let Value::String(s) = val else {
                    return Err(invalid(location, "expected a base64 string"));
                };
                let bytes = STANDARD
                    .decode(s)
                    .map_err(|e| invalid(location, format!("bad base64: {e}")))?;
                let elems: Vec<String> = bytes.iter().map(|b| format!("0x{b:02x}")).collect();
                Ok(format!("[]byte{{{}}}", elems.join(", ")))
            }
            Primitive::Void => Ok("struct{}{}".to_string()),
            Primitive::Json => Ok(any_literal(val)),
            Primitive::Vector => {
                let Value::Array(items) = val else {
                    return Err(invalid(location, "expected an array"));
                };
                let elem = &te.parameters[0];
                let ty = format!("[]{}", self.go_type(elem)?);
                let elems = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| self.go_value(elem, v, &format!("{location}[{i}]")))
                    .collect::<GenResult<Vec<_>>>()?;
                Ok(composite(&ty, &elems))
            }
            Primitive::StringMap => {
                let Value::Object(map) = val else {
                    return Err(invalid(location, "expected an object"));
                };
                let elem = &te.parameters[0];
                let ty = format!("map[string]{}", self.go_type(elem)?);
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let elems = keys
                    .into_iter()
                    .map(|k| {
                        let v = self.go_value(elem, &map[k], &format!("{location}.{k}"))?;
                        Ok(format!("{}: {v}", string_literal(k)))
                    })
                    .collect::<GenResult<Vec<_>>>()?;
                Ok(composite(&ty, &elems))
            }
            Primitive::Nullable => {
                if val.is_null() {
                    return Ok("nil".to_string());
                }
                let elem = &te.parameters[0];
                let inner = self.go_value(elem, val, location)?;
                let ty = self.go_type(elem)?;
                let goadl = self.pkg("goadl")?;
                // Explicit instantiation keeps untyped constants from defaulting to int.
                Ok(format!("{goadl}Addr[{ty}]({inner})"))
            }
            Primitive::TypeToken => Err(invalid(location, "type tokens cannot have defaults")),
            _ => Err(GenError::UnknownPrimitive(name.to_string())),
        }
    }

    fn reference_value(&mut self, te: &TypeExpr, val: &Value, location: &str) -> GenResult<String> {
        let TypeRef::Reference(sn) = &te.type_ref else {
            return Err(invalid(location, "expected a reference"));
        };
        let resolver = self.resolver;
        let decl = resolver.resolve(sn)?;
        if let Some(gct) = custom_type(decl)? {
            return self.custom_value(&gct, te, val, location);
        }
        let bindings = TypeBindings::for_decl(sn, decl, &te.parameters)?;
        match &decl.decl_type {
            DeclType::Struct(s) => self.struct_value(s, &bindings, te, val, location),
            DeclType::Union(u) => self.union_value(u, &bindings, te, val, location),
            DeclType::TypeDef(td) => {
                let mono = bindings.substitute(&td.type_expr)?;
                self.go_value(&mono, val, location)
            }
            DeclType::NewType(nt) => {
                let mono = bindings.substitute(&nt.type_expr)?;
                let inner = self.go_value(&mono, val, location)?;
                let gt = self.go_type(te)?;
                Ok(format!("{gt}({inner})"))
            }
        }
    }

    fn struct_value(
        &mut self,
        s: &Struct,
        bindings: &TypeBindings,
        te: &TypeExpr,
        val: &Value,
        location: &str,
    ) -> GenResult<String> {
        let Value::Object(map) = val else {
            return Err(invalid(location, "expected an object for a struct"));
        };
        let gt = self.go_type(te)?;
        let mut args = Vec::with_capacity(s.fields.len());
        for field in &s.fields {
            let mono = bindings.substitute_field(field)?;
            let at = format!("{location}.{}", field.name);
            let arg = match map.get(&field.serialized_name) {
                Some(v) => self.go_value(&mono, v, &at)?,
                None => match field.default.as_option() {
                    Some(d) => self.go_value(&mono, d, &at)?,
                    None if mono.as_primitive() == Some("Void") => "struct{}{}".to_string(),
                    None => return Err(invalid(&at, "field missing and has no default")),
                },
            };
            args.push(arg);
        }
        let func = format!("{}MakeAll_{}{}", gt.pkg_prefix(), gt.name, gt.args_rside());
        Ok(call(&func, &args))
    }

    fn union_value(
        &mut self,
        u: &Union,
        bindings: &TypeBindings,
        te: &TypeExpr,
        val: &Value,
        location: &str,
    ) -> GenResult<String> {
        let (key, inner) = match val {
            Value::String(k) => (k.as_str(), &NULL),
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((k, v)) => (k.as_str(), v),
                None => return Err(invalid(location, "empty union value")),
            },
            other => {
                return Err(invalid(
                    location,
                    format!("expected a branch name or single-key object, got {other}"),
                ));
            }
        };
        let field = u
            .fields
            .iter()
            .find(|f| f.serialized_name == key)
            .ok_or_else(|| invalid(location, format!("unknown branch '{key}'")))?;
        let mono = bindings.substitute_field(field)?;
        let gt = self.go_type(te)?;
        let v = self.go_value(&mono, inner, &format!("{location}.{}", field.name))?;
        let func = format!(
            "{}Make_{}_{}{}",
            gt.pkg_prefix(),
            gt.name,
            field.name,
            gt.args_rside()
        );
        Ok(call(&func, &[v]))
    }

    fn custom_value(
        &mut self,
        gct: &GoCustomType,
        te: &TypeExpr,
        val: &Value,
        location: &str,
    ) -> GenResult<String> {
        let Some(helpers) = &gct.helpers else {
            return Err(invalid(
                location,
                format!("custom type {} has no helpers to construct a default", gct.gotype.name),
            ));
        };
        let gt = self.go_type(te)?;
        let helper_pkg = self
            .imports
            .add_spec(ImportSpec::named(helpers.import_path.clone(), helpers.pkg.clone()));
        let texprs = te
            .parameters
            .iter()
            .map(|p| self.texpr_literal(p))
            .collect::<GenResult<Vec<_>>>()?;
        let adlast = self.pkg("adlast")?;
        Ok(format!(
            "{helper_pkg}.{}{{}}.Construct([]{adlast}TypeExpr{{{}}}, {}).({gt})",
            helpers.name,
            texprs.join(", "),
            any_literal(val)
        ))
    }

    /// Go expression building the runtime `adlast.TypeExpr` for `te`.
    pub fn texpr_literal(&mut self, te: &TypeExpr) -> GenResult<String> {
        let adlast = self.pkg("adlast")?;
        let type_ref = match &te.type_ref {
            TypeRef::Primitive(p) => {
                format!("{adlast}Make_TypeRef_primitive({})", string_literal(p))
            }
            TypeRef::TypeParam(t) => {
                format!("{adlast}Make_TypeRef_typeParam({})", string_literal(t))
            }
            TypeRef::Reference(sn) => format!(
                "{adlast}Make_TypeRef_reference({adlast}Make_ScopedName({}, {}))",
                string_literal(&sn.module_name),
                string_literal(&sn.name)
            ),
        };
        let params = te
            .parameters
            .iter()
            .map(|p| self.texpr_literal(p))
            .collect::<GenResult<Vec<_>>>()?;
        Ok(format!(
            "{adlast}Make_TypeExpr({type_ref}, []{adlast}TypeExpr{{{}}})",
            params.join(", ")
        ))
    }

    /// Go expression building an annotation map.
    pub fn annotations_literal(&mut self, anns: &Annotations) -> GenResult<String> {
        let adlast = self.pkg("adlast")?;
        let customtypes = self.pkg("customtypes")?;
        let ty = format!("{customtypes}MapMap[{adlast}ScopedName, any]");
        let elems: Vec<String> = anns
            .iter()
            .map(|(k, v)| {
                format!(
                    "{adlast}Make_ScopedName({}, {}): {}",
                    string_literal(&k.module_name),
                    string_literal(&k.name),
                    any_literal(v)
                )
            })
            .collect();
        Ok(composite(&ty, &elems))
    }
}

#[cfg(test)]
#[path = "value/value_tests.rs"]
mod value_tests;
