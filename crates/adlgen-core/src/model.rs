//! Schema declaration model
//!
//! These types mirror the JSON form of the combined module AST produced by the
//! schema compiler. The model is built once per invocation and never mutated
//! afterwards; all lookups go through [`crate::Resolver`].
//!
//! # Wire conventions
//!
//! - Unions are externally tagged: `{"struct_": {...}}`, `{"primitive": "Int32"}`
//! - `Maybe<T>` is `"nothing"` or `{"just": value}`
//! - Annotations are a list of `{"k": ScopedName, "v": json}` entries

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fully qualified name of a declaration: `(module, name)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedName {
    pub module_name: String,
    pub name: String,
}

impl ScopedName {
    pub fn new(module_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module_name, self.name)
    }
}

/// Head of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    Primitive(String),
    TypeParam(String),
    Reference(ScopedName),
}

/// A type reference applied to an ordered list of type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeExpr {
    pub type_ref: TypeRef,
    #[serde(default)]
    pub parameters: Vec<TypeExpr>,
}

impl TypeExpr {
    /// A primitive with no arguments, e.g. `Int32`.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            type_ref: TypeRef::Primitive(name.into()),
            parameters: Vec::new(),
        }
    }

    /// A parametrized built-in, e.g. `Vector<T>`.
    pub fn primitive_of(name: impl Into<String>, parameters: Vec<TypeExpr>) -> Self {
        Self {
            type_ref: TypeRef::Primitive(name.into()),
            parameters,
        }
    }

    pub fn type_param(name: impl Into<String>) -> Self {
        Self {
            type_ref: TypeRef::TypeParam(name.into()),
            parameters: Vec::new(),
        }
    }

    pub fn reference(name: ScopedName, parameters: Vec<TypeExpr>) -> Self {
        Self {
            type_ref: TypeRef::Reference(name),
            parameters,
        }
    }

    pub fn vector(elem: TypeExpr) -> Self {
        Self::primitive_of("Vector", vec![elem])
    }

    pub fn string_map(elem: TypeExpr) -> Self {
        Self::primitive_of("StringMap", vec![elem])
    }

    pub fn nullable(elem: TypeExpr) -> Self {
        Self::primitive_of("Nullable", vec![elem])
    }

    pub fn type_token(elem: TypeExpr) -> Self {
        Self::primitive_of("TypeToken", vec![elem])
    }

    pub fn as_primitive(&self) -> Option<&str> {
        match &self.type_ref {
            TypeRef::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_type_param(&self) -> Option<&str> {
        match &self.type_ref {
            TypeRef::TypeParam(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ScopedName> {
        match &self.type_ref {
            TypeRef::Reference(sn) => Some(sn),
            _ => None,
        }
    }

    /// Append every type parameter name occurring in this expression to `acc`,
    /// in order of first appearance, without duplicates.
    pub fn collect_type_params(&self, acc: &mut Vec<String>) {
        if let TypeRef::TypeParam(name) = &self.type_ref {
            if !acc.iter().any(|n| n == name) {
                acc.push(name.clone());
            }
        }
        for p in &self.parameters {
            p.collect_type_params(acc);
        }
    }

    /// True when no type parameter occurs anywhere in the expression.
    pub fn is_concrete(&self) -> bool {
        !matches!(self.type_ref, TypeRef::TypeParam(_))
            && self.parameters.iter().all(TypeExpr::is_concrete)
    }
}

/// Built-in primitive types understood by the type mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int8,
    Int16,
    Int32,
    Int64,
    Word8,
    Word16,
    Word32,
    Word64,
    Bool,
    Float,
    Double,
    String,
    ByteVector,
    Void,
    Json,
    Vector,
    StringMap,
    Nullable,
    TypeToken,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        let p = match name {
            "Int8" => Primitive::Int8,
            "Int16" => Primitive::Int16,
            "Int32" => Primitive::Int32,
            "Int64" => Primitive::Int64,
            "Word8" => Primitive::Word8,
            "Word16" => Primitive::Word16,
            "Word32" => Primitive::Word32,
            "Word64" => Primitive::Word64,
            "Bool" => Primitive::Bool,
            "Float" => Primitive::Float,
            "Double" => Primitive::Double,
            "String" => Primitive::String,
            "ByteVector" => Primitive::ByteVector,
            "Void" => Primitive::Void,
            "Json" => Primitive::Json,
            "Vector" => Primitive::Vector,
            "StringMap" => Primitive::StringMap,
            "Nullable" => Primitive::Nullable,
            "TypeToken" => Primitive::TypeToken,
            _ => return None,
        };
        Some(p)
    }

    /// Number of type arguments the primitive takes.
    pub fn arity(self) -> usize {
        match self {
            Primitive::Vector | Primitive::StringMap | Primitive::Nullable | Primitive::TypeToken => 1,
            _ => 0,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Primitive::Int8
                | Primitive::Int16
                | Primitive::Int32
                | Primitive::Int64
                | Primitive::Word8
                | Primitive::Word16
                | Primitive::Word32
                | Primitive::Word64
                | Primitive::Float
                | Primitive::Double
        )
    }
}

/// Optional value in the schema compiler's encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maybe<T> {
    Nothing,
    Just(T),
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Nothing
    }
}

impl<T> Maybe<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Maybe::Nothing => None,
            Maybe::Just(v) => Some(v),
        }
    }

    pub fn is_just(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Maybe::Just(v),
            None => Maybe::Nothing,
        }
    }
}

/// Annotations attached to a declaration or field, keyed by the annotation's
/// declaration name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations(BTreeMap<ScopedName, serde_json::Value>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ScopedName) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &ScopedName) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: ScopedName, value: serde_json::Value) {
        self.0.insert(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopedName, &serde_json::Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Serialize, Deserialize)]
struct AnnotationEntry {
    k: ScopedName,
    v: serde_json::Value,
}

impl Serialize for Annotations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            seq.serialize_element(&AnnotationEntry {
                k: k.clone(),
                v: v.clone(),
            })?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Annotations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<AnnotationEntry>::deserialize(deserializer)?;
        Ok(Annotations(entries.into_iter().map(|e| (e.k, e.v)).collect()))
    }
}

/// A struct field or union branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub serialized_name: String,
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub default: Maybe<serde_json::Value>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl Field {
    /// A field whose wire name equals its declared name.
    pub fn new(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        let name = name.into();
        Self {
            serialized_name: name.clone(),
            name,
            type_expr,
            default: Maybe::Nothing,
            annotations: Annotations::new(),
        }
    }

    pub fn with_serialized_name(mut self, serialized_name: impl Into<String>) -> Self {
        self.serialized_name = serialized_name.into();
        self
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Maybe::Just(value);
        self
    }

    pub fn with_annotation(mut self, key: ScopedName, value: serde_json::Value) -> Self {
        self.annotations.insert(key, value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Struct {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub type_expr: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewType {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub default: Maybe<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclType {
    #[serde(rename = "struct_")]
    Struct(Struct),
    #[serde(rename = "union_")]
    Union(Union),
    #[serde(rename = "type_")]
    TypeDef(TypeDef),
    #[serde(rename = "newtype_")]
    NewType(NewType),
}

impl DeclType {
    /// Human-readable kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DeclType::Struct(_) => "struct",
            DeclType::Union(_) => "union",
            DeclType::TypeDef(_) => "type alias",
            DeclType::NewType(_) => "newtype",
        }
    }
}

/// One named schema declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    #[serde(default)]
    pub version: Maybe<u32>,
    #[serde(rename = "type_")]
    pub decl_type: DeclType,
    #[serde(default)]
    pub annotations: Annotations,
}

impl Decl {
    pub fn new(name: impl Into<String>, decl_type: DeclType) -> Self {
        Self {
            name: name.into(),
            version: Maybe::Nothing,
            decl_type,
            annotations: Annotations::new(),
        }
    }

    pub fn new_struct(name: impl Into<String>, type_params: &[&str], fields: Vec<Field>) -> Self {
        Self::new(
            name,
            DeclType::Struct(Struct {
                type_params: owned(type_params),
                fields,
            }),
        )
    }

    pub fn new_union(name: impl Into<String>, type_params: &[&str], fields: Vec<Field>) -> Self {
        Self::new(
            name,
            DeclType::Union(Union {
                type_params: owned(type_params),
                fields,
            }),
        )
    }

    pub fn new_typedef(name: impl Into<String>, type_params: &[&str], type_expr: TypeExpr) -> Self {
        Self::new(
            name,
            DeclType::TypeDef(TypeDef {
                type_params: owned(type_params),
                type_expr,
            }),
        )
    }

    pub fn new_newtype(name: impl Into<String>, type_params: &[&str], type_expr: TypeExpr) -> Self {
        Self::new(
            name,
            DeclType::NewType(NewType {
                type_params: owned(type_params),
                type_expr,
                default: Maybe::Nothing,
            }),
        )
    }

    pub fn with_annotation(mut self, key: ScopedName, value: serde_json::Value) -> Self {
        self.annotations.insert(key, value);
        self
    }

    /// Declared type parameter names, in order.
    pub fn type_params(&self) -> &[String] {
        match &self.decl_type {
            DeclType::Struct(s) => &s.type_params,
            DeclType::Union(u) => &u.type_params,
            DeclType::TypeDef(t) => &t.type_params,
            DeclType::NewType(n) => &n.type_params,
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match &self.decl_type {
            DeclType::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// A type alias with parameters cannot be named on the left of a Go alias.
    pub fn is_generic_typedef(&self) -> bool {
        matches!(&self.decl_type, DeclType::TypeDef(t) if !t.type_params.is_empty())
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// A schema module: a name and its declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub decls: BTreeMap<String, Decl>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decls: BTreeMap::new(),
            annotations: Annotations::new(),
        }
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decls.insert(decl.name.clone(), decl);
        self
    }

    /// Path segments of the module name (`a.b.c` -> `["a", "b", "c"]`).
    pub fn path_segments(&self) -> Vec<&str> {
        self.name.split('.').collect()
    }
}
