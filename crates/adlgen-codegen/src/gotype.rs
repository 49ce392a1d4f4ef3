//! Type mapper: schema type expressions to Go type expressions
//!
//! # Primitive table
//!
//! | Schema | Go |
//! |--------|----|
//! | `Int8`..`Int64` | `int8`..`int64` |
//! | `Word8`..`Word64` | `uint8`..`uint64` |
//! | `Bool` | `bool` |
//! | `Float`, `Double` | `float64` |
//! | `String` | `string` |
//! | `ByteVector` | `[]byte` |
//! | `Void` | `struct{}` |
//! | `Json` | `any` |
//! | `Vector<T>` | `[]T` |
//! | `StringMap<T>` | `map[string]T` |
//! | `Nullable<T>` | `*T` |
//! | `TypeToken<T>` | `adlast.ATypeExpr[T]` |
//!
//! Containers are not generic in Go, so the element's own instantiation list
//! is carried over to the container (`Vector<Pair<A,B>>` is `[]Pair[A, B]`).

use crate::gofile::GoFile;
use crate::imports::ImportSpec;
use crate::type_params::{TypeParamList, rside};
use adlgen_core::annotations::custom_type;
use adlgen_core::{
    DeclType, GenError, GenResult, GoCustomType, Primitive, ScopedName, TypeBindings, TypeExpr,
    TypeRef,
};
use std::fmt;

/// A Go type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoType {
    /// Package qualifier, empty for local and built-in types
    pub pkg: String,
    pub name: String,
    /// Rendered type arguments
    pub args: Vec<String>,
    /// True when this is (or wraps) a bare type parameter
    pub is_type_param: bool,
}

impl GoType {
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            pkg: String::new(),
            name: name.into(),
            args: Vec::new(),
            is_type_param: false,
        }
    }

    /// `pkg.Name` without type arguments.
    pub fn sans_args(&self) -> String {
        if self.pkg.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.pkg, self.name)
        }
    }

    /// `pkg.` or empty.
    pub fn pkg_prefix(&self) -> String {
        if self.pkg.is_empty() {
            String::new()
        } else {
            format!("{}.", self.pkg)
        }
    }

    /// `[A, B]` or empty.
    pub fn args_rside(&self) -> String {
        rside(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_type_param {
            write!(f, "{}", self.sans_args())
        } else {
            write!(f, "{}{}", self.sans_args(), self.args_rside())
        }
    }
}

fn scalar(p: Primitive) -> Option<&'static str> {
    let go = match p {
        Primitive::Int8 => "int8",
        Primitive::Int16 => "int16",
        Primitive::Int32 => "int32",
        Primitive::Int64 => "int64",
        Primitive::Word8 => "uint8",
        Primitive::Word16 => "uint16",
        Primitive::Word32 => "uint32",
        Primitive::Word64 => "uint64",
        Primitive::Bool => "bool",
        Primitive::Float | Primitive::Double => "float64",
        Primitive::String => "string",
        Primitive::ByteVector => "[]byte",
        Primitive::Void => "struct{}",
        Primitive::Json => "any",
        Primitive::Vector | Primitive::StringMap | Primitive::Nullable | Primitive::TypeToken => {
            return None;
        }
    };
    Some(go)
}

impl GoFile<'_> {
    /// Map a type expression, discarding the free type parameters it uses.
    pub fn go_type(&mut self, te: &TypeExpr) -> GenResult<GoType> {
        let mut acc = TypeParamList::new();
        self.go_type_acc(te, &mut acc)
    }

    /// Map a type expression, recording every type parameter it uses in `acc`.
    pub fn go_type_acc(&mut self, te: &TypeExpr, acc: &mut TypeParamList) -> GenResult<GoType> {
        match &te.type_ref {
            TypeRef::Primitive(name) => self.primitive_type(name, &te.parameters, acc),
            TypeRef::TypeParam(name) => {
                if !te.parameters.is_empty() {
                    return Err(GenError::TypeParamWithArguments { name: name.clone() });
                }
                acc.push_unique(name);
                Ok(GoType {
                    pkg: String::new(),
                    name: name.clone(),
                    args: Vec::new(),
                    is_type_param: true,
                })
            }
            TypeRef::Reference(sn) => self.reference_type(sn, &te.parameters, acc),
        }
    }

    fn primitive_type(
        &mut self,
        name: &str,
        params: &[TypeExpr],
        acc: &mut TypeParamList,
    ) -> GenResult<GoType> {
        let p = Primitive::from_name(name).ok_or_else(|| GenError::UnknownPrimitive(name.to_string()))?;
        if params.len() != p.arity() {
            return Err(GenError::ArityMismatch {
                decl: name.to_string(),
                expected: p.arity(),
                actual: params.len(),
            });
        }
        if let Some(go) = scalar(p) {
            return Ok(GoType::builtin(go));
        }
        let elem = self.go_type_acc(&params[0], acc)?;
        let container = |prefix: &str| GoType {
            pkg: String::new(),
            name: format!("{prefix}{}", elem.sans_args()),
            args: elem.args.clone(),
            is_type_param: elem.is_type_param,
        };
        let out = match p {
            Primitive::Vector => container("[]"),
            Primitive::StringMap => container("map[string]"),
            Primitive::Nullable => container("*"),
            _ => {
                let adlast = self.pkg("adlast")?;
                GoType {
                    pkg: String::new(),
                    name: format!("{adlast}ATypeExpr"),
                    args: vec![elem.to_string()],
                    is_type_param: false,
                }
            }
        };
        Ok(out)
    }

    fn reference_type(
        &mut self,
        sn: &ScopedName,
        params: &[TypeExpr],
        acc: &mut TypeParamList,
    ) -> GenResult<GoType> {
        let resolver = self.resolver;
        let decl = resolver.resolve(sn)?;
        if let Some(gct) = custom_type(decl)? {
            return self.custom_type_ref(&gct, params, acc);
        }
        if let DeclType::TypeDef(td) = &decl.decl_type {
            if !td.type_params.is_empty() {
                // Go aliases cannot take type parameters, so name the right-hand side instead
                let mono = TypeBindings::for_decl(sn, decl, params)?.substitute(&td.type_expr)?;
                return self.go_type_acc(&mono, acc);
            }
        }
        if decl.type_params().len() != params.len() {
            return Err(GenError::ArityMismatch {
                decl: sn.to_string(),
                expected: decl.type_params().len(),
                actual: params.len(),
            });
        }
        let pkg = self.module_qualifier(&sn.module_name);
        let args = params
            .iter()
            .map(|a| self.go_type_acc(a, acc).map(|g| g.to_string()))
            .collect::<GenResult<Vec<_>>>()?;
        Ok(GoType {
            pkg,
            name: sn.name.clone(),
            args,
            is_type_param: false,
        })
    }

    fn custom_type_ref(
        &mut self,
        gct: &GoCustomType,
        params: &[TypeExpr],
        acc: &mut TypeParamList,
    ) -> GenResult<GoType> {
        let pkg = self.register_custom_type(gct);
        let args = params
            .iter()
            .map(|a| self.go_type_acc(a, acc).map(|g| g.to_string()))
            .collect::<GenResult<Vec<_>>>()?;
        Ok(GoType {
            pkg,
            name: gct.gotype.name.clone(),
            args,
            is_type_param: false,
        })
    }

    /// Import the custom Go type's package; returns its local name.
    pub(crate) fn register_custom_type(&mut self, gct: &GoCustomType) -> String {
        self.imports
            .add_spec(ImportSpec::named(gct.gotype.import_path.clone(), gct.gotype.pkg.clone()))
    }
}
