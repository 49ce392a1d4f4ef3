//! Type-parameter binding and monomorphization
//!
//! A [`TypeBindings`] table maps a declaration's type parameter names to the
//! type expressions supplied at one use site. Substitution is a pure tree
//! rewrite; it never consults the resolver.

use crate::error::{GenError, GenResult};
use crate::model::{Decl, Field, ScopedName, TypeExpr, TypeRef};

/// Ordered name -> type expression substitution table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeBindings {
    context: String,
    bindings: Vec<(String, TypeExpr)>,
}

impl TypeBindings {
    /// An empty table; substituting through it fails on any type parameter.
    pub fn empty(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            bindings: Vec::new(),
        }
    }

    /// Bind `params` positionally to `args`.
    pub fn new(context: impl Into<String>, params: &[String], args: &[TypeExpr]) -> GenResult<Self> {
        let context = context.into();
        if params.len() != args.len() {
            return Err(GenError::ArityMismatch {
                decl: context,
                expected: params.len(),
                actual: args.len(),
            });
        }
        Ok(Self {
            context,
            bindings: params.iter().cloned().zip(args.iter().cloned()).collect(),
        })
    }

    /// Bind a declaration's own parameters to the arguments of a reference to it.
    pub fn for_decl(name: &ScopedName, decl: &Decl, args: &[TypeExpr]) -> GenResult<Self> {
        Self::new(name.to_string(), decl.type_params(), args)
    }

    /// Identity bindings: every parameter maps to itself.
    pub fn identity(name: &ScopedName, decl: &Decl) -> Self {
        Self {
            context: name.to_string(),
            bindings: decl
                .type_params()
                .iter()
                .map(|p| (p.clone(), TypeExpr::type_param(p.clone())))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeExpr> {
        self.bindings.iter().find(|(n, _)| n == name).map(|(_, te)| te)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Replace every type parameter in `te` by its binding.
    pub fn substitute(&self, te: &TypeExpr) -> GenResult<TypeExpr> {
        match &te.type_ref {
            TypeRef::TypeParam(name) => {
                if !te.parameters.is_empty() {
                    return Err(GenError::TypeParamWithArguments { name: name.clone() });
                }
                self.get(name)
                    .cloned()
                    .ok_or_else(|| GenError::UnboundTypeParam {
                        name: name.clone(),
                        context: self.context.clone(),
                    })
            }
            TypeRef::Primitive(_) | TypeRef::Reference(_) => Ok(TypeExpr {
                type_ref: te.type_ref.clone(),
                parameters: te
                    .parameters
                    .iter()
                    .map(|p| self.substitute(p))
                    .collect::<GenResult<_>>()?,
            }),
        }
    }

    /// Substitute a field's type; unbound parameters are reported against
    /// `<decl>::<field>`.
    pub fn substitute_field(&self, field: &Field) -> GenResult<TypeExpr> {
        self.substitute(&field.type_expr).map_err(|e| match e {
            GenError::UnboundTypeParam { name, context } => GenError::UnboundTypeParam {
                name,
                context: format!("{context}::{}", field.name),
            },
            other => other,
        })
    }

    /// Substitute a field's type and report whether the result is free of
    /// type parameters.
    pub fn substitute_concrete(&self, field: &Field) -> GenResult<(TypeExpr, bool)> {
        let out = self.substitute_field(field)?;
        let concrete = out.is_concrete();
        Ok((out, concrete))
    }
}
