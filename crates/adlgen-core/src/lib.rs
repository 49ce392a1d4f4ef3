//! adlgen-core - Declaration model, resolution and type-parameter binding
//!
//! This crate provides the read-only inputs of code generation:
//! - [`Module`], [`Decl`] and [`TypeExpr`] describing schema declarations
//! - [`Resolver`] for scoped-name lookup with a built-in fallback table
//! - [`TypeBindings`] for monomorphizing generic declarations
//! - [`GenConfig`] and [`GenError`] shared by every generation stage

pub mod annotations;
mod bind;
mod builtin;
mod config;
mod error;
mod model;
mod resolver;

pub use annotations::{GoCustomType, GoHelpers, GoTypeRef};
pub use bind::TypeBindings;
pub use builtin::{SYS_TYPES, is_builtin_module};
pub use config::{BundleMap, GenConfig};
pub use error::{ErrorCategory, GenError, GenResult};
pub use model::{
    Annotations, Decl, DeclType, Field, Maybe, Module, NewType, Primitive, ScopedName, Struct,
    TypeDef, TypeExpr, TypeRef, Union,
};
pub use resolver::Resolver;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Decl, DeclType, Field, GenConfig, GenError, GenResult, Module, Resolver, ScopedName,
        TypeBindings, TypeExpr, TypeRef,
    };
}
