//! adlgen-codegen - Go source generation from schema declarations
//!
//! Generation is organised around [`GoFile`], the rendering context of one
//! output file. Each stage adds methods to it:
//! - [`gotype`] maps type expressions to Go types
//! - [`value`] renders declared defaults as Go literals
//! - [`decl`] emits struct, union, alias and newtype bodies
//! - [`descriptor`] emits runtime type descriptors and registration
//! - [`capability`] expands an api struct into service interfaces
//!
//! [`generate_module`] and [`generate_all`] drive the per-module stages;
//! [`generate_api`] drives the capability stage for one root, [`generate_apis`]
//! for several.

pub mod capability;
pub mod decl;
pub mod descriptor;
mod generate;
mod gofile;
pub mod gotype;
mod imports;
pub mod naming;
mod type_params;
pub mod value;
mod writer;

#[cfg(test)]
mod test_support;

pub use capability::{ApiInstance, CapabilityGraph, RESERVED_NAMES, generate_api, generate_apis};
pub use generate::{ModuleOutput, generate_all, generate_module, modules_to_generate};
pub use gofile::{GoFile, reserved_imports, service_imports};
pub use gotype::GoType;
pub use imports::{ImportSpec, Imports};
pub use type_params::TypeParamList;
pub use value::any_literal;
pub use writer::GeneratedFile;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CapabilityGraph, GeneratedFile, GoFile, ModuleOutput, generate_all, generate_api,
        generate_module,
    };
}
