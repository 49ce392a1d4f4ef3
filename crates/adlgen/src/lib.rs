//! # adlgen
//!
//! Generate idiomatic, generic Go code from ADL schemas.
//!
//! adlgen consumes the combined module AST produced by the ADL compiler and
//! writes, per module:
//! - a Go file with one type per declaration, plus constructors and helpers
//! - a descriptor file with runtime type descriptors and registrations
//!
//! and, per root api struct, a service file with `<Name>_Service` interfaces
//! and `Register_<Name>` functions for its capability graph.
//!
//! ## Quick Start
//!
//! ```no_run
//! use adlgen::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> GenResult<()> {
//! let json = std::fs::read_to_string("ast.json")?;
//! let resolver = Resolver::from_json(&json)?;
//! let config = GenConfig::new("example.com/proj", "internal/gen").with_mid_path("internal/gen");
//!
//! let written = generate_all(Arc::new(resolver), Arc::new(config)).await?;
//! adlgen::tracing::info!(files = written.len(), "generated");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`adlgen_core`] - Declaration model, resolution and type-parameter binding
//! - [`adlgen_codegen`] - Go source generation

// Re-export core types
pub use adlgen_core::{
    BundleMap, Decl, DeclType, ErrorCategory, Field, GenConfig, GenError, GenResult, Module,
    Resolver, ScopedName, TypeBindings, TypeExpr, TypeRef,
};

// Re-export generation entry points
pub use adlgen_codegen::{
    CapabilityGraph, GeneratedFile, GoFile, ModuleOutput, generate_all, generate_api,
    generate_apis, generate_module,
};

// Re-export common dependencies that embedders need
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use adlgen::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        GenConfig, GenError, GenResult, GeneratedFile, Resolver, ScopedName, generate_all,
        generate_api, generate_module,
    };
}
