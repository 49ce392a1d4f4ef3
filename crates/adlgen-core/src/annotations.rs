//! Go-specific declaration annotations
//!
//! Two annotations from the `adlc.config.go_` module steer generation:
//! `GoCustomType` replaces a declaration with an existing Go type, and
//! `TypeParamConstraintList` gives positional constraints for its type
//! parameters.

use crate::error::{GenError, GenResult};
use crate::model::{Annotations, Decl, ScopedName};
use serde::{Deserialize, Serialize};

/// Module holding the Go configuration annotations.
pub const GO_CONFIG_MODULE: &str = "adlc.config.go_";

pub fn custom_type_name() -> ScopedName {
    ScopedName::new(GO_CONFIG_MODULE, "GoCustomType")
}

pub fn constraint_list_name() -> ScopedName {
    ScopedName::new(GO_CONFIG_MODULE, "TypeParamConstraintList")
}

/// Replacement Go type for a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoCustomType {
    pub gotype: GoTypeRef,
    #[serde(default)]
    pub helpers: Option<GoHelpers>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoTypeRef {
    pub import_path: String,
    pub pkg: String,
    pub name: String,
    #[serde(default)]
    pub type_constraints: Vec<String>,
}

/// Type implementing the runtime's encode/decode helper interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoHelpers {
    pub import_path: String,
    pub pkg: String,
    pub name: String,
}

/// True when a package name differs from the last segment of its import path,
/// which forces an explicit alias in the import block.
pub fn needs_alias(import_path: &str, pkg: &str) -> bool {
    let last = import_path.rsplit('/').next().unwrap_or(import_path);
    last != pkg
}

impl GoTypeRef {
    pub fn is_aliased(&self) -> bool {
        needs_alias(&self.import_path, &self.pkg)
    }
}

impl GoHelpers {
    pub fn is_aliased(&self) -> bool {
        needs_alias(&self.import_path, &self.pkg)
    }
}

fn decode<T: for<'de> Deserialize<'de>>(
    anns: &Annotations,
    key: &ScopedName,
    owner: &str,
) -> GenResult<Option<T>> {
    let Some(value) = anns.get(key) else {
        return Ok(None);
    };
    serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|e| GenError::Annotation {
            decl: owner.to_string(),
            annotation: key.clone(),
            reason: e.to_string(),
        })
}

/// Decode the custom-type annotation on a declaration, if present.
pub fn custom_type(decl: &Decl) -> GenResult<Option<GoCustomType>> {
    decode(&decl.annotations, &custom_type_name(), &decl.name)
}

/// Decode the type parameter constraint list, empty when absent.
pub fn type_constraints(anns: &Annotations, owner: &str) -> GenResult<Vec<String>> {
    Ok(decode(anns, &constraint_list_name(), owner)?.unwrap_or_default())
}
