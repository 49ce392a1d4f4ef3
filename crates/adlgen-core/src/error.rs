//! Error types for adlgen

use crate::model::ScopedName;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for resolution and code generation
#[derive(Error, Debug)]
pub enum GenError {
    /// A scoped reference names no declaration
    #[error("unresolved reference: {0}")]
    UnresolvedReference(ScopedName),

    /// A module is neither in the input set nor built in
    #[error("missing module: {0}")]
    MissingModule(String),

    /// A primitive name has no entry in the type table
    #[error("unknown primitive: {0}")]
    UnknownPrimitive(String),

    /// A type parameter has no binding in the substitution table.
    /// `context` is `module.Decl`, or `module.Decl::field` when the field is known.
    #[error("unbound type parameter '{name}' in {context}")]
    UnboundTypeParam { name: String, context: String },

    /// A type parameter reference was given type arguments
    #[error("type parameter '{name}' cannot take type arguments")]
    TypeParamWithArguments { name: String },

    /// Use-site argument count does not match the declared parameters
    #[error("{decl} expects {expected} type arguments, got {actual}")]
    ArityMismatch {
        decl: String,
        expected: usize,
        actual: usize,
    },

    /// A struct required to be non-generic declares type parameters
    #[error("{decl} must be a struct without type parameters")]
    NotMonomorphic { decl: ScopedName },

    /// A reference resolved to the wrong kind of declaration
    #[error("{decl}::{field}: expected {expected}, found {found}")]
    UnexpectedDeclKind {
        decl: ScopedName,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A declared default does not fit its field type
    #[error("invalid default at {location}: {reason}")]
    InvalidDefault { location: String, reason: String },

    /// An annotation value could not be decoded
    #[error("invalid annotation {annotation} on {decl}: {reason}")]
    Annotation {
        decl: String,
        annotation: ScopedName,
        reason: String,
    },

    /// Generated code referenced an import that was never reserved
    #[error("unknown import: {0}")]
    UnknownImport(String),

    /// A capability struct or marker field uses a reserved type parameter name
    #[error("name clash with reserved capability type parameters [C, S, V]: {0}")]
    ReservedName(String),

    /// Two capability structs share a bare name across modules
    #[error(
        "capability alias conflict: '{name}' is reachable from both {first} and {second}; wrap one in a newtype"
    )]
    AliasConflict {
        name: String,
        first: String,
        second: String,
    },

    /// The root api is also reachable as a nested capability
    #[error("root api {0} cannot be used as a nested capability; wrap it in a newtype")]
    SelfNesting(ScopedName),

    /// A capability struct is reachable from itself through marker fields
    #[error("capability cycle: {}", path.join(" -> "))]
    CapabilityCycle { path: Vec<String> },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A generation task panicked or was aborted
    #[error("generation task failed: {0}")]
    Task(String),
}

/// Broad classes of failure, used when reporting and choosing exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Resolution,
    Shape,
    Capability,
    Config,
    Io,
}

impl GenError {
    /// Returns a stable numeric code for the error
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::UnresolvedReference(_) => 1,
            GenError::MissingModule(_) => 2,
            GenError::UnknownPrimitive(_) => 3,
            GenError::UnboundTypeParam { .. } => 4,
            GenError::TypeParamWithArguments { .. } => 5,
            GenError::ArityMismatch { .. } => 6,
            GenError::NotMonomorphic { .. } => 7,
            GenError::UnexpectedDeclKind { .. } => 8,
            GenError::InvalidDefault { .. } => 9,
            GenError::Annotation { .. } => 10,
            GenError::UnknownImport(_) => 11,
            GenError::ReservedName(_) => 12,
            GenError::AliasConflict { .. } => 13,
            GenError::SelfNesting(_) => 14,
            GenError::Config(_) => 15,
            GenError::Io(_) => 16,
            GenError::Json(_) => 17,
            GenError::Task(_) => 18,
            GenError::CapabilityCycle { .. } => 19,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::UnresolvedReference(_)
            | GenError::MissingModule(_)
            | GenError::UnknownPrimitive(_) => ErrorCategory::Resolution,
            GenError::UnboundTypeParam { .. }
            | GenError::TypeParamWithArguments { .. }
            | GenError::ArityMismatch { .. }
            | GenError::NotMonomorphic { .. }
            | GenError::UnexpectedDeclKind { .. }
            | GenError::InvalidDefault { .. }
            | GenError::Annotation { .. }
            | GenError::UnknownImport(_) => ErrorCategory::Shape,
            GenError::ReservedName(_)
            | GenError::AliasConflict { .. }
            | GenError::SelfNesting(_)
            | GenError::CapabilityCycle { .. } => ErrorCategory::Capability,
            GenError::Config(_) | GenError::Json(_) => ErrorCategory::Config,
            GenError::Io(_) | GenError::Task(_) => ErrorCategory::Io,
        }
    }
}
