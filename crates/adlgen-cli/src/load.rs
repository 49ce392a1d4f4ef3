//! Loading the combined module AST

use adlgen_core::{Resolver, ScopedName};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Read the schema compiler's combined AST: a JSON object of module name to
/// module.
pub fn load_resolver(path: impl AsRef<Path>) -> Result<Resolver> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read module AST: {}", path.display()))?;
    let resolver = Resolver::from_json(&json)
        .with_context(|| format!("Failed to parse module AST: {}", path.display()))?;
    info!(path = %path.display(), modules = resolver.module_names().count(), "loaded modules");
    Ok(resolver)
}

/// Parse `a.b.Name` into module `a.b` and declaration `Name`.
pub fn parse_scoped_name(text: &str) -> Result<ScopedName> {
    match text.rsplit_once('.') {
        Some((module, name)) if !module.is_empty() && !name.is_empty() => {
            Ok(ScopedName::new(module, name))
        }
        _ => anyhow::bail!("Expected a scoped name of the form module.Name, got '{}'", text),
    }
}
