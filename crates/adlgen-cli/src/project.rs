//! adlgen.toml project file parsing and validation
//!
//! ```toml
//! [project]
//! module_path = "example.com/proj"   # or go_mod = "go.mod"
//!
//! [output]
//! dir = "internal/gen"
//! exclude_ast = false
//!
//! [[bundle]]
//! module_prefix = "common."
//! import_root = "github.com/example/common/gen"
//! ```

use adlgen_core::BundleMap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is absent
pub const DEFAULT_PROJECT_FILE: &str = "adlgen.toml";

/// adlgen.toml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub bundle: Vec<BundleMap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Go module path; read from go.mod when absent
    #[serde(default)]
    pub module_path: Option<String>,

    /// go.mod to read the module path from
    #[serde(default)]
    pub go_mod: Option<PathBuf>,

    /// Output directory relative to the Go module root, when module_path is given
    #[serde(default)]
    pub mid_path: Option<String>,

    #[serde(default)]
    pub runtime_import: Option<String>,

    #[serde(default)]
    pub capability_import: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub exclude_ast: bool,

    #[serde(default)]
    pub descriptor_suffix: Option<String>,

    #[serde(default)]
    pub extension: Option<String>,

    #[serde(default)]
    pub banner: Option<String>,
}

impl ProjectFile {
    /// Load a project file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read project file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse a project file from a string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse project file")
    }

    /// The explicit file, else ./adlgen.toml if present, else an empty project.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_PROJECT_FILE).is_file() => Self::from_file(DEFAULT_PROJECT_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Validate the project file
    pub fn validate(&self) -> Result<()> {
        if self.project.module_path.is_some() && self.project.go_mod.is_some() {
            anyhow::bail!("Set either project.module_path or project.go_mod, not both");
        }

        if let Some(module_path) = &self.project.module_path {
            if module_path.is_empty() || module_path.ends_with('/') {
                anyhow::bail!("Invalid module path: '{}'", module_path);
            }
        }

        if self.project.mid_path.is_some() && self.project.module_path.is_none() {
            anyhow::bail!("project.mid_path requires project.module_path");
        }

        if let Some(ext) = &self.output.extension {
            if ext.is_empty() || ext.starts_with('.') {
                anyhow::bail!("Invalid output extension: '{}'", ext);
            }
        }

        for (i, bundle) in self.bundle.iter().enumerate() {
            if bundle.module_prefix.is_empty() {
                anyhow::bail!("Bundle {} has an empty module_prefix", i);
            }
            if bundle.import_root.is_empty() {
                anyhow::bail!("Bundle '{}' has an empty import_root", bundle.module_prefix);
            }
        }

        Ok(())
    }
}
