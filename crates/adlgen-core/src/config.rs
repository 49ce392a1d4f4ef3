//! Generation configuration types

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maps schema modules sourced from an external bundle to the Go module that
/// already contains their generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMap {
    /// Schema module name prefix, e.g. `common.`
    pub module_prefix: String,

    /// Go import root holding the bundle's generated packages
    pub import_root: String,

    /// Go module version of the bundle, informational only
    #[serde(default)]
    pub version: Option<String>,
}

impl BundleMap {
    pub fn new(module_prefix: impl Into<String>, import_root: impl Into<String>) -> Self {
        Self {
            module_prefix: module_prefix.into(),
            import_root: import_root.into(),
            version: None,
        }
    }

    /// Parse the command-line form `module_prefix|import_root[|version]`.
    pub fn parse(text: &str) -> GenResult<Self> {
        let parts: Vec<&str> = text.split('|').collect();
        if !(2..=3).contains(&parts.len()) || parts[0].is_empty() || parts[1].is_empty() {
            return Err(GenError::Config(format!(
                "expecting bundle map of the form module_prefix|import_root[|version], got '{text}'"
            )));
        }
        Ok(Self {
            module_prefix: parts[0].to_string(),
            import_root: parts[1].to_string(),
            version: parts.get(2).map(|v| v.to_string()),
        })
    }

    pub fn matches(&self, module: &str) -> bool {
        module.starts_with(&self.module_prefix)
    }
}

/// Configuration for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Root directory generated files are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Go module path of the project receiving the generated code
    #[serde(default)]
    pub module_path: String,

    /// Path of the output directory relative to the Go module root
    #[serde(default)]
    pub mid_path: String,

    /// Import path of the Go runtime library
    #[serde(default = "default_runtime_import")]
    pub runtime_import: String,

    /// Import path of the capability http helpers used by service files
    #[serde(default = "default_capability_import")]
    pub capability_import: String,

    /// Externally sourced module prefixes
    #[serde(default)]
    pub bundles: Vec<BundleMap>,

    /// Suffix of the descriptor file (`<last>_<suffix>.go`)
    #[serde(default = "default_descriptor_suffix")]
    pub descriptor_suffix: String,

    /// Extension of generated source files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Skip descriptor and registration output
    #[serde(default)]
    pub exclude_ast: bool,

    /// First line of every generated file
    #[serde(default = "default_banner")]
    pub banner: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_runtime_import() -> String {
    "github.com/adl-lang/goadl_rt/v3".to_string()
}

fn default_capability_import() -> String {
    "github.com/helix-collective/go_protoapp/common/capability".to_string()
}

fn default_descriptor_suffix() -> String {
    "ast".to_string()
}

fn default_extension() -> String {
    "go".to_string()
}

fn default_banner() -> String {
    "// Code generated by adlgen - DO NOT EDIT.".to_string()
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            module_path: String::new(),
            mid_path: String::new(),
            runtime_import: default_runtime_import(),
            capability_import: default_capability_import(),
            bundles: Vec::new(),
            descriptor_suffix: default_descriptor_suffix(),
            extension: default_extension(),
            exclude_ast: false,
            banner: default_banner(),
        }
    }
}

impl GenConfig {
    pub fn new(module_path: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_path: module_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_mid_path(mut self, mid_path: impl Into<String>) -> Self {
        self.mid_path = mid_path.into();
        self
    }

    pub fn with_bundle(mut self, bundle: BundleMap) -> Self {
        self.bundles.push(bundle);
        self
    }

    pub fn with_exclude_ast(mut self, exclude: bool) -> Self {
        self.exclude_ast = exclude;
        self
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The bundle a module is sourced from, if any. First match wins.
    pub fn bundle_for(&self, module: &str) -> Option<&BundleMap> {
        self.bundles.iter().find(|b| b.matches(module))
    }

    /// Go import path of the runtime subpackage `sub` (e.g. `sys/adlast`).
    pub fn runtime_path(&self, sub: &str) -> String {
        format!("{}/{}", self.runtime_import, sub)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.module_path.is_empty() {
            return Err(GenError::Config("module path is required".into()));
        }
        if self.module_path.ends_with('/') || self.mid_path.starts_with('/') {
            return Err(GenError::Config(format!(
                "module path '{}' and mid path '{}' must not carry separators at the join",
                self.module_path, self.mid_path
            )));
        }
        if self.runtime_import.is_empty() {
            return Err(GenError::Config("runtime import path is required".into()));
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(GenError::Config(format!(
                "invalid file extension '{}'",
                self.extension
            )));
        }
        if self.descriptor_suffix.is_empty() {
            return Err(GenError::Config("descriptor suffix must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
