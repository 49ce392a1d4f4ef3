//! Per-file Go import registry
//!
//! Every generated file owns one [`Imports`]. Import paths are reserved up
//! front or on first use, each path gets exactly one local name, and names
//! are pairwise distinct. Only specs marked used while the body is generated
//! appear in the file's import block.

use crate::naming::{module_dir, pkg_from_import};
use adlgen_core::{BundleMap, GenError, GenResult};
use std::collections::HashSet;

/// One Go import: path plus the local name code refers to it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub path: String,
    pub name: String,
    pub aliased: bool,
}

impl ImportSpec {
    /// An import referred to by its derived package name.
    pub fn plain(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = pkg_from_import(&path);
        let aliased = !path.rsplit('/').next().is_some_and(|last| last == name);
        Self {
            path,
            name,
            aliased,
        }
    }

    /// An import with an explicit local name.
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        let path = path.into();
        let name = name.into();
        let aliased = !path.rsplit('/').next().is_some_and(|last| last == name);
        Self {
            path,
            name,
            aliased,
        }
    }

    /// The import line body: `"path"` or `name "path"`.
    pub fn render(&self) -> String {
        if self.aliased {
            format!("{} \"{}\"", self.name, self.path)
        } else {
            format!("\"{}\"", self.path)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Imports {
    specs: Vec<ImportSpec>,
    used: HashSet<String>,
    bundles: Vec<BundleMap>,
}

impl Imports {
    pub fn new(reserved: impl IntoIterator<Item = ImportSpec>, bundles: Vec<BundleMap>) -> Self {
        let mut imports = Self {
            specs: Vec::new(),
            used: HashSet::new(),
            bundles,
        };
        for spec in reserved {
            imports.reserve_spec(spec);
        }
        imports
    }

    pub fn by_path(&self, path: &str) -> Option<&ImportSpec> {
        self.specs.iter().find(|s| s.path == path)
    }

    pub fn by_name(&self, name: &str) -> Option<&ImportSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Register `path` without marking it used.
    pub fn reserve(&mut self, path: &str) -> ImportSpec {
        if let Some(spec) = self.by_path(path) {
            return spec.clone();
        }
        self.reserve_spec(ImportSpec::plain(path))
    }

    fn reserve_spec(&mut self, mut spec: ImportSpec) -> ImportSpec {
        if let Some(existing) = self.by_path(&spec.path) {
            return existing.clone();
        }
        if self.by_name(&spec.name).is_some() {
            let base = spec.name.clone();
            spec.aliased = true;
            let mut n = 2u64;
            loop {
                spec.name = format!("{base}{n}");
                if self.by_name(&spec.name).is_none() {
                    break;
                }
                n += 1;
            }
        }
        self.specs.push(spec.clone());
        spec
    }

    /// Register a spec and mark it used; returns the local name.
    pub fn add_spec(&mut self, spec: ImportSpec) -> String {
        let spec = self.reserve_spec(spec);
        self.used.insert(spec.path);
        spec.name
    }

    /// Register a path and mark it used; returns the local name.
    pub fn add_path(&mut self, path: &str) -> String {
        let spec = self.reserve(path);
        self.used.insert(spec.path);
        spec.name
    }

    /// Import the Go package generated for a schema module.
    ///
    /// Bundle-sourced modules resolve under the bundle's import root, all
    /// others under the project's module path, offset by `mid_path` when the
    /// output directory is nested inside the project.
    pub fn add_module(&mut self, module: &str, module_path: &str, mid_path: &str) -> String {
        if let Some(bundle) = self.bundles.iter().find(|b| b.matches(module)) {
            let path = format!(
                "{}/{}",
                bundle.import_root.trim_end_matches('/'),
                module_dir(module)
            );
            let name = crate::naming::module_package(module).to_string();
            return self.add_spec(ImportSpec::named(path, name));
        }
        let path = if mid_path.is_empty() {
            format!("{}/{}", module_path, module_dir(module))
        } else {
            format!("{}/{}/{}", module_path, mid_path, module_dir(module))
        };
        self.add_path(&path)
    }

    /// Qualifier prefix (`name.`) for a reserved import, marking it used.
    pub fn go_import(&mut self, name: &str) -> GenResult<String> {
        let path = self
            .by_name(name)
            .map(|s| s.path.clone())
            .ok_or_else(|| GenError::UnknownImport(name.to_string()))?;
        Ok(format!("{}.", self.add_path(&path)))
    }

    pub fn is_used(&self, path: &str) -> bool {
        self.used.contains(path)
    }

    /// Specs marked used, in registration order.
    pub fn used_specs(&self) -> Vec<&ImportSpec> {
        self.specs.iter().filter(|s| self.used.contains(&s.path)).collect()
    }

    pub fn specs(&self) -> &[ImportSpec] {
        &self.specs
    }
}
