//! Rendering context for one generated Go file

use crate::imports::{ImportSpec, Imports};
use crate::naming::module_dir;
use adlgen_core::{GenConfig, Resolver, is_builtin_module};

/// Imports every generated declaration file may refer to by name.
pub fn reserved_imports(config: &GenConfig) -> Vec<ImportSpec> {
    vec![
        ImportSpec::plain("encoding/json"),
        ImportSpec::plain("reflect"),
        ImportSpec::plain("strings"),
        ImportSpec::plain("fmt"),
        ImportSpec::named(config.runtime_import.clone(), "goadl"),
        ImportSpec::named(config.runtime_path("sys/adlast"), "adlast"),
        ImportSpec::named(config.runtime_path("adljson"), "adljson"),
        ImportSpec::named(config.runtime_path("customtypes"), "customtypes"),
        ImportSpec::named(config.runtime_path("sys/types"), "types"),
    ]
}

/// Imports a capability service file adds on top of [`reserved_imports`].
pub fn service_imports(config: &GenConfig) -> Vec<ImportSpec> {
    let mut specs = reserved_imports(config);
    specs.push(ImportSpec::plain("net/http"));
    specs.push(ImportSpec::plain("context"));
    specs.push(ImportSpec::named(config.capability_import.clone(), "capability"));
    specs
}

/// A Go source file under construction.
///
/// Holds the read-only inputs plus the file's own import registry. Bodies are
/// rendered first; the import block is built afterwards from what they used.
pub struct GoFile<'a> {
    pub(crate) resolver: &'a Resolver,
    pub(crate) config: &'a GenConfig,
    pub(crate) module_name: String,
    pub(crate) imports: Imports,
}

impl<'a> GoFile<'a> {
    pub fn new(resolver: &'a Resolver, config: &'a GenConfig, module_name: impl Into<String>) -> Self {
        Self::with_reserved(resolver, config, module_name, reserved_imports(config))
    }

    pub fn with_reserved(
        resolver: &'a Resolver,
        config: &'a GenConfig,
        module_name: impl Into<String>,
        reserved: Vec<ImportSpec>,
    ) -> Self {
        Self {
            resolver,
            config,
            module_name: module_name.into(),
            imports: Imports::new(reserved, config.bundles.clone()),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn imports(&self) -> &Imports {
        &self.imports
    }

    /// Local package name for declarations of `module`, empty when it is the
    /// module being generated. Built-in modules live in the runtime library.
    pub(crate) fn module_qualifier(&mut self, module: &str) -> String {
        if module == self.module_name {
            return String::new();
        }
        if is_builtin_module(module) && !self.resolver.has_module(module) {
            let path = self.config.runtime_path(&module_dir(module));
            return self.imports.add_path(&path);
        }
        self.imports
            .add_module(module, &self.config.module_path, &self.config.mid_path)
    }

    /// Qualifier prefix for a reserved package, e.g. `adlast.`.
    pub(crate) fn pkg(&mut self, name: &str) -> adlgen_core::GenResult<String> {
        self.imports.go_import(name)
    }
}
