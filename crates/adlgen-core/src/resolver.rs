//! Declaration lookup over the combined module set

use crate::builtin::BUILTIN_MODULES;
use crate::error::{GenError, GenResult};
use crate::model::{Decl, Module, ScopedName};
use std::collections::BTreeMap;

/// Read-only view of every module available to one invocation.
///
/// Input modules take precedence; the runtime's built-in modules are consulted
/// only when a module name is absent from the input.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    modules: BTreeMap<String, Module>,
}

impl Resolver {
    pub fn new(modules: BTreeMap<String, Module>) -> Self {
        Self { modules }
    }

    pub fn from_modules(modules: impl IntoIterator<Item = Module>) -> Self {
        Self::new(modules.into_iter().map(|m| (m.name.clone(), m)).collect())
    }

    /// Parse the combined AST: a JSON object of module name -> module.
    pub fn from_json(json: &str) -> GenResult<Self> {
        let modules: BTreeMap<String, Module> = serde_json::from_str(json)?;
        Ok(Self::new(modules))
    }

    pub fn resolve(&self, name: &ScopedName) -> GenResult<&Decl> {
        let module = self
            .lookup_module(&name.module_name)
            .ok_or_else(|| GenError::UnresolvedReference(name.clone()))?;
        module
            .decls
            .get(&name.name)
            .ok_or_else(|| GenError::UnresolvedReference(name.clone()))
    }

    /// An input module by name; built-in modules are not returned here.
    pub fn module(&self, name: &str) -> GenResult<&Module> {
        self.modules
            .get(name)
            .ok_or_else(|| GenError::MissingModule(name.to_string()))
    }

    /// Input modules in name order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// True when `name` is one of the input modules.
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    fn lookup_module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name).or_else(|| BUILTIN_MODULES.get(name))
    }
}
