//! Per-module generation and the parallel orchestrator

use crate::gofile::GoFile;
use crate::naming::{module_dir, module_package};
use crate::writer::GeneratedFile;
use adlgen_core::{GenConfig, GenError, GenResult, Resolver};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// The files generated for one schema module.
#[derive(Debug, Clone, Default)]
pub struct ModuleOutput {
    pub module: String,
    pub files: Vec<GeneratedFile>,
}

impl ModuleOutput {
    /// Write every file, returning their paths.
    pub fn write(&self) -> GenResult<Vec<PathBuf>> {
        self.files
            .iter()
            .map(|f| f.write().map(|()| f.path.clone()))
            .collect()
    }
}

/// Render the declaration file and, unless disabled, the descriptor file of
/// `module_name`. Nothing is written.
pub fn generate_module(
    resolver: &Resolver,
    config: &GenConfig,
    module_name: &str,
) -> GenResult<ModuleOutput> {
    let module = resolver.module(module_name)?;
    let dir = config.output_dir.join(module_dir(module_name));
    let package = module_package(module_name);

    let mut file = GoFile::new(resolver, config, module_name);
    let mut body = String::new();
    for decl in module.decls.values() {
        file.gen_decl(decl, &mut body)?;
    }
    let mut files = vec![file.into_file(dir.join(format!("{package}.{}", config.extension)), &body)];

    if config.exclude_ast {
        debug!(module = module_name, "descriptor output disabled");
    } else {
        let mut file = GoFile::new(resolver, config, module_name);
        let mut body = String::new();
        for decl in module.decls.values() {
            file.gen_descriptor(decl, &mut body)?;
        }
        let name = format!("{package}_{}.{}", config.descriptor_suffix, config.extension);
        files.push(file.into_file(dir.join(name), &body));
    }

    Ok(ModuleOutput {
        module: module_name.to_string(),
        files,
    })
}

/// Input modules generated by this run: everything not sourced from a bundle.
pub fn modules_to_generate<'r>(resolver: &'r Resolver, config: &GenConfig) -> Vec<&'r str> {
    resolver
        .module_names()
        .filter(|name| match config.bundle_for(name) {
            Some(bundle) => {
                debug!(module = *name, import_root = %bundle.import_root, "bundled module skipped");
                false
            }
            None => true,
        })
        .collect()
}

/// Generate and write every input module, one blocking task per module.
///
/// All tasks are awaited even after a failure; the first failure is returned.
/// Files written by tasks that succeeded stay on disk.
pub async fn generate_all(resolver: Arc<Resolver>, config: Arc<GenConfig>) -> GenResult<Vec<PathBuf>> {
    config.validate()?;
    let modules: Vec<String> = modules_to_generate(&resolver, &config)
        .into_iter()
        .map(String::from)
        .collect();
    info!(modules = modules.len(), output = %config.output_dir.display(), "generating");

    let mut tasks = JoinSet::new();
    for module in modules {
        let resolver = Arc::clone(&resolver);
        let config = Arc::clone(&config);
        tasks.spawn_blocking(move || {
            generate_module(&resolver, &config, &module)?.write()
        });
    }

    let mut written = Vec::new();
    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        let result = joined.map_err(|e| GenError::Task(e.to_string())).and_then(|r| r);
        match result {
            Ok(paths) => written.extend(paths),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    written.sort();
    info!(files = written.len(), "generation complete");
    Ok(written)
}
