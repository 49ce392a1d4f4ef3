//! Command implementations

use crate::GenArgs;
use crate::gomod::{find_go_mod, mid_path, read_module_path};
use crate::load::{load_resolver, parse_scoped_name};
use crate::project::{DEFAULT_PROJECT_FILE, ProjectFile};
use adlgen_codegen::{generate_all, generate_apis};
use adlgen_core::{BundleMap, GenConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing::{debug, info};

/// Merge the project file with command-line overrides into a checked config.
pub fn build_config(args: &GenArgs, project: &ProjectFile) -> Result<GenConfig> {
    let output_dir = args
        .output
        .clone()
        .or_else(|| project.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let (module_path, mid) = match args
        .module_path
        .clone()
        .or_else(|| project.project.module_path.clone())
    {
        Some(module_path) => (module_path, project.project.mid_path.clone().unwrap_or_default()),
        None => {
            let go_mod = match args.go_mod_file.clone().or_else(|| project.project.go_mod.clone()) {
                Some(path) => path,
                None => find_go_mod(&output_dir).with_context(|| {
                    format!(
                        "No go.mod found above {}; pass --module-path or --go-mod-file",
                        output_dir.display()
                    )
                })?,
            };
            let module_path = read_module_path(&go_mod)?;
            let root = go_mod
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let mid = mid_path(root, &output_dir)?;
            debug!(go_mod = %go_mod.display(), module_path = %module_path, mid_path = %mid, "resolved Go module");
            (module_path, mid)
        }
    };

    let mut config = GenConfig::new(module_path, output_dir).with_mid_path(mid);
    if let Some(runtime) = &project.project.runtime_import {
        config.runtime_import = runtime.clone();
    }
    if let Some(capability) = &project.project.capability_import {
        config.capability_import = capability.clone();
    }
    if let Some(suffix) = &project.output.descriptor_suffix {
        config.descriptor_suffix = suffix.clone();
    }
    if let Some(extension) = &project.output.extension {
        config.extension = extension.clone();
    }
    if let Some(banner) = &project.output.banner {
        config.banner = banner.clone();
    }
    config.exclude_ast = args.exclude_ast || project.output.exclude_ast;
    config.bundles = project.bundle.clone();
    for text in &args.bundle_maps {
        config.bundles.push(BundleMap::parse(text)?);
    }

    config.validate()?;
    Ok(config)
}

fn load(args: &GenArgs) -> Result<GenConfig> {
    let project = ProjectFile::discover(args.config.as_deref())?;
    project.validate()?;
    build_config(args, &project)
}

/// Generate command implementation
pub fn generate(args: &GenArgs) -> Result<()> {
    let config = load(args)?;
    let resolver = load_resolver(&args.input)?;

    let runtime = Builder::new_multi_thread()
        .thread_name("adlgen-worker")
        .enable_all()
        .build()
        .context("Failed to create runtime")?;
    let written = runtime.block_on(generate_all(Arc::new(resolver), Arc::new(config)))?;

    info!(files = written.len(), "done");
    Ok(())
}

/// Api command implementation
pub fn api(args: &GenArgs, roots: &[String]) -> Result<()> {
    let config = load(args)?;
    let resolver = load_resolver(&args.input)?;

    let roots = roots
        .iter()
        .map(|root| parse_scoped_name(root))
        .collect::<Result<Vec<_>>>()?;
    for file in generate_apis(&resolver, &config, &roots)? {
        file.write()?;
    }
    Ok(())
}

/// Check command implementation
pub fn check(config: Option<PathBuf>, input: Option<PathBuf>) -> Result<()> {
    let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE));

    println!("Checking project file: {}", path.display());

    let project = ProjectFile::from_file(&path)?;
    project.validate()?;

    match &project.project.module_path {
        Some(module_path) => println!("✓ Module path: {module_path}"),
        None => println!("✓ Module path: from go.mod"),
    }
    println!("✓ Bundles: {}", project.bundle.len());

    if let Some(input) = input {
        let resolver = load_resolver(&input)?;
        for module in resolver.modules() {
            for decl in module.decls.values() {
                adlgen_core::annotations::custom_type(decl)?;
            }
        }
        println!("✓ Modules: {}", resolver.module_names().count());
    }

    println!("\nProject file is valid!");
    Ok(())
}
