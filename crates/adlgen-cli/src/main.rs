//! adlgen CLI - Go code generator for ADL schemas
//!
//! Commands:
//! - `adlgen generate` - Generate Go declarations and descriptors for every module
//! - `adlgen api` - Generate capability service files for root api structs
//! - `adlgen check` - Validate an adlgen.toml project file

use adlgen_core::{ErrorCategory, GenError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod gomod;
mod load;
mod logging;
mod project;
mod run;

#[derive(Parser)]
#[command(name = "adlgen")]
#[command(author, version, about = "Go code generator for ADL schemas", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Inputs and overrides shared by the generating commands
#[derive(Args, Debug, Clone, Default)]
pub struct GenArgs {
    /// Combined module AST (JSON) produced by the schema compiler
    #[arg(short = 'I', long)]
    pub input: PathBuf,

    /// Output directory for generated code
    #[arg(short = 'O', long = "outputdir")]
    pub output: Option<PathBuf>,

    /// Go module path of the receiving project (default: read from go.mod)
    #[arg(long)]
    pub module_path: Option<String>,

    /// go.mod to read the module path from (default: searched upwards from the output directory)
    #[arg(long)]
    pub go_mod_file: Option<PathBuf>,

    /// Module prefix sourced from a bundle: module_prefix|import_root[|version]
    #[arg(long = "bundle-map")]
    pub bundle_maps: Vec<String>,

    /// Do not generate descriptor files
    #[arg(long)]
    pub exclude_ast: bool,

    /// Path to adlgen.toml (default: ./adlgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go code for every module in the input
    Generate {
        #[command(flatten)]
        args: GenArgs,
    },

    /// Generate capability service files
    Api {
        #[command(flatten)]
        args: GenArgs,

        /// Root api structs as module.Name (e.g. app.api.Root)
        #[arg(required = true)]
        roots: Vec<String>,
    },

    /// Validate an adlgen.toml project file
    Check {
        /// Path to adlgen.toml (default: ./adlgen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also load and resolve this combined module AST
        #[arg(short = 'I', long)]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let result = match cli.command {
        Commands::Generate { args } => run::generate(&args),
        Commands::Api { args, roots } => run::api(&args, &roots),
        Commands::Check { config, input } => run::check(config, input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit status by failure class; anything not raised by generation is 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GenError>().map(GenError::category) {
        Some(ErrorCategory::Resolution) => 2,
        Some(ErrorCategory::Shape) => 3,
        Some(ErrorCategory::Capability) => 4,
        Some(ErrorCategory::Config) => 5,
        Some(ErrorCategory::Io) => 6,
        None => 1,
    }
}
