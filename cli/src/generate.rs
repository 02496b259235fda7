#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads the method registry, the base specification and the extras overlay,
//! and writes the consolidated routes table.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use routegen_core::{
    generate_routes, load_document, load_optional_document, AppError, AppResult, MethodRegistry,
    PathSpec,
};

/// Arguments for the generate command.
///
/// Every default matches the project layout, so a bare invocation works.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the method registry (URL -> HTTP method -> namespace -> method name).
    #[clap(long, env = "ROUTEGEN_METHODS_LIST", default_value = "src/routes/methods-list.json")]
    pub methods_list: PathBuf,

    /// Path to the base path specification.
    #[clap(long, env = "ROUTEGEN_SPEC", default_value = "specification/paths.json")]
    pub spec: PathBuf,

    /// Path to the extras overlay. A missing file is treated as empty.
    #[clap(
        long,
        env = "ROUTEGEN_EXTRAS",
        default_value = "specification/extras/paths.json"
    )]
    pub extras: PathBuf,

    /// Output path for the routes table.
    #[clap(long, env = "ROUTEGEN_OUTPUT", default_value = "src/routes/routes.json")]
    pub output: PathBuf,

    /// Print the routes table to stdout instead of writing it.
    #[clap(long)]
    pub dry_run: bool,

    /// Fail if the routes file on disk differs from the generated table.
    #[clap(long, conflicts_with = "dry_run")]
    pub check: bool,
}

/// Executes the generation.
///
/// Input is fully validated before anything is written: a duplicate method name
/// leaves the existing routes file untouched.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    if !args.methods_list.exists() {
        return Err(AppError::General(format!(
            "Methods list not found: {:?}",
            args.methods_list
        )));
    }
    if !args.spec.exists() {
        return Err(AppError::General(format!(
            "Specification not found: {:?}",
            args.spec
        )));
    }

    // 1. Load inputs
    let registry: MethodRegistry = load_document(&args.methods_list)?;
    let base: PathSpec = load_document(&args.spec)?;
    let extras: PathSpec = load_optional_document(&args.extras)?;
    tracing::debug!(
        urls = base.paths.len(),
        extras = extras.paths.len(),
        "Loaded specifications"
    );

    // 2. Build & render
    let rendered = generate_routes(&registry, &base, &extras)?;

    // 3. Emit
    if args.dry_run {
        print!("{}", rendered);
        return Ok(());
    }

    if args.check {
        if read_existing(&args.output)? != rendered {
            return Err(AppError::OutOfDate(args.output.clone()));
        }
        tracing::info!(path = ?args.output, "Routes table is up to date");
        return Ok(());
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::General(format!("Failed to create output dir: {}", e)))?;
        }
    }

    fs::write(&args.output, rendered)
        .map_err(|e| AppError::General(format!("Failed to write routes file: {}", e)))?;

    tracing::info!(path = ?args.output, "Generated routes table");

    Ok(())
}

/// Reads the current routes file; a file that does not exist yet reads as empty.
fn read_existing(path: &Path) -> AppResult<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}
