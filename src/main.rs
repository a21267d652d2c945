//! pgnopts - resolve the arguments of a PGN extraction run.
//!
//! Main entry point for the command-line tool.
//!
//! # Execution Flow
//!
//! 1. Load tool settings (`pgnopts.yaml` in `$PGNOPTS_CONFIG_DIR` or the
//!    current directory, then `PGNOPTS_*` and `ECO_FILE` from the environment)
//! 2. Initialize logging from those settings
//! 3. Resolve the command line, including any argument files it names
//! 4. On success print a summary of the resolved run; on failure write the
//!    message to the diagnostic destination
//!
//! The process exits with 0 on success or `--version`, 1 on any usage,
//! conflict or file error (and after `--help`), and -1 on an internal error.

use anyhow::Result;
use pgnopts::models::{LogTarget, NonMatchingTarget};
use pgnopts::services::{SourceKind, usage_text};
use pgnopts::{APP_NAME, ArgsError, ArgumentResolver, ConfigManager, Registry, RunConfig, VERSION};

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", APP_NAME, e);
            1
        }
    };
    std::process::exit(code);
}

/// Resolve the arguments and return the exit status.
///
/// The logging guard lives until this returns, so the log is flushed before
/// the process exits.
fn run() -> Result<i32> {
    let config_dir = std::env::var("PGNOPTS_CONFIG_DIR").unwrap_or_else(|_| ".".to_string());
    let settings = ConfigManager::new(config_dir.as_str()).load_settings()?;
    let _guard = pgnopts::logging::setup_logging(&settings)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = RunConfig::default();
    let mut registry = Registry::new();

    let outcome =
        ArgumentResolver::new(&mut config, &mut registry, &settings).resolve_command_line(&args);

    let code = match outcome {
        Ok(()) => {
            println!("{}", summary(&config, &registry));
            0
        }
        Err(ArgsError::HelpRequested) => {
            config.diagnostic(usage_text());
            1
        }
        Err(e @ ArgsError::VersionRequested(_)) => {
            println!("{}", e);
            e.exit_code()
        }
        Err(e) => {
            tracing::debug!("Argument resolution failed: {}", e);
            config.diagnostic(&e);
            e.exit_code()
        }
    };

    tracing::info!("Exiting with status {}", code);
    Ok(code)
}

/// A short description of the resolved run.
fn summary(config: &RunConfig, registry: &Registry) -> String {
    let output = config
        .output_filename()
        .map_or_else(|| "stdout".to_string(), |path| path.to_string());
    let log = match &config.log {
        LogTarget::Stderr => "stderr".to_string(),
        LogTarget::File(target) => target.path().to_string(),
    };

    let mut lines = vec![
        format!(
            "sources: {} game files, {} check files",
            registry.source_files(SourceKind::Normal).count(),
            registry.source_files(SourceKind::Check).count()
        ),
        format!("output: {} ({:?})", output, config.output_format),
        format!("diagnostics: {}", log),
    ];

    if config.ply_bounds.active {
        lines.push(format!(
            "ply bounds: {}..={}",
            config.ply_bounds.lower, config.ply_bounds.upper
        ));
    }
    if let Some(non_matching) = &config.non_matching {
        let target = match non_matching {
            NonMatchingTarget::Stdout => "stdout".to_string(),
            NonMatchingTarget::File(target) => target.path().to_string(),
        };
        lines.push(format!("non-matching games: {}", target));
    }

    let criteria = registry.tag_criteria.len()
        + registry.textual_variations.len()
        + registry.positional_variations.len()
        + registry.materials.len()
        + registry.fen_patterns.len()
        + registry.polyglot_hashes.len();
    lines.push(format!("match criteria: {}", criteria));

    lines.join("\n")
}
