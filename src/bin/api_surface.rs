//! Public API surface snapshot tool.
//!
//! Runs one analysis session over a catalog dump (the serialized output of a
//! type checker) and writes the snapshot artifact.
//!
//! ## Configuration
//!
//! Environment variables (flags override them):
//! - `API_SURFACE_INCLUDES`, `API_SURFACE_EXCLUDES`: comma-separated prefixes
//! - `API_SURFACE_OUTFILE`: snapshot path (default: .public_api)
//! - `API_SURFACE_DERIVE_OUTFILE`: derivation artifact path (default: disabled)
//! - `API_SURFACE_PROFILE`: minimal or full-string (default: minimal)
//! - `API_SURFACE_STRICT`, `API_SURFACE_DEBUG`: 1/true/yes/on
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! api_surface catalog.json --includes pkg --excludes pkg.internal --out .public_api
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api_surface::policy::parse_prefix_list;
use api_surface::{
    CatalogDump, LifecycleHooks, Profile, Session, SessionError, SurfaceConfig, UnsupportedPolicy,
};

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Field-level records
    Minimal,
    /// One descriptive string per entity
    FullString,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Minimal => Profile::Minimal,
            ProfileArg::FullString => Profile::FullString,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "api_surface",
    about = "Derive the public API surface of a typed codebase from a catalog dump",
    version
)]
struct Cli {
    /// Path to the catalog dump (JSON)
    dump: PathBuf,

    /// Comma-separated module prefixes to analyze
    #[arg(long)]
    includes: Option<String>,

    /// Comma-separated name prefixes to prune from the surface
    #[arg(long)]
    excludes: Option<String>,

    /// Snapshot output path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Derivation artifact output path
    #[arg(long)]
    derive_out: Option<PathBuf>,

    /// Snapshot profile
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Fail on entity or type kinds that are not modeled
    #[arg(long)]
    strict: bool,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self, base: SurfaceConfig) -> SurfaceConfig {
        let mut config = base;
        if let Some(raw) = &self.includes {
            config = config.with_includes(parse_prefix_list(raw));
        }
        if let Some(raw) = &self.excludes {
            config = config.with_excludes(parse_prefix_list(raw));
        }
        if let Some(out) = self.out {
            config = config.with_output_path(out);
        }
        if let Some(path) = self.derive_out {
            config = config.with_derivation_output_path(path);
        }
        if let Some(profile) = self.profile {
            config = config.with_profile(profile.into());
        }
        if self.strict {
            config = config.with_unsupported(UnsupportedPolicy::Strict);
        }
        if self.debug {
            config = config.with_debug_logging(true);
        }
        config
    }
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing(debug: bool) {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let default_level = if debug { "api_surface=debug" } else { "api_surface=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<(), SessionError> {
    let dump_path = cli.dump.clone();
    let config = cli.into_config(SurfaceConfig::from_env());
    init_tracing(config.debug_logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        dump = %dump_path.display(),
        "Starting api_surface"
    );

    let dump = CatalogDump::from_path(&dump_path)?;
    info!(
        modules = dump.modules.len(),
        entities = dump.catalog.len(),
        "Catalog dump loaded"
    );

    let mut session = Session::new(config);
    for module in &dump.modules {
        session.on_module_processed(module.module.as_str(), &module.declarations);
    }
    let snapshot = session.on_run_finalized(&dump.catalog)?;

    info!(
        entries = snapshot.len(),
        path = %session.config().output_path.display(),
        "Public surface written"
    );
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "api_surface failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
