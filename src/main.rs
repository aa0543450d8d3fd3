//! jardiff: version resolution and semantic diff for deployed Java artifacts.
//!
//! Collapses raw per-service artifact sightings into ordered versions and
//! compares the decompiled source of any two versions.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use jardiff::{
    cli::{self, exit_codes},
    config::{file::load_or_default, Validatable},
    model::ArtifactKind,
    reports::ReportFormat,
    resolve::EquivalencePolicy,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jardiff")]
#[command(version)]
#[command(about = "Version resolution and semantic diff for deployed Java artifacts", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected
    1  Changes detected
    3  Error occurred

EXAMPLES:
    # Record a service's deployed artifacts
    jardiff ingest listing.txt --service billing

    # Assign version numbers to every jar
    jardiff resolve --kind jar

    # Compare two versions of one artifact
    jardiff diff --name billing-core.jar --from 1 --to 3 -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the store snapshot file
    #[arg(long, global = true, env = "JARDIFF_STORE", default_value = "jardiff-store.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file listing into observations for one service
    Ingest {
        /// Path to an `ls -l`-style listing of deployed files
        listing: PathBuf,

        /// Service the listing was taken from
        #[arg(short, long)]
        service: String,

        /// Environment the service runs in
        #[arg(short, long, default_value = "prod")]
        environment: String,
    },

    /// Assign version numbers to recorded observations
    Resolve {
        /// Artifact name to resolve (all names of the kind if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Artifact kind: jar or class
        #[arg(short, long, default_value = "jar")]
        kind: String,

        /// Equivalence policy: size or content-hash (config default if omitted)
        #[arg(short, long)]
        policy: Option<String>,
    },

    /// Compare two resolved versions of one artifact
    Diff {
        /// Artifact name to compare
        #[arg(short, long)]
        name: String,

        /// Artifact kind: jar or class
        #[arg(short, long, default_value = "jar")]
        kind: String,

        /// Baseline version number
        #[arg(long)]
        from: u32,

        /// Target version number
        #[arg(long)]
        to: u32,

        /// Output format: json or summary
        #[arg(short = 'o', long, default_value = "summary")]
        format: String,
    },

    /// Print store statistics
    Stats,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let (config, loaded_from) = load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration: {}", joined.join("; "));
    }

    let colored = !cli.no_color && std::env::var_os("NO_COLOR").is_none();

    let code = match cli.command {
        Commands::Ingest {
            listing,
            service,
            environment,
        } => cli::run_ingest(&cli.store, &listing, &service, &environment, &config)?,

        Commands::Resolve { name, kind, policy } => {
            let kind = parse_kind(&kind)?;
            let policy = match policy {
                Some(name) => parse_policy(&name)?,
                None => config.resolve.equivalence,
            };
            cli::run_resolve(&cli.store, name.as_deref(), kind, policy)?
        }

        Commands::Diff {
            name,
            kind,
            from,
            to,
            format,
        } => {
            let kind = parse_kind(&kind)?;
            let Some(format) = ReportFormat::from_name(&format) else {
                bail!("unknown output format '{format}' (expected json or summary)");
            };
            cli::run_diff(&cli.store, &name, kind, from, to, format, colored, &config)?
        }

        Commands::Stats => cli::run_stats(&cli.store)?,
    };

    Ok(code)
}

fn parse_kind(s: &str) -> Result<ArtifactKind> {
    match s.to_lowercase().as_str() {
        "jar" => Ok(ArtifactKind::Jar),
        "class" => Ok(ArtifactKind::Class),
        other => bail!("unknown artifact kind '{other}' (expected jar or class)"),
    }
}

fn parse_policy(s: &str) -> Result<EquivalencePolicy> {
    match s.to_lowercase().as_str() {
        "size" => Ok(EquivalencePolicy::Size),
        "content-hash" | "content_hash" | "hash" => Ok(EquivalencePolicy::ContentHash),
        other => bail!("unknown equivalence policy '{other}' (expected size or content-hash)"),
    }
}
