//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use schemadoc_core::{RunOutcome, check, run};
use schemadoc_shared::{
    AppConfig, CatalogConfig, ExtractionMode, STDOUT_MARKER, Variant, init_config, load_config,
    load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// schemadoc — generate a Markdown catalog from annotated schema files.
#[derive(Parser)]
#[command(
    name = "schemadoc",
    version,
    about = "Generate a Markdown catalog of API and record schemas.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to <DIR>/schemadoc.toml).
    #[arg(long, global = true, env = "SCHEMADOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum VariantArg {
    Summary,
    Verbose,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Summary => Variant::Summary,
            VariantArg::Verbose => Variant::Verbose,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum ExtractionArg {
    Structured,
    LineScan,
}

impl From<ExtractionArg> for ExtractionMode {
    fn from(arg: ExtractionArg) -> Self {
        match arg {
            ExtractionArg::Structured => ExtractionMode::Structured,
            ExtractionArg::LineScan => ExtractionMode::LineScan,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the catalog.
    Generate {
        /// Directory holding the schema files.
        #[arg(default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Output file, relative to DIR (variant default otherwise).
        #[arg(short, long, conflicts_with = "stdout")]
        out: Option<String>,

        /// Print the catalog to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Exit non-zero when the catalog file is missing or out of date.
    Check {
        /// Directory holding the schema files.
        #[arg(default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Output file to compare against, relative to DIR.
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags shared by `generate` and `check`.
#[derive(clap::Args)]
pub(crate) struct Overrides {
    /// Generator preset.
    #[arg(long)]
    pub variant: Option<VariantArg>,

    /// Metadata extraction strategy.
    #[arg(long)]
    pub extraction: Option<ExtractionArg>,

    /// Project name for the catalog title.
    #[arg(long)]
    pub project: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default schemadoc.toml into DIR.
    Init {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Show resolved configuration.
    Show {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "schemadoc=info",
        1 => "schemadoc=debug",
        _ => "schemadoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Generate {
            dir,
            overrides,
            out,
            stdout,
        } => {
            let out = if stdout {
                Some(STDOUT_MARKER.to_string())
            } else {
                out
            };
            cmd_generate(&resolve(config_path, &dir, &overrides, out)?)
        }
        Command::Check {
            dir,
            overrides,
            out,
        } => cmd_check(&resolve(config_path, &dir, &overrides, out)?),
        Command::Config { action } => match action {
            ConfigAction::Init { dir } => cmd_config_init(&dir),
            ConfigAction::Show { dir } => cmd_config_show(config_path, &dir),
        },
    }
}

/// Merge CLI flags over the config file.
fn resolve(
    config_path: Option<&Path>,
    dir: &Path,
    overrides: &Overrides,
    out: Option<String>,
) -> Result<CatalogConfig> {
    let mut app = load_app_config(config_path, dir)?;

    if let Some(variant) = overrides.variant {
        app.variant = variant.into();
    }
    if let Some(extraction) = overrides.extraction {
        app.extraction = extraction.into();
    }
    if let Some(project) = &overrides.project {
        app.project = project.clone();
    }
    if out.is_some() {
        app.output = out;
    }

    Ok(CatalogConfig::resolve(dir, &app))
}

fn load_app_config(config_path: Option<&Path>, dir: &Path) -> Result<AppConfig> {
    let app = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(dir)?,
    };
    Ok(app)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_generate(config: &CatalogConfig) -> Result<()> {
    let report = run(config)?;

    match report.outcome {
        RunOutcome::Stdout => print!("{}", report.catalog.markdown),
        RunOutcome::Written(outcome) => {
            let state = if outcome.unchanged { "unchanged" } else { "written" };
            println!(
                "{} {state}: {} APIs, {} records ({} bytes, sha256 {})",
                outcome.path.display(),
                report.catalog.api_count,
                report.catalog.record_count,
                outcome.bytes,
                &outcome.sha256[..12],
            );
        }
    }

    info!(elapsed_ms = report.elapsed.as_millis() as u64, "done");
    Ok(())
}

fn cmd_check(config: &CatalogConfig) -> Result<()> {
    let report = check(config)?;
    if report.stale {
        return Err(eyre!(
            "catalog for {} is out of date; run `schemadoc generate`",
            config.schema_dir.display()
        ));
    }
    println!(
        "Catalog up to date ({} APIs, {} records).",
        report.catalog.api_count, report.catalog.record_count
    );
    Ok(())
}

fn cmd_config_init(dir: &Path) -> Result<()> {
    let path = init_config(dir)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>, dir: &Path) -> Result<()> {
    let app = load_app_config(config_path, dir)?;
    let toml_str = toml::to_string_pretty(&app)?;
    println!("{toml_str}");

    let resolved = CatalogConfig::resolve(dir, &app);
    println!("# resolved");
    println!("# suffix = {:?}", resolved.suffix);
    println!("# records_heading = {:?}", resolved.records_heading);
    println!("# output = {:?}", resolved.output);
    Ok(())
}
