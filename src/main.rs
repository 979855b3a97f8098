use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gas_dts::batch::{convert_files, Output};
use gas_dts::config::GasDtsConfig;
use gas_dts::diagnostic::{report_download_error, report_file_error, report_summary};
use gas_dts::download::download_all;
use gas_dts::{Converter, Definition};

/// Environment variable holding a log level or a full filter spec.
const LOG_ENV: &str = "GAS_DTS_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "gas-dts",
    version,
    about = "Generate TypeScript declarations for Google Apps Script advanced services"
)]
struct Cli {
    /// Enable verbose debug logging (or set GAS_DTS_LOG=debug)
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (default: gas-dts.toml in the current directory, if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download API definitions to destination directory
    Download {
        /// Destination directory
        #[arg(default_value = "definitions")]
        destination: PathBuf,
        /// Only download these services (by id, e.g. `People`); repeatable
        #[arg(long = "api", value_name = "ID")]
        apis: Vec<String>,
    },
    /// Convert definition JSON files to `.d.ts` declarations
    Convert {
        /// Definition files to convert
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory (stdout if omitted)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// List the registered advanced services
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = GasDtsConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Download { destination, apis } => run_download(&config, destination, &apis),
        Command::Convert { files, output } => run_convert(&config, &files, output),
        Command::List => {
            run_list(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_download(config: &GasDtsConfig, destination: PathBuf, apis: &[String]) -> Result<ExitCode> {
    let registry = config.registry();
    let definitions: Vec<Definition> = if apis.is_empty() {
        registry.definitions().to_vec()
    } else {
        apis.iter()
            .map(|id| {
                registry
                    .find(id)
                    .cloned()
                    .with_context(|| format!("unknown service `{id}` (see `gas-dts list`)"))
            })
            .collect::<Result<_>>()?
    };

    info!("Download API definitions to {}", destination.display());
    fs::create_dir_all(&destination).with_context(|| {
        format!("failed to create destination directory: {}", destination.display())
    })?;

    let results = download_all(&definitions, &destination)?;
    let mut failed = 0;
    for downloaded in &results {
        match &downloaded.result {
            Ok(path) => println!("{} -> {}", downloaded.id, path.display()),
            Err(err) => {
                failed += 1;
                report_download_error(&downloaded.id, err);
            }
        }
    }

    if failed > 0 {
        report_summary(failed, results.len());
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_convert(
    config: &GasDtsConfig,
    files: &[PathBuf],
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    if files.is_empty() {
        bail!("no input files given");
    }

    let registry = config.registry();
    let converter = Converter::new(&registry, config.convert_options())?;

    if let Some(dir) = &output {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let outcomes = convert_files(&converter, files, output.as_deref());
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(Output::Text(text)) => print!("{text}"),
            Ok(Output::Written(path)) => {
                println!("{} -> {}", outcome.input.display(), path.display())
            }
            Err(err) => {
                failed += 1;
                report_file_error(&outcome.input, err);
            }
        }
    }

    if failed > 0 {
        report_summary(failed, outcomes.len());
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_list(config: &GasDtsConfig) {
    let registry = config.registry();
    for def in registry.definitions() {
        println!(
            "{:<22} {:<24} {:<26} {}",
            def.id,
            def.inner_name.as_deref().unwrap_or("-"),
            def.abbreviated_name.as_deref().unwrap_or("-"),
            def.url
        );
    }
}

fn init_tracing(debug: bool) {
    let crate_root = "gas_dts";
    let filter = if debug {
        format!("{crate_root}=debug")
    } else {
        match env::var(LOG_ENV) {
            Ok(level) if is_plain_level(&level) => format!("{crate_root}={level}"),
            Ok(spec) => spec,
            Err(_) => format!("{crate_root}=info"),
        }
    };

    if tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}
