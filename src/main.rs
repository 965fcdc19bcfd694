use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use tickex::cmd::config::{self as config_cmd, ConfigArgs};
use tickex::cmd::extract::{self, ExtractCommandArgs};
use tickex::config::AppConfig;
use tickex::context::AppContext;
use tickex::error::{AppError, AppResult};
use tickex::infra::fs::LocalFs;
use tickex::logging::{Verbosity, init_logging};
use tickex::services::ExportFormat;
use tickex::workflow::extract::ExportDestination;

#[derive(Parser)]
#[command(name = "tickex", author, version, about = "Pull ticket records out of HTML export dumps")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tickets from an HTML export and print or save them.
    Extract(ExtractArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// HTML export dump to read.
    file: PathBuf,
    /// Output format (text, csv, json). Defaults to the configured format.
    #[arg(short, long, value_parser = parse_format)]
    format: Option<ExportFormat>,
    /// Write the export to this path instead of the default location.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print to stdout even for formats that normally go to a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_str(value).ok_or_else(|| format!("unknown format '{value}'"))
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose, cli.quiet))?;

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Extract(args) => run_extract(args).await,
    }
}

async fn run_extract(args: ExtractArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd).or_else(|err| match err {
        AppError::Configuration(reason) if args.format.is_some() => {
            warn!("ignoring stored configuration: {reason}");
            Ok(AppConfig {
                default_format: ExportFormat::default(),
                output_dir: None,
                workspace_root: cwd.clone(),
            })
        }
        other => Err(other),
    })?;

    let context = AppContext::new(config, Arc::new(LocalFs::new()));

    let outcome = extract::run(
        &context,
        ExtractCommandArgs {
            input: args.file,
            format: args.format,
            output: args.output,
            stdout: args.stdout,
        },
    )
    .await?;

    match &outcome.destination {
        ExportDestination::Skipped => {
            eprintln!("No ticket information found in the file.");
        }
        ExportDestination::Stdout => {
            println!("{}", outcome.rendered.trim_end());
        }
        ExportDestination::File(path) => {
            println!(
                "Exported {} ticket(s) as {} to {}",
                outcome.tickets.len(),
                outcome.format.as_str(),
                path.display()
            );
        }
    }

    Ok(())
}
