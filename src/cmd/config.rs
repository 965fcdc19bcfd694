use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::error::{AppError, AppResult};
use crate::services::ExportFormat;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring tickex.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    apply_prompt(
        &mut input,
        &mut stdout,
        "Default export format (text/csv/json)",
        &mut cfg.default_format,
    )?;
    if let Some(format) = cfg.default_format.as_deref() {
        if ExportFormat::from_str(format).is_none() {
            return Err(AppError::Configuration(format!(
                "unknown export format '{format}'"
            )));
        }
    }
    apply_prompt(
        &mut input,
        &mut stdout,
        "Directory for exported files",
        &mut cfg.output_dir,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Default export format: {}", display_value(&cfg.default_format));
    println!("Output directory: {}", display_value(&cfg.output_dir));

    Ok(())
}

fn apply_prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: &str,
    target: &mut Option<String>,
) -> AppResult<()> {
    match prompt(input, output, field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: &str,
    current: Option<&str>,
) -> AppResult<PromptAction> {
    match current {
        Some(value) => write!(output, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(output, "{field} (Enter to skip): ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
