//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets omitted)
    Show,
    /// Validate the configuration and print a summary
    Validate,
}

/// Execute config commands. Loading already validated the configuration.
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = shown.database.redacted_url();
            if !shown.storage.s3.secret_key.is_empty() {
                shown.storage.s3.secret_key = "****".to_string();
            }
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Database", &config.database.redacted_url());
            output::print_kv("Storage", &config.storage.provider);
            output::print_kv("LLM proxy", &config.llm_proxy.base_url);
            output::print_kv(
                "Audio",
                if config.audio.enabled {
                    &config.audio.ffmpeg_path
                } else {
                    "disabled"
                },
            );
            if config.llm_proxy.master_key.is_none() {
                output::print_warning("llm_proxy.master_key is not set");
            }
        }
    }

    Ok(())
}
