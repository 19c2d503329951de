//! LLM proxy key and plan commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::types::UserId;
use notehub_service::LlmProxyClient;

/// Arguments for plan commands
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Plan subcommand
    #[command(subcommand)]
    pub command: PlanCommand,
}

/// Plan subcommands
#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Mint a proxy key for a user
    GenerateKey {
        /// User ID
        user: String,
        /// Plan name
        #[arg(short, long, default_value = "free")]
        plan: String,
        /// Email recorded in the key metadata
        #[arg(long)]
        email: Option<String>,
    },
    /// Move a key to another plan
    Upgrade {
        /// Proxy key
        key: String,
        /// Plan name
        #[arg(short, long, default_value = "pro")]
        plan: String,
    },
    /// Add budget (USD) to a key
    TopUp {
        /// Proxy key
        key: String,
        /// Amount in USD
        amount: f64,
    },
    /// Show spend and budget of a key
    Usage {
        /// Proxy key
        key: String,
    },
}

/// Key usage display row
#[derive(Debug, Serialize, Tabled)]
struct UsageRow {
    /// Plan
    plan: String,
    /// Spend (USD)
    spend: String,
    /// Budget (USD)
    budget: String,
}

/// Execute plan commands
pub async fn execute(
    args: &PlanArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = LlmProxyClient::new(&config.llm_proxy)?;

    match &args.command {
        PlanCommand::GenerateKey { user, plan, email } => {
            let user = UserId::parse(user)?;
            let key = client.generate_key(&user, plan, email.as_deref()).await?;
            output::print_success(&format!("Generated '{plan}' key for user {user}"));
            output::print_kv("Key", &key);
        }
        PlanCommand::Upgrade { key, plan } => {
            client.upgrade_plan(key, plan).await?;
            output::print_success(&format!("Key moved to plan '{plan}'"));
        }
        PlanCommand::TopUp { key, amount } => {
            let budget = client.top_up_budget(key, *amount).await?;
            output::print_success(&format!("Budget is now ${budget:.2}"));
        }
        PlanCommand::Usage { key } => {
            let usage = client.usage(key).await?;
            let row = UsageRow {
                plan: usage.plan,
                spend: format!("{:.4}", usage.spend),
                budget: format!("{:.2}", usage.max_budget),
            };
            output::print_list(&[row], format);
        }
    }

    Ok(())
}
