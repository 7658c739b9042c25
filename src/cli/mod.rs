pub mod client;
pub mod commands;
pub mod utils;

use clap::{ArgGroup, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::DeskClient;

#[derive(Parser)]
#[command(name = "desk")]
#[command(about = "Desk CLI - support lookups and account administration")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "DESK_SERVER",
        default_value = "http://localhost:3000",
        help = "Base URL of the Support Desk API"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Find which region holds a vendor or tenant")]
    Region {
        #[arg(value_parser = ["vendor", "tenant"], help = "Identifier kind")]
        id_type: String,
        #[arg(help = "Vendor or tenant id")]
        id: String,
    },

    #[command(about = "Full account snapshot")]
    Account {
        #[command(subcommand)]
        cmd: commands::lookup::AccountCommands,
    },

    #[command(about = "SSO domains, configs and SAML groups of a vendor")]
    Sso {
        #[arg(help = "Vendor id")]
        vendor_id: String,
    },

    #[command(about = "Role keys of a user in a tenant")]
    Roles {
        #[arg(help = "User id")]
        user_id: String,
        #[arg(help = "Tenant id")]
        tenant_id: String,
        #[arg(long, help = "Region to search (default: all)")]
        region: Option<String>,
    },

    #[command(about = "Take an account out of trial")]
    RemoveTrial {
        #[arg(help = "Vendor id")]
        vendor_id: String,
        #[arg(long, help = "Region to search (default: all)")]
        region: Option<String>,
    },

    #[command(about = "Enable or disable white-label mode")]
    #[command(group(ArgGroup::new("mode").required(true).args(["enable", "disable"])))]
    WhiteLabel {
        #[arg(help = "Vendor id")]
        vendor_id: String,
        #[arg(long)]
        enable: bool,
        #[arg(long)]
        disable: bool,
        #[arg(long, help = "Apply to every environment of the account")]
        all_environments: bool,
        #[arg(long, help = "Region to search (default: all)")]
        region: Option<String>,
    },

    #[command(about = "Check API and regional database health")]
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = DeskClient::new(&cli.server)?;

    match cli.command {
        Commands::Region { id_type, id } => commands::lookup::region(&client, &id_type, &id, output_format).await,
        Commands::Account { cmd } => commands::lookup::account(&client, cmd, output_format).await,
        Commands::Sso { vendor_id } => commands::lookup::sso(&client, &vendor_id, output_format).await,
        Commands::Roles {
            user_id,
            tenant_id,
            region,
        } => commands::lookup::roles(&client, &user_id, &tenant_id, region, output_format).await,
        Commands::RemoveTrial { vendor_id, region } => {
            commands::admin::remove_trial(&client, &vendor_id, region, output_format).await
        }
        Commands::WhiteLabel {
            vendor_id,
            enable,
            disable: _,
            all_environments,
            region,
        } => commands::admin::white_label(&client, &vendor_id, enable, all_environments, region, output_format).await,
        Commands::Health => commands::health::handle(&client, output_format).await,
    }
}
