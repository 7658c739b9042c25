use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::DeskClient;
use crate::cli::utils::{account_summary, field, output_data};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AccountCommands {
    #[command(about = "Look up by vendor (environment) id")]
    Vendor {
        id: String,
        #[arg(long, help = "Region to search (default: all)")]
        region: Option<String>,
    },

    #[command(about = "Look up by tenant id")]
    Tenant {
        id: String,
        #[arg(long, help = "Region to search (default: all)")]
        region: Option<String>,
    },

    #[command(about = "Look up by customer email")]
    Email {
        email: String,
        #[arg(long, help = "Region to search (default: all)")]
        region: Option<String>,
    },

    #[command(about = "Look up by support ticket number")]
    Ticket { ticket: String },
}

pub async fn region(client: &DeskClient, id_type: &str, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let data = client
        .post(&["api", "region"], &json!({ "selectedOption": id_type, "queryId": id }))
        .await?;
    output_data(&output_format, &data, |row| {
        vec![format!("{} {} is in {}", id_type, id, field(row, "region"))]
    })
}

pub async fn account(client: &DeskClient, cmd: AccountCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let data = match cmd {
        AccountCommands::Vendor { id, region } => {
            client.get(&["api", "accounts", "vendor", &id], region.as_deref()).await?
        }
        AccountCommands::Tenant { id, region } => {
            client.get(&["api", "accounts", "tenant", &id], region.as_deref()).await?
        }
        AccountCommands::Email { email, region } => {
            client.get(&["api", "accounts", "email", &email], region.as_deref()).await?
        }
        AccountCommands::Ticket { ticket } => client.get(&["api", "accounts", "ticket", &ticket], None).await?,
    };
    output_data(&output_format, &data, account_summary)
}

pub async fn sso(client: &DeskClient, vendor_id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let data = client.get(&["api", "vendors", vendor_id, "sso"], None).await?;
    output_data(&output_format, &data, |report| {
        let mut lines = vec![format!("Vendor {} in {}", vendor_id, field(report, "region"))];
        for domain in report.get("domains").and_then(Value::as_array).into_iter().flatten() {
            let configs = domain.get("sso_configs").and_then(Value::as_array).map_or(0, Vec::len);
            let groups = domain.get("saml_groups").and_then(Value::as_array).map_or(0, Vec::len);
            lines.push(format!(
                "  {}: {} configs, {} SAML groups",
                field(domain, "domain"),
                configs,
                groups
            ));
        }
        lines
    })
}

pub async fn roles(
    client: &DeskClient,
    user_id: &str,
    tenant_id: &str,
    region: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let data = client
        .post(
            &["api", "roles"],
            &json!({ "userId": user_id, "tenantId": tenant_id, "region": region }),
        )
        .await?;
    output_data(&output_format, &data, |found| {
        let roles: Vec<&str> = found
            .get("roles")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .collect();
        if roles.is_empty() {
            vec![format!("User {} has no roles in tenant {}", user_id, tenant_id)]
        } else {
            vec![format!("{} ({})", roles.join(", "), field(found, "region"))]
        }
    })
}
