use serde_json::{json, Value};

use crate::cli::client::DeskClient;
use crate::cli::utils::{field, output_data};
use crate::cli::OutputFormat;

pub async fn remove_trial(
    client: &DeskClient,
    vendor_id: &str,
    region: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let data = client
        .post(&["api", "remove_trial"], &json!({ "vendorId": vendor_id, "region": region }))
        .await?;
    output_data(&output_format, &data, |removal| {
        let status = removal.get("status_code").and_then(Value::as_u64).unwrap_or_default();
        let verdict = if removal.get("success").and_then(Value::as_bool) == Some(true) {
            "✓ Trial removed"
        } else {
            "✗ Trial removal rejected"
        };
        vec![format!(
            "{} for tenant {} (configuration {}, status {})",
            verdict,
            field(removal, "tenant_id"),
            field(removal, "configuration_id"),
            status
        )]
    })
}

pub async fn white_label(
    client: &DeskClient,
    vendor_id: &str,
    enabled: bool,
    all_environments: bool,
    region: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let body = json!({
        "vendorId": vendor_id,
        "enabled": enabled,
        "allEnvironments": all_environments,
        "region": region,
    });
    let data = client.post(&["api", "white_label"], &body).await?;
    output_data(&output_format, &data, |outcomes| {
        outcomes
            .as_array()
            .into_iter()
            .flatten()
            .map(|o| {
                let mark = if o.get("success").and_then(Value::as_bool) == Some(true) { "✓" } else { "✗" };
                let detail = match o.get("status_code").and_then(Value::as_u64) {
                    Some(code) => code.to_string(),
                    None => field(o, "error").to_string(),
                };
                format!("{} {} [{}] {}", mark, field(o, "vendor_id"), field(o, "region"), detail)
            })
            .collect()
    })
}
