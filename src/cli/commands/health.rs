use serde_json::Value;

use crate::cli::client::DeskClient;
use crate::cli::utils::{field, output_data};
use crate::cli::OutputFormat;

pub async fn handle(client: &DeskClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let data = client.get(&["health"], None).await?;
    output_data(&output_format, &data, |health| {
        let mut lines = vec![format!("Status: {}", field(health, "status"))];
        for db in health.get("databases").and_then(Value::as_array).into_iter().flatten() {
            lines.push(format!("  {} {}: {}", field(db, "region"), field(db, "kind"), field(db, "status")));
        }
        lines
    })
}
