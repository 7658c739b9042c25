use serde_json::Value;

use crate::cli::OutputFormat;

/// Print the API payload: pretty JSON, or the text lines produced by `summary`
pub fn output_data<F>(output_format: &OutputFormat, data: &Value, summary: F) -> anyhow::Result<()>
where
    F: FnOnce(&Value) -> Vec<String>,
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => {
            for line in summary(data) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// String field or `-`
pub fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

/// One-line-per-environment summary of an account snapshot
pub fn account_summary(account: &Value) -> Vec<String> {
    let mut lines = vec![
        format!("Account: {} ({})", field(account, "name"), field(account, "id")),
        format!("Region: {}", field(account, "region")),
    ];

    let vendors = account.get("vendors").and_then(Value::as_array).cloned().unwrap_or_default();
    lines.push(format!("Environments: {}", vendors.len()));
    for vendor in &vendors {
        let tenants = vendor.get("tenants").and_then(Value::as_array).map_or(0, Vec::len);
        lines.push(format!(
            "  {} {} ({} tenants)",
            field(vendor, "id"),
            field(vendor, "env_name"),
            tenants
        ));
    }
    lines
}
