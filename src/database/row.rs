use serde_json::{Map, Number, Value};
use sqlx::mysql::MySqlRow;
use sqlx::types::BigDecimal;
use sqlx::{Column, Row as _, TypeInfo};

/// A result row reshaped into `column name -> value`, in column order
pub type Row = Map<String, Value>;

/// Reshape a MySQL row into a JSON object, decoding each column by its type
pub fn row_to_json(row: &MySqlRow) -> Row {
    let mut map = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, idx, column.type_info().name());
        map.insert(column.name().to_string(), value);
    }
    map
}

fn decode_column(row: &MySqlRow, idx: usize, type_name: &str) -> Value {
    let type_name = type_name.to_ascii_uppercase();

    let typed: Result<Value, sqlx::Error> = match type_name.as_str() {
        "NULL" => Ok(Value::Null),
        "BOOLEAN" => row.try_get::<Option<bool>, _>(idx).map(|v| v.map(Value::Bool).unwrap_or(Value::Null)),
        t if t.ends_with("UNSIGNED") => row
            .try_get::<Option<u64>, _>(idx)
            .map(|v| v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null)),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(idx)
            .map(|v| v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null)),
        "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(idx)
            .map(|v| v.and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null)),
        "DECIMAL" => row
            .try_get::<Option<BigDecimal>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null)),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null)),
        "TIME" => row
            .try_get::<Option<chrono::NaiveTime>, _>(idx)
            .map(|v| v.map(|t| Value::String(t.to_string())).unwrap_or(Value::Null)),
        "DATETIME" => row.try_get::<Option<chrono::NaiveDateTime>, _>(idx).map(|v| {
            v.map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
                .unwrap_or(Value::Null)
        }),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)
            .map(|v| v.map(|dt| Value::String(dt.to_rfc3339())).unwrap_or(Value::Null)),
        "JSON" => row.try_get::<Option<Value>, _>(idx).map(|v| v.unwrap_or(Value::Null)),
        "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" | "BIT" => bytes_value(row, idx),
        _ => row.try_get::<Option<String>, _>(idx).map(|v| v.map(Value::String).unwrap_or(Value::Null)),
    };

    match typed {
        Ok(value) => value,
        Err(first) => {
            // Fall back to text, then raw bytes, before giving up on the column
            row.try_get::<Option<String>, _>(idx)
                .map(|v| v.map(Value::String).unwrap_or(Value::Null))
                .or_else(|_| bytes_value(row, idx))
                .unwrap_or_else(|_| {
                    tracing::warn!("Could not decode column {} of type {}: {}", idx, type_name, first);
                    Value::Null
                })
        }
    }
}

fn bytes_value(row: &MySqlRow, idx: usize) -> Result<Value, sqlx::Error> {
    row.try_get::<Option<Vec<u8>>, _>(idx).map(|v| {
        v.map(|bytes| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null)
    })
}

/// Loosely-typed accessors over reshaped rows.
///
/// Columns arrive with whatever type the schema gives them, so ids may be
/// strings or integers and flags may be booleans or 0/1.
pub trait RowExt {
    fn value_of(&self, key: &str) -> Option<&Value>;

    /// Column as a string; numbers and booleans are stringified, null and
    /// empty strings become `None`
    fn string(&self, key: &str) -> Option<String> {
        match self.value_of(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        match self.value_of(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            Value::String(s) => match s.as_str() {
                "1" | "true" => Some(true),
                "0" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Raw column value, `None` for missing or null
    fn json(&self, key: &str) -> Option<Value> {
        match self.value_of(key)? {
            Value::Null => None,
            v => Some(v.clone()),
        }
    }
}

impl RowExt for Row {
    fn value_of(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn stringifies_numeric_ids() {
        let r = row(json!({"id": 42, "name": "acme", "empty": "", "missing": null}));
        assert_eq!(r.string("id").as_deref(), Some("42"));
        assert_eq!(r.string("name").as_deref(), Some("acme"));
        assert_eq!(r.string("empty"), None);
        assert_eq!(r.string("missing"), None);
        assert_eq!(r.string("absent"), None);
    }

    #[test]
    fn reads_tinyint_flags_as_booleans() {
        let r = row(json!({"a": 1, "b": 0, "c": true, "d": "1", "e": "maybe"}));
        assert_eq!(r.boolean("a"), Some(true));
        assert_eq!(r.boolean("b"), Some(false));
        assert_eq!(r.boolean("c"), Some(true));
        assert_eq!(r.boolean("d"), Some(true));
        assert_eq!(r.boolean("e"), None);
    }

    #[test]
    fn json_skips_nulls() {
        let r = row(json!({"metadata": {"plan": "pro"}, "nothing": null}));
        assert_eq!(r.json("metadata"), Some(json!({"plan": "pro"})));
        assert_eq!(r.json("nothing"), None);
    }
}
