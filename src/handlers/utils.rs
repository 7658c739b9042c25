use serde::Deserialize;

use crate::error::ApiError;
use crate::types::Region;
use crate::validation::{strip_quotes, validate_uuid};

/// `?region=` on lookup routes
#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

/// Quote-stripped id, rejected unless it is a canonical v4 UUID
pub fn parse_id(raw: &str) -> Result<String, ApiError> {
    let id = strip_quotes(raw.trim());
    if validate_uuid(id) {
        Ok(id.to_string())
    } else {
        Err(ApiError::invalid_id())
    }
}

/// Optional region hint; empty means "search every region"
pub fn parse_region(raw: Option<&str>) -> Result<Option<Region>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<Region>()
            .map(Some)
            .map_err(|e| ApiError::bad_request(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_quoted_ids() {
        let id = parse_id("\"d058e199-6ed3-4049-8034-447bbd5004e9\"").unwrap();
        assert_eq!(id, "d058e199-6ed3-4049-8034-447bbd5004e9");
    }

    #[test]
    fn rejects_non_v4_ids() {
        let err = parse_id("d058e199-6ed3-1049-8034-447bbd5004e9").unwrap_err();
        assert_eq!(err.message(), "Invalid ID!");
        assert!(parse_id("").is_err());
    }

    #[test]
    fn parses_region_hints() {
        assert_eq!(parse_region(None).unwrap(), None);
        assert_eq!(parse_region(Some("")).unwrap(), None);
        assert_eq!(parse_region(Some("ca")).unwrap(), Some(Region::Ca));
        assert_eq!(parse_region(Some("mars")).unwrap_err().status_code(), 400);
    }
}
