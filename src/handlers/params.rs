//! Boundary coercion of raw path / query strings into typed values.
//! Nothing reaches a store until these succeed.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ApiError;
use crate::types::IdParseError;

pub type QueryParams = HashMap<String, String>;

pub fn parse_id<T>(field: &str, raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = IdParseError>,
{
    raw.parse().map_err(|e: IdParseError| {
        tracing::debug!("Rejected {}: {}", field, e);
        ApiError::invalid_field(field, &e)
    })
}

pub fn query_id<T>(params: &QueryParams, field: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = IdParseError>,
{
    let raw = params.get(field).ok_or_else(|| ApiError::missing_field(field))?;
    parse_id(field, raw)
}

/// Required text field; an empty value is allowed, a missing key is not
pub fn query_text(params: &QueryParams, field: &str) -> Result<String, ApiError> {
    params.get(field).cloned().ok_or_else(|| ApiError::missing_field(field))
}
