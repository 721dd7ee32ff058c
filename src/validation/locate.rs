use super::ParameterConstraint;
use crate::models::Location;
use http::HeaderMap;

/// Point-in-time snapshot of everywhere a request can carry parameters.
///
/// Assembled once per request by the middleware; the locator and auditor only
/// read from it, so validating the same snapshot twice gives the same result.
#[derive(Debug, Default)]
pub struct RequestValues {
    /// Named path captures from the matched route
    pub path: Vec<(String, String)>,
    /// Decoded query-string pairs, in wire order
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    /// Top-level fields of a flat object body, in document order
    pub body: Vec<(String, serde_json::Value)>,
}

/// A located parameter value. Path, query, and header values are raw
/// strings; body values keep their JSON shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Text(&'a str),
    Json(&'a serde_json::Value),
}

/// Find the value for one declared parameter, or `None` when the request
/// does not carry it. Absence is a normal locator result, not an error; a
/// supplied-but-empty query value counts as present.
pub fn locate<'a>(request: &'a RequestValues, constraint: &ParameterConstraint) -> Option<Field<'a>> {
    match constraint.location {
        Location::Path => request
            .path
            .iter()
            .find(|(name, _)| *name == constraint.name)
            .map(|(_, value)| Field::Text(value)),
        Location::Query => request
            .query
            .iter()
            .find(|(name, _)| *name == constraint.name)
            .map(|(_, value)| Field::Text(value)),
        // HeaderMap lookup is case-insensitive; a non-UTF-8 value cannot be
        // checked and is treated as absent
        Location::Header => request
            .headers
            .get(constraint.name.as_str())
            .and_then(|value| value.to_str().ok())
            .map(Field::Text),
        Location::Body => request
            .body
            .iter()
            .find(|(name, _)| *name == constraint.name)
            .map(|(_, value)| Field::Json(value)),
    }
}
