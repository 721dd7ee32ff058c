use super::layer::ValidationLayer;
use crate::error::{GuardError, Result};
use crate::models::ApiDescription;
use crate::validation::{RouteRules, ValidationError, extract};
use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode, request::Parts};
use indexmap::IndexMap;
use std::sync::Arc;

/// Failure-reporting policy: receives the full violation list and the request
/// head, returns the response the client sees. Once control is handed over
/// the validator has no further opinion.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, errors: &[ValidationError], parts: &Parts) -> Response;
}

impl<F> ErrorHandler for F
where
    F: Fn(&[ValidationError], &Parts) -> Response + Send + Sync,
{
    fn handle(&self, errors: &[ValidationError], parts: &Parts) -> Response {
        self(errors, parts)
    }
}

/// Default policy: HTTP 400 with one error message per line
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, errors: &[ValidationError], _parts: &Parts) -> Response {
        let body: String = errors.iter().map(|e| format!("{}\n", e.message)).collect();
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Validator configuration. Immutable once the [`Validator`] is built.
#[derive(Clone)]
pub struct ValidatorOptions {
    strict: bool,
    merge_shared_parameters: bool,
    on_error: Arc<dyn ErrorHandler>,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            strict: false,
            merge_shared_parameters: true,
            on_error: Arc::new(DefaultErrorHandler),
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any request parameter not declared for the matched operation
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether path-level (shared) parameter declarations are merged into
    /// each operation's constraint list. On by default; operation-level
    /// declarations always win on a name+location collision.
    pub fn merge_shared_parameters(mut self, merge: bool) -> Self {
        self.merge_shared_parameters = merge;
        self
    }

    /// Replace the default 400 handler
    pub fn on_error(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.on_error = Arc::new(handler);
        self
    }
}

/// Everything one route's middleware needs, shared read-only across clones
/// of the service
pub(crate) struct RouteConfig {
    pub(crate) rules: RouteRules,
    pub(crate) on_error: Arc<dyn ErrorHandler>,
}

/// Per-route request validator built from an API description.
///
/// Construction eagerly extracts the constraint list for every declared
/// (path template, method) pair, so structural problems in the description
/// surface here and never at request time. The description is only borrowed
/// for the duration of construction.
pub struct Validator {
    routes: IndexMap<(Method, String), Arc<RouteConfig>>,
}

impl Validator {
    pub fn new(description: &ApiDescription) -> Result<Self> {
        Self::with_options(description, ValidatorOptions::default())
    }

    pub fn with_options(description: &ApiDescription, options: ValidatorOptions) -> Result<Self> {
        description.ensure_paths()?;

        let mut routes = IndexMap::new();
        for (template, item) in &description.paths {
            if item.operations().is_empty() {
                return Err(GuardError::InvalidDescription(format!(
                    "path {} declares no operations",
                    template
                )));
            }
            for (token, _) in item.operations() {
                let method = match token {
                    "get" => Method::GET,
                    "put" => Method::PUT,
                    "post" => Method::POST,
                    "delete" => Method::DELETE,
                    "patch" => Method::PATCH,
                    "head" => Method::HEAD,
                    "options" => Method::OPTIONS,
                    _ => continue,
                };
                let constraints =
                    extract(description, template, token, options.merge_shared_parameters)?;
                tracing::debug!(
                    path = %template,
                    method = %method,
                    constraints = constraints.len(),
                    strict = options.strict,
                    "registered route validation"
                );
                let config = RouteConfig {
                    rules: RouteRules::new(constraints, options.strict),
                    on_error: Arc::clone(&options.on_error),
                };
                routes.insert((method, template.clone()), Arc::new(config));
            }
        }

        Ok(Self { routes })
    }

    /// Middleware for an arbitrary (method, path template) pair
    pub fn layer(&self, method: Method, path_template: &str) -> Result<ValidationLayer> {
        if let Some(config) = self.routes.get(&(method.clone(), path_template.to_string())) {
            return Ok(ValidationLayer::new(Arc::clone(config)));
        }
        if self.routes.keys().any(|(_, t)| t == path_template) {
            Err(GuardError::OperationNotFound {
                method: method.to_string(),
                path: path_template.to_string(),
            })
        } else {
            Err(GuardError::PathNotFound(path_template.to_string()))
        }
    }

    pub fn get(&self, path_template: &str) -> Result<ValidationLayer> {
        self.layer(Method::GET, path_template)
    }

    pub fn post(&self, path_template: &str) -> Result<ValidationLayer> {
        self.layer(Method::POST, path_template)
    }

    pub fn put(&self, path_template: &str) -> Result<ValidationLayer> {
        self.layer(Method::PUT, path_template)
    }

    pub fn delete(&self, path_template: &str) -> Result<ValidationLayer> {
        self.layer(Method::DELETE, path_template)
    }

    pub fn patch(&self, path_template: &str) -> Result<ValidationLayer> {
        self.layer(Method::PATCH, path_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn description() -> ApiDescription {
        ApiDescription::from_value(json!({
            "paths": {
                "/products": {
                    "get": {
                        "parameters": [
                            { "name": "latitude", "in": "query", "required": true, "type": "number" }
                        ]
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_construction_succeeds_with_and_without_options() {
        assert!(Validator::new(&description()).is_ok());
        assert!(Validator::with_options(&description(), ValidatorOptions::new().strict(true)).is_ok());
        let with_handler = ValidatorOptions::new()
            .strict(false)
            .on_error(|_errors: &[ValidationError], _parts: &Parts| {
                (StatusCode::IM_A_TEAPOT, "custom").into_response()
            });
        assert!(Validator::with_options(&description(), with_handler).is_ok());
    }

    #[test]
    fn test_construction_fails_on_empty_description() {
        let empty = ApiDescription { paths: Default::default() };
        assert!(matches!(
            Validator::new(&empty),
            Err(GuardError::InvalidDescription(_))
        ));
    }

    #[test]
    fn test_construction_fails_on_path_without_operations() {
        let description = ApiDescription::from_value(json!({
            "paths": { "/products": {} }
        }))
        .unwrap();
        assert!(matches!(
            Validator::new(&description),
            Err(GuardError::InvalidDescription(_))
        ));
    }

    #[test]
    fn test_accessor_unknown_template_or_method() {
        let validator = Validator::new(&description()).unwrap();
        assert!(matches!(
            validator.get("/missing"),
            Err(GuardError::PathNotFound(_))
        ));
        assert!(matches!(
            validator.post("/products"),
            Err(GuardError::OperationNotFound { .. })
        ));
        assert!(validator.get("/products").is_ok());
    }

    #[test]
    fn test_default_handler_body_format() {
        let errors = vec![
            ValidationError::missing("latitude"),
            ValidationError::missing("longitude"),
        ];
        let (mut parts, _) = http::Request::new(()).into_parts();
        parts.method = Method::GET;
        let response = DefaultErrorHandler.handle(&errors, &parts);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
