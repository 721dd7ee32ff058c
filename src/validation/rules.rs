use super::locate::{RequestValues, locate};
use super::{ParameterConstraint, ValidationError, conforms, enum_allows, find_undeclared};
use crate::models::Location;

/// Immutable per-route validation rules: the normalized constraint list for
/// one (path template, method) pair plus the strict flag. Shared read-only
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct RouteRules {
    pub(crate) constraints: Vec<ParameterConstraint>,
    pub(crate) strict: bool,
}

impl RouteRules {
    pub fn new(constraints: Vec<ParameterConstraint>, strict: bool) -> Self {
        Self { constraints, strict }
    }

    /// Whether evaluating these rules requires the request body: either a
    /// declared body parameter, or strict mode (undeclared body keys are
    /// audited)
    pub fn needs_body(&self) -> bool {
        self.strict
            || self
                .constraints
                .iter()
                .any(|c| c.location == Location::Body)
    }

    /// Gather every violation on a request, in order: declared parameters in
    /// declaration order, then undeclared names in discovery order. An empty
    /// list means the request may proceed.
    pub fn evaluate(&self, request: &RequestValues) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for constraint in &self.constraints {
            match locate(request, constraint) {
                None => {
                    if constraint.required {
                        errors.push(ValidationError::missing(&constraint.name));
                    }
                    // An optional, unsupplied parameter is never type-checked
                }
                Some(field) => {
                    if !conforms(field, constraint) || !enum_allows(field, constraint) {
                        errors.push(ValidationError::type_mismatch(&constraint.name));
                    }
                }
            }
        }

        if self.strict {
            for name in find_undeclared(request, &self.constraints) {
                errors.push(ValidationError::undeclared(name));
            }
        }

        errors
    }
}
