mod constraints;
mod locate;
mod rules;
mod strict;
mod types;

pub use constraints::{ParameterConstraint, extract};
pub use locate::{Field, RequestValues, locate};
pub use rules::RouteRules;
pub use strict::find_undeclared;
pub use types::{conforms, enum_allows};

/// Kind of request-time violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequired,
    TypeMismatch,
    UndeclaredParameter,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingRequired => write!(f, "Missing required parameter"),
            ErrorKind::TypeMismatch => write!(f, "Parameter type mismatch"),
            ErrorKind::UndeclaredParameter => write!(f, "Undeclared parameter"),
        }
    }
}

/// One request-time violation.
///
/// Never raised as a Rust error: violations are collected per request and
/// handed to the configured error handler as an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub parameter: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn missing(parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        let message = format!("Error: Parameter : {} is not specified.", parameter);
        Self {
            parameter,
            kind: ErrorKind::MissingRequired,
            message,
        }
    }

    pub fn type_mismatch(parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        let message = format!("Error: Parameter : {} does not respect its type.", parameter);
        Self {
            parameter,
            kind: ErrorKind::TypeMismatch,
            message,
        }
    }

    pub fn undeclared(parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        let message = format!("Error: Parameter : {} should not be specified.", parameter);
        Self {
            parameter,
            kind: ErrorKind::UndeclaredParameter,
            message,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_wire_format() {
        assert_eq!(
            ValidationError::missing("latitude").message,
            "Error: Parameter : latitude is not specified."
        );
        assert_eq!(
            ValidationError::undeclared("extraParameter").message,
            "Error: Parameter : extraParameter should not be specified."
        );
        assert_eq!(
            ValidationError::type_mismatch("latitude").message,
            "Error: Parameter : latitude does not respect its type."
        );
    }
}
