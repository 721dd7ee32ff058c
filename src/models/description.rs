use crate::error::{GuardError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of an API description document.
///
/// Only the parts the validator reads are modeled: the mapping from path
/// template to operations and their parameter declarations. Everything else
/// in the document (info block, schemes, produces, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDescription {
    /// Path template -> operations declared for that template
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

impl ApiDescription {
    /// Build a description from dynamically-loaded JSON.
    ///
    /// Rejects anything that is not an object with at least one path entry,
    /// so malformed documents fail at construction rather than deep inside
    /// request handling.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(GuardError::InvalidDescription(
                "description must be an object".to_string(),
            ));
        }
        let description: ApiDescription = serde_json::from_value(value)?;
        description.ensure_paths()?;
        Ok(description)
    }

    /// Check the top-level invariant: at least one path template entry.
    pub fn ensure_paths(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(GuardError::InvalidDescription(
                "description must declare at least one path".to_string(),
            ));
        }
        Ok(())
    }
}

/// Operations declared under one path template, plus declarations shared
/// across all of its operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation on this path
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDecl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
}

impl PathItem {
    /// Look up the operation for an HTTP method (lowercase)
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "patch" => self.patch.as_ref(),
            "head" => self.head.as_ref(),
            "options" => self.options.as_ref(),
            _ => None,
        }
    }

    /// All declared (method, operation) pairs, in field order
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("patch", &self.patch),
            ("head", &self.head),
            ("options", &self.options),
        ]
        .into_iter()
        .filter_map(|(m, op)| op.as_ref().map(|op| (m, op)))
        .collect()
    }
}

/// The declared contract for one (path template, HTTP method) pair
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "operationId")]
    pub operation_id: Option<String>,

    /// Parameter declarations for this operation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDecl>,
}

/// One declared parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,

    /// Where the value is read from on a request
    #[serde(rename = "in")]
    pub location: Location,

    #[serde(default)]
    pub required: bool,

    /// Expected primitive type; defaults to string when undeclared
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub param_type: Option<ParamType>,

    /// Allowed literal values, matched case-sensitively
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "enum")]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Header,
    Body,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Path => write!(f, "path"),
            Location::Query => write!(f, "query"),
            Location::Header => write!(f, "header"),
            Location::Body => write!(f, "body"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Number => write!(f, "number"),
            ParamType::Integer => write!(f, "integer"),
            ParamType::Boolean => write!(f, "boolean"),
            ParamType::Array => write!(f, "array"),
            ParamType::Object => write!(f, "object"),
        }
    }
}
