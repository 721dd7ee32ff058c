use crate::error::{GuardError, Result};
use crate::models::{ApiDescription, Location, ParamType, ParameterDecl};
use indexmap::IndexMap;

/// One normalized parameter constraint for an operation.
///
/// Built once at construction from the declarations in the description and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterConstraint {
    pub name: String,
    pub location: Location,
    pub required: bool,
    pub ty: ParamType,
    pub enum_values: Option<Vec<String>>,
}

impl ParameterConstraint {
    fn from_decl(decl: &ParameterDecl) -> Self {
        Self {
            name: decl.name.clone(),
            location: decl.location,
            // A path segment is always present when the route matches, so
            // path parameters are implicitly required
            required: decl.required || decl.location == Location::Path,
            ty: decl.param_type.unwrap_or_default(),
            enum_values: decl.enum_values.clone(),
        }
    }
}

/// Extract the normalized constraint list for one (path template, method)
/// pair.
///
/// Path-level (shared) declarations are merged additively when
/// `merge_shared` is set; an operation-level declaration with the same
/// name and location overrides the shared one.
pub fn extract(
    description: &ApiDescription,
    path_template: &str,
    method: &str,
    merge_shared: bool,
) -> Result<Vec<ParameterConstraint>> {
    description.ensure_paths()?;

    let item = description
        .paths
        .get(path_template)
        .ok_or_else(|| GuardError::PathNotFound(path_template.to_string()))?;

    if item.operations().is_empty() {
        return Err(GuardError::InvalidDescription(format!(
            "path {} declares no operations",
            path_template
        )));
    }

    let operation = item
        .operation(method)
        .ok_or_else(|| GuardError::OperationNotFound {
            method: method.to_uppercase(),
            path: path_template.to_string(),
        })?;

    // Keyed by (name, location): shared declarations first, operation-level
    // ones override on collision. Insertion order is preserved so declared
    // parameters are checked in declaration order.
    let mut merged: IndexMap<(String, Location), ParameterConstraint> = IndexMap::new();

    if merge_shared {
        for decl in &item.parameters {
            let constraint = ParameterConstraint::from_decl(decl);
            merged.insert((constraint.name.clone(), constraint.location), constraint);
        }
    }
    for decl in &operation.parameters {
        let constraint = ParameterConstraint::from_decl(decl);
        merged.insert((constraint.name.clone(), constraint.location), constraint);
    }

    Ok(merged.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn description() -> ApiDescription {
        ApiDescription::from_value(json!({
            "paths": {
                "/products": {
                    "parameters": [
                        { "name": "traceId", "in": "header" },
                        { "name": "latitude", "in": "query", "type": "string" }
                    ],
                    "get": {
                        "parameters": [
                            { "name": "latitude", "in": "query", "required": true, "type": "number" },
                            { "name": "longitude", "in": "query", "required": true, "type": "number" }
                        ]
                    }
                },
                "/user/{id}": {
                    "get": {
                        "parameters": [
                            { "name": "id", "in": "path", "type": "integer" }
                        ]
                    }
                },
                "/empty": {}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_extract_declaration_order() {
        let constraints = extract(&description(), "/products", "get", false).unwrap();
        let names: Vec<&str> = constraints.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["latitude", "longitude"]);
        assert!(constraints.iter().all(|c| c.required));
        assert!(constraints.iter().all(|c| c.ty == ParamType::Number));
    }

    #[test]
    fn test_extract_merges_shared_declarations() {
        let constraints = extract(&description(), "/products", "get", true).unwrap();
        let names: Vec<&str> = constraints.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["traceId", "latitude", "longitude"]);

        // Operation-level declaration wins over the shared one
        let latitude = constraints.iter().find(|c| c.name == "latitude").unwrap();
        assert!(latitude.required);
        assert_eq!(latitude.ty, ParamType::Number);
    }

    #[test]
    fn test_path_parameters_implicitly_required() {
        let constraints = extract(&description(), "/user/{id}", "get", true).unwrap();
        assert_eq!(constraints.len(), 1);
        assert!(constraints[0].required);
        assert_eq!(constraints[0].location, Location::Path);
    }

    #[test]
    fn test_extract_unknown_path() {
        let result = extract(&description(), "/missing", "get", true);
        assert!(matches!(result, Err(GuardError::PathNotFound(_))));
    }

    #[test]
    fn test_extract_unknown_method() {
        let result = extract(&description(), "/products", "post", true);
        assert!(matches!(result, Err(GuardError::OperationNotFound { .. })));
    }

    #[test]
    fn test_extract_path_without_operations() {
        let result = extract(&description(), "/empty", "get", true);
        assert!(matches!(result, Err(GuardError::InvalidDescription(_))));
    }
}
