use super::locate::RequestValues;
use super::ParameterConstraint;
use crate::models::Location;

/// Names present on the request but not declared for the same location.
///
/// Only the query string and the body are audited: a matched route cannot
/// carry an undeclared path segment, and arbitrary headers are normal
/// transport, not part of the declared contract. Names come back in the
/// order they were encountered, query first, duplicates reported once.
pub fn find_undeclared(request: &RequestValues, constraints: &[ParameterConstraint]) -> Vec<String> {
    let mut undeclared = Vec::new();

    let mut scan = |name: &str, location: Location| {
        let declared = constraints
            .iter()
            .any(|c| c.location == location && c.name == name);
        if !declared && !undeclared.iter().any(|n| n == name) {
            undeclared.push(name.to_string());
        }
    };

    for (name, _) in &request.query {
        scan(name, Location::Query);
    }
    for (name, _) in &request.body {
        scan(name, Location::Body);
    }

    undeclared
}
