use super::locate::Field;
use super::ParameterConstraint;
use crate::models::ParamType;
use serde_json::Value;

/// Decide whether a located value satisfies the constraint's declared type.
/// Coercion is only used to decide pass/fail; the raw value is never
/// rewritten.
pub fn conforms(field: Field<'_>, constraint: &ParameterConstraint) -> bool {
    match field {
        Field::Text(raw) => text_conforms(raw, constraint.ty),
        Field::Json(value) => json_conforms(value, constraint.ty),
    }
}

/// The enum check is independent of the type check; both must pass.
/// Literals are matched case-sensitively.
pub fn enum_allows(field: Field<'_>, constraint: &ParameterConstraint) -> bool {
    let Some(allowed) = &constraint.enum_values else {
        return true;
    };
    match field {
        Field::Text(raw) => allowed.iter().any(|literal| literal == raw),
        Field::Json(value) => match value.as_str() {
            Some(s) => allowed.iter().any(|literal| literal == s),
            None => allowed.iter().any(|literal| *literal == value.to_string()),
        },
    }
}

fn text_conforms(raw: &str, ty: ParamType) -> bool {
    match ty {
        ParamType::String => true,
        ParamType::Number => raw.parse::<f64>().is_ok_and(|n| n.is_finite()),
        ParamType::Integer => raw
            .parse::<f64>()
            .is_ok_and(|n| n.is_finite() && n.fract() == 0.0),
        ParamType::Boolean => raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false"),
        // A comma-separated query or header value counts as an array, and a
        // single token is a one-element list, so any raw string qualifies
        ParamType::Array => true,
        // A raw string never carries object structure
        ParamType::Object => false,
    }
}

fn json_conforms(value: &Value, ty: ParamType) -> bool {
    match ty {
        ParamType::String => value.is_string(),
        ParamType::Number => match value {
            Value::Number(n) => n.as_f64().is_some_and(|n| n.is_finite()),
            Value::String(s) => text_conforms(s, ParamType::Number),
            _ => false,
        },
        ParamType::Integer => match value {
            Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|n| n.fract() == 0.0),
            Value::String(s) => text_conforms(s, ParamType::Integer),
            _ => false,
        },
        ParamType::Boolean => match value {
            Value::Bool(_) => true,
            Value::String(s) => text_conforms(s, ParamType::Boolean),
            _ => false,
        },
        ParamType::Array => value.is_array(),
        ParamType::Object => value.is_object(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use serde_json::json;

    fn constraint(ty: ParamType) -> ParameterConstraint {
        ParameterConstraint {
            name: "p".to_string(),
            location: Location::Query,
            required: true,
            ty,
            enum_values: None,
        }
    }

    #[test]
    fn test_string_always_passes_for_text() {
        for raw in ["", "abc", "42", "true"] {
            assert!(conforms(Field::Text(raw), &constraint(ParamType::String)));
        }
    }

    #[test]
    fn test_number() {
        let c = constraint(ParamType::Number);
        assert!(conforms(Field::Text("48.85"), &c));
        assert!(conforms(Field::Text("-3"), &c));
        assert!(!conforms(Field::Text("abc"), &c));
        assert!(!conforms(Field::Text("NaN"), &c));
        assert!(!conforms(Field::Text("inf"), &c));
        assert!(!conforms(Field::Text(""), &c));
    }

    #[test]
    fn test_integer() {
        let c = constraint(ParamType::Integer);
        assert!(conforms(Field::Text("50"), &c));
        assert!(conforms(Field::Text("5.0"), &c));
        assert!(!conforms(Field::Text("5.5"), &c));
        assert!(!conforms(Field::Text("five"), &c));
    }

    #[test]
    fn test_boolean_case_insensitive() {
        let c = constraint(ParamType::Boolean);
        assert!(conforms(Field::Text("true"), &c));
        assert!(conforms(Field::Text("FALSE"), &c));
        assert!(!conforms(Field::Text("yes"), &c));
        assert!(!conforms(Field::Text("1"), &c));
    }

    #[test]
    fn test_array_on_text_and_json() {
        let c = constraint(ParamType::Array);
        assert!(conforms(Field::Text("a,b,c"), &c));
        assert!(conforms(Field::Text("single"), &c));
        assert!(conforms(Field::Json(&json!([1, 2])), &c));
        assert!(!conforms(Field::Json(&json!({"a": 1})), &c));
    }

    #[test]
    fn test_json_body_values() {
        assert!(conforms(Field::Json(&json!("Ada")), &constraint(ParamType::String)));
        assert!(!conforms(Field::Json(&json!(5)), &constraint(ParamType::String)));
        assert!(conforms(Field::Json(&json!(5)), &constraint(ParamType::Integer)));
        assert!(!conforms(Field::Json(&json!(5.5)), &constraint(ParamType::Integer)));
        assert!(conforms(Field::Json(&json!(true)), &constraint(ParamType::Boolean)));
        assert!(conforms(Field::Json(&json!({"a": 1})), &constraint(ParamType::Object)));
    }

    #[test]
    fn test_enum_is_independent_of_type() {
        let mut c = constraint(ParamType::String);
        c.enum_values = Some(vec!["north".to_string(), "south".to_string()]);
        assert!(enum_allows(Field::Text("north"), &c));
        assert!(!enum_allows(Field::Text("North"), &c));
        assert!(!enum_allows(Field::Text("east"), &c));
        assert!(enum_allows(Field::Json(&json!("south")), &c));

        // No enum declared means anything is allowed
        let open = constraint(ParamType::String);
        assert!(enum_allows(Field::Text("anything"), &open));
    }
}
