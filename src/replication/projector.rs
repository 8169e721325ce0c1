//! # Field Projector
//!
//! Picks the copyable fields off a source line. Absent and null values are dropped so no explicit
//! null ever reaches the org; string values over a configured large-text limit are cut to exactly
//! that many characters.

use super::copy_spec::CopySpec;
use super::record::{FieldMap, SourceLineRecord};
use serde_json::Value;
use tracing::warn;

/// A value that was cut to fit its large-text limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    pub field: String,
    /// Length in characters before the cut.
    pub original_len: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub fields: FieldMap,
    pub truncations: Vec<Truncation>,
}

/// Projects `record` onto the allow-list of `spec`.
pub fn project(record: &SourceLineRecord, spec: &CopySpec) -> Projection {
    let mut projection = Projection::default();

    for field in spec.allowed_fields() {
        let value = match record.fields.get(field) {
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };

        let value = match (value, spec.limit_for(field)) {
            (Value::String(text), Some(limit)) => {
                let original_len = text.chars().count();
                if original_len > limit {
                    warn!(
                        source_id = %record.id,
                        field = %field,
                        original_len,
                        limit,
                        "Truncating long text"
                    );
                    projection.truncations.push(Truncation {
                        field: field.clone(),
                        original_len,
                        limit,
                    });
                    Value::String(text.chars().take(limit).collect())
                } else {
                    value.clone()
                }
            }
            _ => value.clone(),
        };

        projection.fields.insert(field.clone(), value);
    }

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(fields: Value) -> SourceLineRecord {
        let Value::Object(fields) = fields else {
            panic!("fields must be an object");
        };
        SourceLineRecord::new("L1", Some(json!(1)), fields)
    }

    #[test]
    fn keeps_only_allowed_non_null_fields() {
        let spec = CopySpec::new(["Product", "Price", "Notes"], Vec::<(String, usize)>::new()).unwrap();
        let source = record(json!({
            "Product": "P-100",
            "Price": 12.5,
            "Notes": null,
            "Secret": "do not copy"
        }));

        let projection = project(&source, &spec);

        assert_eq!(
            Value::Object(projection.fields),
            json!({ "Product": "P-100", "Price": 12.5 })
        );
        assert!(projection.truncations.is_empty());
    }

    #[test]
    fn truncates_to_exact_limit_in_characters() {
        let spec = CopySpec::new(["Config"], [("Config", 5)]).unwrap();
        let source = record(json!({ "Config": "ééééééé" }));

        let projection = project(&source, &spec);

        assert_eq!(projection.fields["Config"], json!("ééééé"));
        assert_eq!(
            projection.truncations,
            vec![Truncation {
                field: "Config".into(),
                original_len: 7,
                limit: 5
            }]
        );
    }

    #[test]
    fn value_at_limit_is_untouched() {
        let spec = CopySpec::new(["Config"], [("Config", 5)]).unwrap();
        let source = record(json!({ "Config": "abcde" }));
        let projection = project(&source, &spec);
        assert_eq!(projection.fields["Config"], json!("abcde"));
        assert!(projection.truncations.is_empty());
    }

    #[test]
    fn non_string_values_are_never_truncated() {
        let spec = CopySpec::new(["Amount"], [("Amount", 1)]).unwrap();
        let source = record(json!({ "Amount": 123456 }));
        assert_eq!(project(&source, &spec).fields["Amount"], json!(123456));
    }

    #[test]
    fn limit_on_unlisted_field_has_no_effect() {
        let spec = CopySpec::new(["Product"], [("Description", 5)]).unwrap();
        let source = record(json!({ "Product": "Widget", "Description": "a long description" }));
        let projection = project(&source, &spec);
        assert_eq!(Value::Object(projection.fields), json!({ "Product": "Widget" }));
    }
}
