//! Server-side validation the sandbox applies to new quote lines, standing in for an org's field
//! lengths and validation rules.

use super::error::QuoteLineError;
use crate::replication::FieldMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrgRules {
    /// Storage limit in characters per text field.
    pub field_limits: BTreeMap<String, usize>,
    /// Fields that must be present and non-null on every line.
    pub required_fields: Vec<String>,
}

impl Default for OrgRules {
    fn default() -> Self {
        Self {
            field_limits: BTreeMap::from([
                ("SAP_Configuration__c".to_string(), 131_072),
                ("SBQQ__Description__c".to_string(), 32_000),
            ]),
            required_fields: vec!["SBQQ__Product__c".to_string()],
        }
    }
}

impl OrgRules {
    /// No limits, nothing required.
    pub fn permissive() -> Self {
        Self {
            field_limits: BTreeMap::new(),
            required_fields: Vec::new(),
        }
    }

    pub fn check(&self, fields: &FieldMap) -> Result<(), QuoteLineError> {
        for required in &self.required_fields {
            match fields.get(required) {
                None | Some(Value::Null) => {
                    return Err(QuoteLineError::RequiredFieldMissing(required.clone()))
                }
                Some(_) => {}
            }
        }
        for (field, value) in fields {
            if let (Value::String(text), Some(&limit)) = (value, self.field_limits.get(field)) {
                let len = text.chars().count();
                if len > limit {
                    return Err(QuoteLineError::FieldTooLong {
                        field: field.clone(),
                        len,
                        limit,
                    });
                }
            }
        }
        Ok(())
    }
}
