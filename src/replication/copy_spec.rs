//! # Copy Specification
//!
//! One declarative description of what moves between quotes: the ordered list of copyable line fields,
//! the large-text limits applied to some of them, and the names of the linkage fields the engine
//! writes itself. The same value drives the source query ([`CopySpec::query_fields`]) and the
//! projection, so a field can't be fetched without being written or written without being fetched.

use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Line fields copied by default (Salesforce CPQ).
pub const DEFAULT_ALLOWED_FIELDS: &[&str] = &[
    "SBQQ__Product__c",
    "SBQQ__ListPrice__c",
    "SBQQ__RegularPrice__c",
    "SBQQ__NetPrice__c",
    "SBQQ__Discount__c",
    "SBQQ__SubscriptionPricing__c",
    "SBQQ__Description__c",
    "SAP_Configuration__c",
];

/// Long-text field truncated by default, and its storage limit in characters.
pub const DEFAULT_LARGE_TEXT_LIMIT: (&str, usize) = ("SAP_Configuration__c", 130_000);

/// Names of the fields the engine writes on new records, outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkageFields {
    /// Line → quote lookup.
    pub quote: String,
    /// Line → group lookup.
    pub group: String,
    /// Line quantity.
    pub quantity: String,
    /// Group name.
    pub group_name: String,
    /// Group description.
    pub group_description: String,
}

impl Default for LinkageFields {
    fn default() -> Self {
        Self {
            quote: "SBQQ__Quote__c".to_string(),
            group: "SBQQ__Group__c".to_string(),
            quantity: "SBQQ__Quantity__c".to_string(),
            group_name: "Name".to_string(),
            group_description: "SBQQ__Description__c".to_string(),
        }
    }
}

/// Validated copy specification.
///
/// Construction rejects empty or duplicate field names, zero limits, and allowed fields that collide
/// with the quote, group or quantity linkage. Limits for fields outside the allow-list are kept but
/// never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct CopySpec {
    allowed_fields: Vec<String>,
    large_text_limits: BTreeMap<String, usize>,
    linkage: LinkageFields,
}

impl CopySpec {
    /// Builds a spec with the default CPQ linkage field names.
    pub fn new<F, L, S>(allowed_fields: F, large_text_limits: L) -> Result<Self, ValidationError>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self::with_linkage(allowed_fields, large_text_limits, LinkageFields::default())
    }

    /// Builds a spec with custom linkage field names.
    pub fn with_linkage<F, L, S>(
        allowed_fields: F,
        large_text_limits: L,
        linkage: LinkageFields,
    ) -> Result<Self, ValidationError>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let allowed_fields: Vec<String> = allowed_fields.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for field in &allowed_fields {
            if field.trim().is_empty() {
                return Err(ValidationError::EmptyFieldName);
            }
            if !seen.insert(field.as_str()) {
                return Err(ValidationError::DuplicateField(field.clone()));
            }
            let role = if *field == linkage.quote {
                Some("quote linkage")
            } else if *field == linkage.group {
                Some("group linkage")
            } else if *field == linkage.quantity {
                Some("scaled quantity")
            } else {
                None
            };
            if let Some(role) = role {
                return Err(ValidationError::ReservedField {
                    field: field.clone(),
                    role,
                });
            }
        }

        let mut limits = BTreeMap::new();
        for (field, limit) in large_text_limits {
            let field = field.into();
            if limit == 0 {
                return Err(ValidationError::ZeroLimit(field));
            }
            limits.insert(field, limit);
        }

        Ok(Self {
            allowed_fields,
            large_text_limits: limits,
            linkage,
        })
    }

    /// Copyable fields, in declaration order.
    pub fn allowed_fields(&self) -> &[String] {
        &self.allowed_fields
    }

    pub fn large_text_limits(&self) -> &BTreeMap<String, usize> {
        &self.large_text_limits
    }

    pub fn linkage(&self) -> &LinkageFields {
        &self.linkage
    }

    /// The truncation limit for `field`, if it is both copyable and limited.
    pub fn limit_for(&self, field: &str) -> Option<usize> {
        if self.allows(field) {
            self.large_text_limits.get(field).copied()
        } else {
            None
        }
    }

    pub fn allows(&self, field: &str) -> bool {
        self.allowed_fields.iter().any(|f| f == field)
    }

    /// Fields a source query must select: `Id`, the quantity field, then every copyable field.
    pub fn query_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(self.allowed_fields.len() + 2);
        fields.push("Id".to_string());
        fields.push(self.linkage.quantity.clone());
        fields.extend(self.allowed_fields.iter().cloned());
        fields
    }
}

impl Default for CopySpec {
    fn default() -> Self {
        Self {
            allowed_fields: DEFAULT_ALLOWED_FIELDS.iter().map(|f| f.to_string()).collect(),
            large_text_limits: BTreeMap::from([(
                DEFAULT_LARGE_TEXT_LIMIT.0.to_string(),
                DEFAULT_LARGE_TEXT_LIMIT.1,
            )]),
            linkage: LinkageFields::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_valid() {
        let spec = CopySpec::default();
        let rebuilt = CopySpec::new(
            spec.allowed_fields().to_vec(),
            spec.large_text_limits().clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, spec);
        assert_eq!(spec.limit_for("SAP_Configuration__c"), Some(130_000));
    }

    #[test]
    fn query_fields_cover_id_quantity_and_allowed() {
        let spec = CopySpec::new(["Product", "Price"], Vec::<(String, usize)>::new()).unwrap();
        assert_eq!(
            spec.query_fields(),
            vec!["Id", "SBQQ__Quantity__c", "Product", "Price"]
        );
    }

    #[test]
    fn rejects_duplicate_and_reserved_fields() {
        let dup = CopySpec::new(["A", "B", "A"], Vec::<(String, usize)>::new());
        assert_eq!(dup, Err(ValidationError::DuplicateField("A".into())));

        let qty = CopySpec::new(["SBQQ__Quantity__c"], Vec::<(String, usize)>::new());
        assert!(matches!(
            qty,
            Err(ValidationError::ReservedField { role: "scaled quantity", .. })
        ));

        let quote = CopySpec::new(["SBQQ__Quote__c"], Vec::<(String, usize)>::new());
        assert!(matches!(quote, Err(ValidationError::ReservedField { .. })));

        let empty = CopySpec::new([" "], Vec::<(String, usize)>::new());
        assert_eq!(empty, Err(ValidationError::EmptyFieldName));
    }

    #[test]
    fn rejects_zero_limit() {
        let spec = CopySpec::new(["Notes"], [("Notes", 0)]);
        assert_eq!(spec, Err(ValidationError::ZeroLimit("Notes".into())));
    }

    #[test]
    fn limits_outside_allow_list_are_ignored() {
        let spec = CopySpec::new(["Product"], [("Notes", 10)]).unwrap();
        assert_eq!(spec.limit_for("Notes"), None);
        assert_eq!(spec.large_text_limits().get("Notes"), Some(&10));
    }

    #[test]
    fn custom_linkage_moves_reserved_names() {
        let linkage = LinkageFields {
            quantity: "Qty__c".into(),
            ..LinkageFields::default()
        };
        let spec =
            CopySpec::with_linkage(["SBQQ__Quantity__c"], Vec::<(String, usize)>::new(), linkage)
                .unwrap();
        assert_eq!(spec.query_fields()[1], "Qty__c");
    }
}
