//! A quote line.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`quote_line_actor::entity`](crate::quote_line_actor::entity). Creation is validated against the
//! org: the quote must exist, the group (if any) must sit on the same quote, and the payload must
//! satisfy the org's [`OrgRules`](crate::quote_line_actor::OrgRules).
use super::ids::{GroupId, LineId, QuoteId};
use crate::replication::FieldMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub id: LineId,
    pub quote: QuoteId,
    pub group: Option<GroupId>,
    /// Stored exactly as submitted; source data in the wild is not always numeric.
    pub quantity: Option<Value>,
    /// Every other field.
    pub fields: FieldMap,
}

#[derive(Debug, Clone)]
pub struct QuoteLineCreate {
    pub quote: QuoteId,
    pub group: Option<GroupId>,
    pub quantity: Option<Value>,
    pub fields: FieldMap,
}

impl QuoteLineCreate {
    pub fn on_quote(quote: QuoteId) -> Self {
        Self {
            quote,
            group: None,
            quantity: None,
            fields: FieldMap::new(),
        }
    }

    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    pub fn quantity(mut self, quantity: Value) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

/// Field-level edits; `None` values remove the field.
#[derive(Debug, Clone, Default)]
pub struct QuoteLineUpdate {
    pub quantity: Option<Value>,
    pub fields: Vec<(String, Option<Value>)>,
}
