//! Record shapes flowing through the engine.

use super::copy_spec::CopySpec;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Field name → JSON scalar, the shape of every payload exchanged with the org.
pub type FieldMap = serde_json::Map<String, Value>;

/// Immutable snapshot of one source quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLineRecord {
    /// Opaque source identifier, used only for reporting.
    pub id: String,
    /// Raw quantity as stored on the source; `None` and `Value::Null` both mean "absent".
    #[serde(default)]
    pub quantity: Option<Value>,
    /// Every other selected field.
    #[serde(default)]
    pub fields: FieldMap,
}

impl SourceLineRecord {
    pub fn new(id: impl Into<String>, quantity: Option<Value>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            quantity,
            fields,
        }
    }
}

/// Where new lines land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationTarget {
    pub quote_id: String,
    pub group_id: Option<String>,
}

impl ReplicationTarget {
    pub fn quote(quote_id: impl Into<String>) -> Self {
        Self {
            quote_id: quote_id.into(),
            group_id: None,
        }
    }

    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }
}

/// Payload for one line creation, tied to the source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineRecord {
    pub source_id: String,
    pub payload: FieldMap,
}

impl NewLineRecord {
    /// Projected fields plus quote linkage, scaled quantity and (when set) group linkage.
    ///
    /// Linkage and quantity are inserted last so they win over any projected field of the same
    /// name; [`CopySpec`] construction already rules that out.
    pub fn assemble(
        source_id: &str,
        projected: FieldMap,
        quantity: f64,
        target: &ReplicationTarget,
        spec: &CopySpec,
    ) -> Self {
        let linkage = spec.linkage();
        let mut payload = projected;
        payload.insert(linkage.quote.clone(), Value::String(target.quote_id.clone()));
        if let Some(group_id) = &target.group_id {
            payload.insert(linkage.group.clone(), Value::String(group_id.clone()));
        }
        payload.insert(linkage.quantity.clone(), quantity_value(quantity));
        Self {
            source_id: source_id.to_string(),
            payload,
        }
    }
}

/// Whole quantities are written as integers (`6`, not `6.0`).
pub fn quantity_value(quantity: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if quantity.fract() == 0.0 && quantity.abs() <= MAX_EXACT {
        Value::from(quantity as i64)
    } else {
        Number::from_f64(quantity)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
