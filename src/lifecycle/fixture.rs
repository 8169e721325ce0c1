//! Seed data for the sandbox org, loaded from JSON.
//!
//! Records reference each other by fixture key, never by id; ids are assigned by the actors at seed
//! time and reported back through [`SeedIndex`].
//!
//! ```json
//! {
//!   "opportunities": [
//!     { "key": "parent", "name": "Plant Expansion" },
//!     { "key": "child-a", "name": "Line 1", "parent": "parent" }
//!   ],
//!   "quotes": [
//!     { "key": "qa", "name": "Q-A", "opportunity": "child-a", "primary": true,
//!       "lines": [ { "quantity": 2, "fields": { "SBQQ__Product__c": "01t1" } } ] }
//!   ]
//! }
//! ```

use super::org::SandboxOrg;
use crate::line_group_actor::LineGroupError;
use crate::model::{
    GroupId, OpportunityCreate, OpportunityId, QuoteCreate, QuoteId, QuoteLineCreate,
    QuoteLineGroupCreate,
};
use crate::opportunity_actor::OpportunityError;
use crate::quote_actor::QuoteError;
use crate::quote_line_actor::QuoteLineError;
use crate::replication::FieldMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown {kind} key {key:?}")]
    UnknownKey { kind: &'static str, key: String },

    #[error("Duplicate key {0:?}")]
    DuplicateKey(String),

    #[error(transparent)]
    Opportunity(#[from] OpportunityError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Group(#[from] LineGroupError),

    #[error(transparent)]
    Line(#[from] QuoteLineError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub opportunities: Vec<OpportunityFixture>,
    #[serde(default)]
    pub quotes: Vec<QuoteFixture>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpportunityFixture {
    pub key: String,
    pub name: String,
    /// Key of an opportunity listed earlier.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteFixture {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub opportunity: Option<String>,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub groups: Vec<GroupFixture>,
    #[serde(default)]
    pub lines: Vec<LineFixture>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupFixture {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineFixture {
    /// Key of a group on the same quote.
    #[serde(default)]
    pub group: Option<String>,
    /// Stored verbatim, so fixtures can carry text or missing quantities.
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub fields: FieldMap,
}

/// Fixture key → assigned id.
#[derive(Debug, Clone, Default)]
pub struct SeedIndex {
    pub opportunities: BTreeMap<String, OpportunityId>,
    pub quotes: BTreeMap<String, QuoteId>,
    pub groups: BTreeMap<String, GroupId>,
    pub lines: usize,
}

impl SeedIndex {
    pub fn opportunity(&self, key: &str) -> Option<OpportunityId> {
        self.opportunities.get(key).copied()
    }

    pub fn quote(&self, key: &str) -> Option<QuoteId> {
        self.quotes.get(key).copied()
    }
}

fn resolve<I: Copy>(
    map: &BTreeMap<String, I>,
    kind: &'static str,
    key: &str,
) -> Result<I, SeedError> {
    map.get(key).copied().ok_or_else(|| SeedError::UnknownKey {
        kind,
        key: key.to_string(),
    })
}

fn claim<I>(map: &mut BTreeMap<String, I>, key: &str, id: I) -> Result<(), SeedError> {
    if map.insert(key.to_string(), id).is_some() {
        return Err(SeedError::DuplicateKey(key.to_string()));
    }
    Ok(())
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Creates every record through the org's clients, in file order.
    pub async fn seed(&self, org: &SandboxOrg) -> Result<SeedIndex, SeedError> {
        let mut index = SeedIndex::default();

        for opp in &self.opportunities {
            let parent = opp
                .parent
                .as_deref()
                .map(|key| resolve(&index.opportunities, "opportunity", key))
                .transpose()?;
            let id = org
                .opportunity_client
                .create_opportunity(OpportunityCreate {
                    name: opp.name.clone(),
                    parent,
                })
                .await?;
            claim(&mut index.opportunities, &opp.key, id)?;
        }

        for quote in &self.quotes {
            let opportunity = quote
                .opportunity
                .as_deref()
                .map(|key| resolve(&index.opportunities, "opportunity", key))
                .transpose()?;
            let quote_id = org
                .quote_client
                .create_quote(QuoteCreate {
                    name: quote.name.clone(),
                    opportunity,
                    primary: quote.primary,
                })
                .await?;
            claim(&mut index.quotes, &quote.key, quote_id)?;

            for group in &quote.groups {
                let group_id = org
                    .group_client
                    .create_group(QuoteLineGroupCreate {
                        quote: quote_id,
                        name: group.name.clone(),
                        description: group.description.clone(),
                    })
                    .await?;
                claim(&mut index.groups, &group.key, group_id)?;
            }

            for line in &quote.lines {
                let mut params = QuoteLineCreate::on_quote(quote_id);
                params.group = line
                    .group
                    .as_deref()
                    .map(|key| resolve(&index.groups, "group", key))
                    .transpose()?;
                params.quantity = line.quantity.clone();
                params.fields = line.fields.clone();
                org.line_client.create_line(params).await?;
                index.lines += 1;
            }
        }

        info!(
            opportunities = index.opportunities.len(),
            quotes = index.quotes.len(),
            groups = index.groups.len(),
            lines = index.lines,
            "Fixture seeded"
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote_line_actor::OrgRules;
    use actor_framework::ActorClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FIXTURE: &str = r#"{
        "opportunities": [
            { "key": "parent", "name": "Plant Expansion" },
            { "key": "a", "name": "Line 1", "parent": "parent" }
        ],
        "quotes": [
            {
                "key": "qa", "name": "Q-A", "opportunity": "a", "primary": true,
                "groups": [ { "key": "g", "name": "Cell" } ],
                "lines": [
                    { "group": "g", "quantity": 2, "fields": { "SBQQ__Product__c": "01t1" } },
                    { "quantity": "n/a", "fields": { "SBQQ__Product__c": "01t2" } }
                ]
            }
        ]
    }"#;

    #[tokio::test]
    async fn seeds_records_by_key() {
        let org = SandboxOrg::new(OrgRules::default());
        let index = Fixture::from_json_str(FIXTURE).unwrap().seed(&org).await.unwrap();

        let child = org
            .opportunity_client
            .get(index.opportunity("a").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(child.parent, index.opportunity("parent"));

        let lines = org.line_client.lines_on(index.quote("qa").unwrap()).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].group, index.groups.get("g").copied());
        assert_eq!(lines[1].quantity, Some(json!("n/a")));
        assert_eq!(index.lines, 2);

        org.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_parent_key_fails() {
        let org = SandboxOrg::new(OrgRules::default());
        let fixture = Fixture::from_json_str(
            r#"{ "opportunities": [ { "key": "a", "name": "A", "parent": "ghost" } ] }"#,
        )
        .unwrap();

        let err = fixture.seed(&org).await.unwrap_err();
        assert!(matches!(err, SeedError::UnknownKey { kind: "opportunity", .. }));
        org.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn org_rules_apply_to_seeded_lines() {
        let org = SandboxOrg::new(OrgRules::default());
        let fixture = Fixture::from_json_str(
            r#"{ "quotes": [ { "key": "q", "name": "Q", "lines": [ { "quantity": 1 } ] } ] }"#,
        )
        .unwrap();

        let err = fixture.seed(&org).await.unwrap_err();
        assert!(matches!(
            err,
            SeedError::Line(QuoteLineError::RequiredFieldMissing(_))
        ));
        org.shutdown().await.unwrap();
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            Fixture::from_json_str(r#"{ "accounts": [] }"#),
            Err(SeedError::Parse(_))
        ));
    }
}
