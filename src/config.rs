//! # Configuration
//!
//! A run is described by one TOML file:
//!
//! ```toml
//! group_enabled = true
//!
//! [target]
//! quote_name = "Consolidated Quote"      # or: quote_id = "quote_4"
//!
//! [copy]
//! allowed_fields = ["SBQQ__Product__c", "SBQQ__NetPrice__c", "SAP_Configuration__c"]
//! [copy.large_text_limits]
//! SAP_Configuration__c = 130000
//!
//! [[jobs]]
//! source = { opportunity = "opp_2" }
//! multiplier = "2"
//! group = { name = "Station 1", description = "Line 1 cell" }
//!
//! [children]                             # one job per child opportunity
//! parent = "opp_1"
//! ```
//!
//! The copy section is validated on load through [`CopySpec`]. Multipliers are kept as written and
//! only checked when jobs are planned, so one bad value fails its own job and nothing else.

use crate::quote_line_actor::OrgRules;
use crate::remote::SourceRef;
use crate::replication::copy_spec::{DEFAULT_ALLOWED_FIELDS, DEFAULT_LARGE_TEXT_LIMIT};
use crate::replication::{CopySpec, GroupRequest, LinkageFields, RawMultiplier, ValidationError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Target quote must be given by exactly one of quote_id or quote_name")]
    AmbiguousTarget,

    #[error("Nothing to do: no [[jobs]] and no [children]")]
    NoJobs,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// When false, group requests are ignored and lines go straight onto the target quote.
    #[serde(default = "default_true")]
    pub group_enabled: bool,
    pub target: TargetConfig,
    #[serde(default)]
    pub copy: CopyConfig,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
    #[serde(default)]
    pub children: Option<ChildrenConfig>,
    /// Validation rules of the sandbox org.
    #[serde(default)]
    pub org: OrgRules,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub quote_id: Option<String>,
    pub quote_name: Option<String>,
}

/// How the target quote is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    Id(String),
    Name(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    pub allowed_fields: Vec<String>,
    pub large_text_limits: BTreeMap<String, usize>,
    pub linkage: LinkageFields,
}

impl Default for CopyConfig {
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

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Defaults to a description of the source.
    pub label: Option<String>,
    pub source: SourceRef,
    #[serde(default)]
    pub multiplier: RawMultiplier,
    pub group: Option<GroupRequest>,
}

/// Expands into one grouped job per child of `parent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildrenConfig {
    pub parent: String,
    #[serde(default)]
    pub multiplier: RawMultiplier,
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.copy_spec()?;
        config.target_ref()?;
        if config.jobs.is_empty() && config.children.is_none() {
            return Err(ConfigError::NoJobs);
        }
        Ok(config)
    }

    pub fn copy_spec(&self) -> Result<CopySpec, ValidationError> {
        CopySpec::with_linkage(
            self.copy.allowed_fields.iter().cloned(),
            self.copy.large_text_limits.clone(),
            self.copy.linkage.clone(),
        )
    }

    pub fn target_ref(&self) -> Result<TargetRef, ConfigError> {
        match (&self.target.quote_id, &self.target.quote_name) {
            (Some(id), None) => Ok(TargetRef::Id(id.clone())),
            (None, Some(name)) => Ok(TargetRef::Name(name.clone())),
            _ => Err(ConfigError::AmbiguousTarget),
        }
    }
}
