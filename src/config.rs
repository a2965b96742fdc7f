use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::crs::{AuthorityEntry, AuthorityRegistry, AxisOrder, Identifier};

/// Options for building a [`crate::Reprojector`], usually read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Leniency of the convenience transforms.
    pub lenient: bool,
    /// Extra authority codes, consulted before the built-in EPSG table.
    pub authorities: Vec<AuthorityConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self { lenient: true, authorities: Vec::new() }
    }
}

/// One user-defined `AUTHORITY:CODE` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorityConfig {
    pub authority: String,
    pub code: String,
    pub name: String,
    pub proj4: String,
    /// Whether the authority declares latitude before longitude. Defaults to the kind of `proj4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic: Option<bool>,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .with_context(|| "[config] Failed to parse configuration JSON")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read configuration file: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("[config] Failed to parse configuration file: {}", path.display()))
    }

    /// The registry holding the configured authorities.
    pub fn registry(&self) -> AuthorityRegistry {
        let mut registry = AuthorityRegistry::new();
        for entry in &self.authorities {
            let mut authority = AuthorityEntry::new(entry.name.clone(), &entry.proj4);
            if let Some(geographic) = entry.geographic {
                authority = authority.with_axis_order(if geographic { AxisOrder::NorthEast } else { AxisOrder::EastNorth });
            }
            registry.register(Identifier::new(&entry.authority, &entry.code), authority);
        }
        registry
    }
}
