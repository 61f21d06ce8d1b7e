// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Configuration loading and rule management.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeneralConfig {
    /// Overrides the capture's `initial_resource_is_canonical` flag when set.
    #[serde(default)]
    pub initial_resource_is_canonical: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub rules: HashMap<String, toml::Value>,
}

impl Config {
    /// Load configuration from a TOML file and validate its rule tables.
    /// TOML format:
    ///
    /// [general]
    /// initial_resource_is_canonical = true
    ///
    /// [rules.InlineSmallCss]
    /// enabled = true
    /// threshold_bytes = 1024
    ///
    /// [rules.AvoidLandingPageRedirects]
    /// enabled = false
    pub async fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let s = tokio::fs::read_to_string(path_ref).await?;
        Self::from_toml_str(&s)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        crate::rules::validate_rules(&cfg)?;
        Ok(cfg)
    }

    /// Returns true if the rule is enabled.
    ///
    /// Rules are enabled by default. A rule is disabled only by a TOML table
    /// under `[rules.<rule>]` that contains `enabled = false`.
    pub fn is_enabled(&self, rule: &str) -> bool {
        match self.rules.get(rule) {
            Some(toml::Value::Table(table)) => {
                !matches!(table.get("enabled"), Some(toml::Value::Boolean(false)))
            }
            _ => true,
        }
    }

    /// Gets the configuration value for a rule.
    pub fn get_rule_config(&self, rule: &str) -> Option<&toml::Value> {
        self.rules.get(rule)
    }
}
