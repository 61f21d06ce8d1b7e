// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! The rule contract and the registry of available rules.

use crate::capabilities::InputCapabilities;
use crate::config::Config;
use crate::formatter::Formatter;
use crate::resource_graph::InputInformation;
use crate::result::{ResultProvider, RuleResult};
use crate::rule_input::RuleInput;

pub mod avoid_landing_page_redirects;
pub mod inline_small_resources;

pub trait Rule: Send + Sync {
    /// Stable identifier, also the key of the rule's `[rules.<name>]` config table.
    fn name(&self) -> &'static str;

    /// Short human-readable title.
    fn header(&self) -> &'static str;

    fn documentation_url(&self) -> &'static str;

    /// Parts of the capture this rule needs. The engine skips the rule when
    /// a graph cannot provide them.
    fn capability_requirements(&self) -> InputCapabilities;

    /// Scan the input and append findings to `provider`.
    ///
    /// Problems with a single candidate are logged and skipped. An `Err`
    /// means the rule's whole output cannot be trusted.
    fn append_results(&self, input: &RuleInput<'_>, provider: &mut ResultProvider)
        -> anyhow::Result<()>;

    /// Score in `0..=100`, 100 meaning nothing to improve. An `Err` reports an
    /// internal inconsistency rather than a score.
    ///
    /// The default gives 100 when no result carries savings and
    /// `100 / (1 + n)` for `n` results that do.
    fn compute_score(
        &self,
        _input_info: &InputInformation,
        results: &[RuleResult],
    ) -> anyhow::Result<u8> {
        let n = results.iter().filter(|r| !r.savings.is_empty()).count();
        Ok((100 / (1 + n)) as u8)
    }

    fn format_results(&self, results: &[RuleResult], formatter: &mut Formatter);

    /// Reorder results for display. Append order is kept by default.
    fn sort_results_in_presentation_order(&self, _results: &mut [RuleResult]) {}
}

/// Names of every rule this crate ships.
pub const RULE_NAMES: &[&str] = &[
    avoid_landing_page_redirects::RULE_NAME,
    inline_small_resources::INLINE_SMALL_CSS,
    inline_small_resources::INLINE_SMALL_JAVASCRIPT,
];

/// Instantiate every enabled rule with its configured parameters.
pub fn build_rules(config: &Config) -> anyhow::Result<Vec<Box<dyn Rule>>> {
    validate_rules(config)?;

    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    if config.is_enabled(avoid_landing_page_redirects::RULE_NAME) {
        rules.push(Box::new(
            avoid_landing_page_redirects::AvoidLandingPageRedirects,
        ));
    }
    for rule in [
        inline_small_resources::InlineSmallResources::css(),
        inline_small_resources::InlineSmallResources::javascript(),
    ] {
        if config.is_enabled(rule.name()) {
            rules.push(Box::new(rule.configured(config)?));
        }
    }
    Ok(rules)
}

/// Validate the `[rules]` section: every table must name a known rule and
/// carry a boolean `enabled` when present. Rule-specific keys are checked by
/// the rules themselves.
pub fn validate_rules(config: &Config) -> anyhow::Result<()> {
    for (name, value) in &config.rules {
        if !RULE_NAMES.contains(&name.as_str()) {
            return Err(anyhow::anyhow!(
                "Unknown rule '{}' in configuration; known rules: {}",
                name,
                RULE_NAMES.join(", ")
            ));
        }
        let table = value.as_table().ok_or_else(|| {
            anyhow::anyhow!("Configuration for rule '{}' must be a table", name)
        })?;
        if let Some(enabled) = table.get("enabled") {
            if !enabled.is_bool() {
                return Err(anyhow::anyhow!(
                    "Invalid 'enabled' for rule '{}': expected a boolean",
                    name
                ));
            }
        }
    }

    for rule in [
        inline_small_resources::InlineSmallResources::css(),
        inline_small_resources::InlineSmallResources::javascript(),
    ] {
        let name = rule.name();
        rule.configured(config).map_err(|e| {
            anyhow::anyhow!("Invalid configuration for rule '{}': {}", name, e)
        })?;
    }
    Ok(())
}
