// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Structured rule output.

use serde::Serialize;

/// Estimated cost avoided if a result's recommendation is applied.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Savings {
    pub requests_saved: u32,
    pub render_blocking_round_trips_saved: u32,
    pub connections_saved: u32,
    pub dns_requests_saved: u32,
}

impl Savings {
    pub fn is_empty(&self) -> bool {
        *self == Savings::default()
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineSmallResourcesDetails {
    pub inline_candidates: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectionDetails {
    pub is_permanent: bool,
    pub is_cacheable: bool,
    pub freshness_lifetime_millis: Option<i64>,
    pub is_same_host: bool,
    pub is_likely_login: bool,
    pub is_likely_callback: bool,
    pub chain_index: usize,
    pub chain_length: usize,
}

/// Rule-specific payload. Only the rule that produced a result reads it.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultDetails {
    #[default]
    None,
    InlineSmallResources(InlineSmallResourcesDetails),
    Redirection(RedirectionDetails),
}

/// One finding of one rule.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleResult {
    pub resource_urls: Vec<String>,
    pub savings: Savings,
    pub details: ResultDetails,
}

impl RuleResult {
    pub fn inline_small_resources_details(&self) -> Option<&InlineSmallResourcesDetails> {
        match &self.details {
            ResultDetails::InlineSmallResources(d) => Some(d),
            _ => None,
        }
    }

    pub fn redirection_details(&self) -> Option<&RedirectionDetails> {
        match &self.details {
            ResultDetails::Redirection(d) => Some(d),
            _ => None,
        }
    }
}

/// Append-only sink handed to a single rule invocation.
#[derive(Debug, Default)]
pub struct ResultProvider {
    results: Vec<RuleResult>,
}

impl ResultProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty result and return it for filling in.
    pub fn new_result(&mut self) -> &mut RuleResult {
        self.results.push(RuleResult::default());
        let last = self.results.len() - 1;
        &mut self.results[last]
    }

    pub fn into_results(self) -> Vec<RuleResult> {
        self.results
    }
}
