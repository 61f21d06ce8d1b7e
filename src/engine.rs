// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Rule evaluation over a resource graph.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::formatter::Formatter;
use crate::resource_graph::{InputInformation, ResourceGraph};
use crate::result::{ResultProvider, RuleResult};
use crate::rule_input::RuleInput;
use crate::rules::Rule;

/// Outcome of running a single rule.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RuleStatus {
    Completed { score: u8 },
    /// Results were produced but the score could not be computed.
    ScoreFailed { error: String },
    /// The graph lacks capabilities the rule needs.
    Skipped { missing: Vec<&'static str> },
    Failed { error: String },
}

#[derive(Serialize, Debug, Clone)]
pub struct RuleReport {
    pub name: &'static str,
    pub header: &'static str,
    pub documentation_url: &'static str,
    pub status: RuleStatus,
    pub results: Vec<RuleResult>,
    pub formatted: Formatter,
}

impl RuleReport {
    pub fn score(&self) -> Option<u8> {
        match self.status {
            RuleStatus::Completed { score } => Some(score),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Report {
    pub input_information: InputInformation,
    pub rules: Vec<RuleReport>,
}

impl Report {
    pub fn rule(&self, name: &str) -> Option<&RuleReport> {
        self.rules.iter().find(|r| r.name == name)
    }
}

pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
}

impl Engine {
    /// Build an engine with every rule the configuration enables.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_rules(crate::rules::build_rules(cfg)?))
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule against `graph`. A failing rule never stops the others.
    pub fn run(&self, graph: &ResourceGraph) -> Report {
        Report {
            input_information: graph.input_information().clone(),
            rules: self.rules.iter().map(|r| run_rule(r.as_ref(), graph)).collect(),
        }
    }
}

fn run_rule(rule: &dyn Rule, graph: &ResourceGraph) -> RuleReport {
    let mut report = RuleReport {
        name: rule.name(),
        header: rule.header(),
        documentation_url: rule.documentation_url(),
        status: RuleStatus::Skipped { missing: Vec::new() },
        results: Vec::new(),
        formatted: Formatter::new(),
    };

    let required = rule.capability_requirements();
    let Some(input) = RuleInput::bind(graph, required) else {
        let missing = graph.estimate_capabilities().missing(required);
        info!(rule = rule.name(), %missing, "skipping rule, capture lacks capabilities");
        report.status = RuleStatus::Skipped {
            missing: missing.names(),
        };
        return report;
    };

    let mut provider = ResultProvider::new();
    if let Err(e) = rule.append_results(&input, &mut provider) {
        warn!(rule = rule.name(), error = %e, "rule failed");
        report.status = RuleStatus::Failed {
            error: e.to_string(),
        };
        return report;
    }

    let mut results: Vec<RuleResult> = provider
        .into_results()
        .into_iter()
        .filter(|r| {
            if r.resource_urls.is_empty() {
                error!(rule = rule.name(), "dropping result without resource urls");
                return false;
            }
            true
        })
        .collect();

    report.status = match rule.compute_score(graph.input_information(), &results) {
        Ok(score) => RuleStatus::Completed { score },
        Err(e) => {
            error!(rule = rule.name(), error = %e, "score computation failed");
            RuleStatus::ScoreFailed {
                error: e.to_string(),
            }
        }
    };

    rule.sort_results_in_presentation_order(&mut results);
    rule.format_results(&results, &mut report.formatted);
    report.results = results;
    report
}
