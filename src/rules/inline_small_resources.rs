// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Detects small same-site CSS or JavaScript files that an HTML document
//! would load faster by inlining.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, error, info};

use crate::capabilities::InputCapabilities;
use crate::config::Config;
use crate::formatter::Formatter;
use crate::helpers::domain::registrable_domain;
use crate::helpers::html::extract_external_resource_urls;
use crate::helpers::minify::{minified_size_css, minified_size_js};
use crate::helpers::static_resource::is_likely_static_resource;
use crate::resource::{Resource, ResourceId, ResourceType};
use crate::resource_graph::InputInformation;
use crate::result::{InlineSmallResourcesDetails, ResultDetails, ResultProvider, RuleResult};
use crate::rule_input::RuleInput;
use crate::rules::Rule;

pub const INLINE_SMALL_CSS: &str = "InlineSmallCss";
pub const INLINE_SMALL_JAVASCRIPT: &str = "InlineSmallJavaScript";

/// Minified size below which a resource is worth inlining.
pub const DEFAULT_THRESHOLD_BYTES: usize = 768;

#[derive(Debug, Clone)]
pub struct InlineSmallResources {
    resource_type: ResourceType,
    threshold_bytes: usize,
}

/// Candidates found in one document, deduplicated by resource identity.
#[derive(Default)]
struct DocumentCandidates<'a> {
    seen: HashSet<ResourceId>,
    urls: Vec<&'a str>,
}

impl InlineSmallResources {
    pub fn css() -> Self {
        Self {
            resource_type: ResourceType::Css,
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
        }
    }

    pub fn javascript() -> Self {
        Self {
            resource_type: ResourceType::Js,
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
        }
    }

    pub fn with_threshold(mut self, threshold_bytes: usize) -> Self {
        self.threshold_bytes = threshold_bytes;
        self
    }

    pub fn threshold_bytes(&self) -> usize {
        self.threshold_bytes
    }

    /// Apply `threshold_bytes` from the rule's config table, when present.
    pub fn configured(self, config: &Config) -> anyhow::Result<Self> {
        let Some(value) = config
            .get_rule_config(self.name())
            .and_then(|v| v.as_table())
            .and_then(|t| t.get("threshold_bytes"))
        else {
            return Ok(self);
        };
        match value.as_integer() {
            Some(n) if n > 0 => Ok(self.with_threshold(n as usize)),
            _ => Err(anyhow::anyhow!("'threshold_bytes' must be a positive integer")),
        }
    }

    fn minified_size(&self, body: &[u8]) -> usize {
        let estimated = match self.resource_type {
            ResourceType::Css => minified_size_css(body),
            ResourceType::Js => minified_size_js(body),
            _ => None,
        };
        estimated.unwrap_or(body.len())
    }

    fn is_inline_candidate(&self, resource: &Resource, document_domain: &str) -> bool {
        if resource.resource_type() != self.resource_type {
            return false;
        }
        if !is_likely_static_resource(resource) {
            return false;
        }
        let domain = registrable_domain(resource.request_url());
        if domain.is_empty() || domain != document_domain {
            return false;
        }
        self.minified_size(resource.response_body()) < self.threshold_bytes
    }
}

impl Rule for InlineSmallResources {
    fn name(&self) -> &'static str {
        match self.resource_type {
            ResourceType::Js => INLINE_SMALL_JAVASCRIPT,
            _ => INLINE_SMALL_CSS,
        }
    }

    fn header(&self) -> &'static str {
        match self.resource_type {
            ResourceType::Js => "Inline Small JavaScript",
            _ => "Inline Small CSS",
        }
    }

    fn documentation_url(&self) -> &'static str {
        "caching.html#InlineSmallResources"
    }

    fn capability_requirements(&self) -> InputCapabilities {
        InputCapabilities::LAZY_LOADED | InputCapabilities::RESPONSE_BODY
    }

    fn append_results(
        &self,
        input: &RuleInput<'_>,
        provider: &mut ResultProvider,
    ) -> anyhow::Result<()> {
        let graph = input.graph();
        let mut by_document: BTreeMap<&str, DocumentCandidates<'_>> = BTreeMap::new();

        for document in graph.resources() {
            if document.resource_type() != ResourceType::Html || document.is_lazy_loaded(graph) {
                continue;
            }

            let Some(urls) =
                extract_external_resource_urls(document.response_body(), document.request_url())
            else {
                debug!(url = %document.request_url(), "could not scan html document");
                continue;
            };

            let document_domain = registrable_domain(document.request_url());
            if document_domain.is_empty() {
                info!(url = %document.request_url(), "got empty registrable domain");
                continue;
            }

            for url in &urls {
                let Some(resource) = graph.get_resource_with_url(url) else {
                    continue;
                };
                if !self.is_inline_candidate(resource, &document_domain) {
                    continue;
                }
                let entry = by_document.entry(document.request_url()).or_default();
                if entry.seen.insert(resource.id()) {
                    entry.urls.push(resource.request_url());
                }
            }
        }

        for (document_url, candidates) in by_document {
            let result = provider.new_result();
            result.resource_urls.push(document_url.to_string());
            result.savings.requests_saved = candidates.urls.len() as u32;
            result.details = ResultDetails::InlineSmallResources(InlineSmallResourcesDetails {
                inline_candidates: candidates.urls.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(())
    }

    fn compute_score(
        &self,
        input_info: &InputInformation,
        results: &[RuleResult],
    ) -> anyhow::Result<u8> {
        let total = input_info.count_of_type(self.resource_type);
        if total == 0 {
            return Ok(100);
        }

        let mut num_candidates = 0usize;
        for result in results {
            match result.inline_small_resources_details() {
                Some(details) => num_candidates += details.inline_candidates.len(),
                None => {
                    error!(rule = self.name(), "result without InlineSmallResourcesDetails");
                }
            }
        }

        if num_candidates > total {
            error!(
                rule = self.name(),
                num_candidates, total, "more inline candidates than resources"
            );
            return Err(anyhow::anyhow!(
                "Rule '{}' found {} candidates but only {} resources of that type",
                self.name(),
                num_candidates,
                total
            ));
        }
        Ok((100 - 100 * num_candidates / total) as u8)
    }

    fn format_results(&self, results: &[RuleResult], formatter: &mut Formatter) {
        if results.is_empty() {
            return;
        }

        let block = formatter.add_block(
            "The following external resources have small response bodies. \
             Inlining the response in HTML can reduce blocking of page rendering.",
        );
        for result in results {
            let [document_url] = result.resource_urls.as_slice() else {
                error!(
                    rule = self.name(),
                    count = result.resource_urls.len(),
                    "expected exactly one resource url"
                );
                continue;
            };
            let Some(details) = result.inline_small_resources_details() else {
                error!(rule = self.name(), "result without InlineSmallResourcesDetails");
                continue;
            };
            let child =
                block.add_child(format!("{document_url} should inline the following small resources:"));
            for url in &details.inline_candidates {
                child.add_url(url.as_str());
            }
        }
    }
}
