// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Flags redirects on the way to the landing page and estimates the round
//! trips each hop costs.

use std::collections::HashSet;

use tracing::{debug, error};
use url::Url;

use crate::capabilities::InputCapabilities;
use crate::formatter::Formatter;
use crate::helpers::cache::{freshness_lifetime_millis, MILLIS_IN_A_WEEK};
use crate::helpers::status::is_error_status;
use crate::helpers::uri::{host_and_port, host_is_ip_address, scheme_is_secure};
use crate::resource::{Resource, ResourceType};
use crate::result::{RedirectionDetails, ResultDetails, ResultProvider, RuleResult};
use crate::rule_input::RuleInput;
use crate::rules::Rule;

pub const RULE_NAME: &str = "AvoidLandingPageRedirects";

pub struct AvoidLandingPageRedirects;

/// Connection reuse state while walking one chain.
#[derive(Default)]
struct ConnectionTracker {
    hosts_used: HashSet<String>,
    tcp_connections_used: HashSet<String>,
}

/// Extra network setup a hop needs beyond the request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HopCost {
    dns: bool,
    tcp: bool,
    ssl: bool,
}

impl HopCost {
    fn round_trips(self) -> u32 {
        1 + self.dns as u32 + self.tcp as u32 + self.ssl as u32
    }
}

impl ConnectionTracker {
    fn seeded_with(url: &Url) -> Self {
        let mut tracker = Self::default();
        if !host_is_ip_address(url) {
            if let Some(host) = url.host_str() {
                tracker.hosts_used.insert(host.to_string());
            }
        }
        tracker.tcp_connections_used.insert(host_and_port(url));
        tracker
    }

    /// Record a request to `url` and report what had to be set up for it.
    fn visit(&mut self, url: &Url) -> HopCost {
        let dns = !host_is_ip_address(url)
            && self
                .hosts_used
                .insert(url.host_str().unwrap_or_default().to_string());
        let tcp = self.tcp_connections_used.insert(host_and_port(url));
        HopCost {
            dns,
            tcp,
            ssl: tcp && scheme_is_secure(url),
        }
    }
}

fn redirection_details(
    resource: &Resource,
    url: &Url,
    next: &Resource,
    next_url: &Url,
    chain_index: usize,
    chain_length: usize,
) -> RedirectionDetails {
    let moved_permanently = resource.response_status_code() == 301;
    let freshness = freshness_lifetime_millis(resource);
    let (is_permanent, is_cacheable) = match freshness {
        Some(lifetime) => (false, lifetime >= MILLIS_IN_A_WEEK),
        None => (moved_permanently, moved_permanently),
    };
    let current = resource.request_url();
    let raw_query = next
        .request_url()
        .split_once('?')
        .map(|(_, q)| q.split_once('#').map_or(q, |(q, _)| q));

    RedirectionDetails {
        is_permanent,
        is_cacheable,
        freshness_lifetime_millis: freshness,
        is_same_host: url.host_str() == next_url.host_str(),
        is_likely_login: next.request_url().to_ascii_lowercase().contains("login"),
        is_likely_callback: raw_query.is_some_and(|q| q.contains(current)),
        chain_index,
        chain_length,
    }
}

impl Rule for AvoidLandingPageRedirects {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn header(&self) -> &'static str {
        "Avoid landing page redirects"
    }

    fn documentation_url(&self) -> &'static str {
        "https://developers.google.com/speed/docs/insights/AvoidRedirects"
    }

    fn capability_requirements(&self) -> InputCapabilities {
        InputCapabilities::NONE
    }

    fn append_results(
        &self,
        input: &RuleInput<'_>,
        provider: &mut ResultProvider,
    ) -> anyhow::Result<()> {
        let graph = input.graph();
        let primary = graph
            .get_primary_resource()
            .ok_or_else(|| anyhow::anyhow!("Rule '{}' cannot find the primary resource", RULE_NAME))?;

        let Some(chain) = graph.get_redirect_chain_for(primary) else {
            return Ok(());
        };
        let canonical = graph.initial_resource_is_canonical();
        if chain.is_empty() || (!canonical && chain.len() <= 2) {
            return Ok(());
        }
        if chain
            .last()
            .is_some_and(|last| is_error_status(last.response_status_code()))
        {
            debug!(rule = RULE_NAME, "redirect chain ends in an error response");
            return Ok(());
        }

        let Some(first) = chain.first() else {
            return Ok(());
        };
        let Ok(first_url) = Url::parse(first.request_url()) else {
            debug!(rule = RULE_NAME, url = %first.request_url(), "unparsable landing url");
            return Ok(());
        };
        let mut tracker = ConnectionTracker::seeded_with(&first_url);

        let chain_length = chain.len();
        for idx in 0..chain_length.saturating_sub(1) {
            let (Some(resource), Some(next)) = (chain.get(idx), chain.get(idx + 1)) else {
                continue;
            };
            if resource.resource_type() != ResourceType::Redirect {
                continue;
            }
            let (Ok(url), Ok(next_url)) =
                (Url::parse(resource.request_url()), Url::parse(next.request_url()))
            else {
                debug!(rule = RULE_NAME, url = %resource.request_url(), "skipping unparsable hop");
                continue;
            };

            let cost = tracker.visit(&next_url);

            let result = provider.new_result();
            result.resource_urls.push(resource.request_url().to_string());
            result.resource_urls.push(next.request_url().to_string());
            if idx != 0 || canonical {
                result.savings.render_blocking_round_trips_saved = cost.round_trips();
                result.savings.requests_saved = 1;
            }
            result.details = ResultDetails::Redirection(redirection_details(
                resource,
                &url,
                next,
                &next_url,
                idx,
                chain_length,
            ));
        }
        Ok(())
    }

    fn format_results(&self, results: &[RuleResult], formatter: &mut Formatter) {
        if results.is_empty() {
            formatter.set_summary_line("Your page has no redirects. Learn more about avoiding landing page redirects.");
            return;
        }

        formatter.set_summary_line(format!(
            "Your page has {} redirects. Redirects introduce additional delays before the page can be loaded.",
            results.len()
        ));
        let block = formatter
            .add_block("Avoid landing page redirects for the following chain of redirected URLs.");
        if let Some(first) = results[0].resource_urls.first() {
            block.add_url(first.as_str());
        }
        for result in results {
            match result.resource_urls.as_slice() {
                [_, destination] => {
                    block.add_url(destination.as_str());
                }
                urls => {
                    error!(rule = RULE_NAME, count = urls.len(), "expected exactly two resource urls");
                }
            }
        }
    }

    fn sort_results_in_presentation_order(&self, results: &mut [RuleResult]) {
        results.sort_by_key(|r| match r.redirection_details() {
            Some(d) => d.chain_index,
            None => {
                error!(rule = RULE_NAME, "result without RedirectionDetails");
                usize::MAX
            }
        });
    }
}
