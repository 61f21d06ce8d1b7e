// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! The immutable set of resources captured for one page load.
//!
//! A `ResourceGraph` owns every captured [`Resource`] together with the
//! structures derived from them: the URL index, the primary resource, the
//! redirect registry and the summary counts in [`InputInformation`]. All of
//! it is computed once in [`ResourceGraphBuilder::build`] and never changes
//! afterwards, so rules can share a graph freely.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::capabilities::InputCapabilities;
use crate::dom::DomDocument;
use crate::helpers::uri::normalize;
use crate::resource::{Resource, ResourceId, ResourceType};

/// Summary counts over a graph, used to normalize rule scores.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputInformation {
    pub primary_resource_url: Option<String>,
    pub number_resources: usize,
    pub number_hosts: usize,
    pub number_html_resources: usize,
    pub number_text_resources: usize,
    pub number_css_resources: usize,
    pub number_js_resources: usize,
    pub number_image_resources: usize,
    pub number_flash_resources: usize,
    pub number_other_resources: usize,
    pub total_response_bytes: u64,
}

impl InputInformation {
    fn compute(resources: &[Resource], primary: Option<&Resource>) -> Self {
        let mut info = InputInformation {
            primary_resource_url: primary.map(|r| r.request_url().to_string()),
            number_resources: resources.len(),
            ..Default::default()
        };
        let mut hosts = HashSet::new();
        for r in resources {
            if let Some(host) = crate::helpers::uri::host_of(r.request_url()) {
                hosts.insert(host);
            }
            info.total_response_bytes += r.response_body().len() as u64;
            match r.resource_type() {
                ResourceType::Html => info.number_html_resources += 1,
                ResourceType::Text => info.number_text_resources += 1,
                ResourceType::Css => info.number_css_resources += 1,
                ResourceType::Js => info.number_js_resources += 1,
                ResourceType::Image => info.number_image_resources += 1,
                ResourceType::Flash => info.number_flash_resources += 1,
                ResourceType::Redirect | ResourceType::Other => info.number_other_resources += 1,
            }
        }
        info.number_hosts = hosts.len();
        info
    }

    /// Number of resources of the given type.
    pub fn count_of_type(&self, resource_type: ResourceType) -> usize {
        match resource_type {
            ResourceType::Html => self.number_html_resources,
            ResourceType::Text => self.number_text_resources,
            ResourceType::Css => self.number_css_resources,
            ResourceType::Js => self.number_js_resources,
            ResourceType::Image => self.number_image_resources,
            ResourceType::Flash => self.number_flash_resources,
            ResourceType::Redirect | ResourceType::Other => self.number_other_resources,
        }
    }
}

/// Maps every resource to the redirect chain it belongs to.
#[derive(Debug, Default)]
pub struct RedirectRegistry {
    chains: Vec<Vec<ResourceId>>,
    chain_of: HashMap<ResourceId, usize>,
}

impl RedirectRegistry {
    /// Link each redirect to the resource named by its `Location` header and
    /// group the links into chains.
    fn build(resources: &[Resource], url_index: &HashMap<String, ResourceId>) -> Self {
        let mut next_hop: HashMap<ResourceId, ResourceId> = HashMap::new();
        for r in resources {
            if r.resource_type() != ResourceType::Redirect {
                continue;
            }
            let Some(location) = r.response_header("location") else {
                continue;
            };
            let Some(target_url) = crate::helpers::uri::resolve_str(r.request_url(), location)
            else {
                debug!(url = %r.request_url(), %location, "unresolvable redirect location");
                continue;
            };
            match url_index.get(&target_url) {
                Some(&target) if target != r.id() => {
                    next_hop.insert(r.id(), target);
                }
                Some(_) => {
                    warn!(url = %r.request_url(), "resource redirects to itself");
                }
                None => {
                    debug!(url = %r.request_url(), target = %target_url, "redirect target not captured");
                }
            }
        }

        let targets: HashSet<ResourceId> = next_hop.values().copied().collect();
        let mut registry = RedirectRegistry::default();

        // Chains start at resources nobody redirects to. Anything left over
        // afterwards sits on a pure cycle and gets a chain of its own.
        let roots = resources
            .iter()
            .map(Resource::id)
            .filter(|id| !targets.contains(id));
        for root in roots {
            registry.add_chain(root, &next_hop, resources);
        }
        for r in resources {
            if !registry.chain_of.contains_key(&r.id()) {
                registry.add_chain(r.id(), &next_hop, resources);
            }
        }
        registry
    }

    fn add_chain(
        &mut self,
        start: ResourceId,
        next_hop: &HashMap<ResourceId, ResourceId>,
        resources: &[Resource],
    ) {
        let mut chain = vec![start];
        let mut visited: HashSet<ResourceId> = HashSet::from([start]);
        let mut current = start;
        while let Some(&next) = next_hop.get(&current) {
            if !visited.insert(next) {
                warn!(
                    url = %resources[start.0].request_url(),
                    "redirect cycle detected, truncating chain"
                );
                break;
            }
            chain.push(next);
            current = next;
        }

        let idx = self.chains.len();
        for id in &chain {
            self.chain_of.entry(*id).or_insert(idx);
        }
        self.chains.push(chain);
    }

    fn chain_ids(&self, id: ResourceId) -> Option<&[ResourceId]> {
        self.chain_of.get(&id).map(|&idx| self.chains[idx].as_slice())
    }
}

/// Borrowed view of one redirect chain, first hop to final resource.
#[derive(Debug, Clone, Copy)]
pub struct RedirectChain<'a> {
    graph: &'a ResourceGraph,
    ids: &'a [ResourceId],
}

impl<'a> RedirectChain<'a> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Resource> {
        self.ids.get(index).map(|id| &self.graph.resources[id.0])
    }

    pub fn first(&self) -> Option<&'a Resource> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&'a Resource> {
        self.ids.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Resource> + 'a {
        let graph = self.graph;
        self.ids.iter().map(move |id| &graph.resources[id.0])
    }
}

/// All captured resources for one page load plus derived structures.
#[derive(Debug)]
pub struct ResourceGraph {
    resources: Vec<Resource>,
    url_index: HashMap<String, ResourceId>,
    primary: Option<ResourceId>,
    registry: RedirectRegistry,
    initial_resource_is_canonical: bool,
    onload_millis: Option<i64>,
    dom: Option<Arc<dyn DomDocument>>,
    input_information: InputInformation,
}

impl ResourceGraph {
    pub fn builder() -> ResourceGraphBuilder {
        ResourceGraphBuilder::default()
    }

    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    /// Resources in capture order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// The resource captured under exactly this URL, if any.
    pub fn get_resource_with_url(&self, url: &str) -> Option<&Resource> {
        self.url_index
            .get(&normalize(url))
            .map(|id| &self.resources[id.0])
    }

    pub fn get_primary_resource(&self) -> Option<&Resource> {
        self.primary.map(|id| &self.resources[id.0])
    }

    pub fn get_redirect_chain_for(&self, resource: &Resource) -> Option<RedirectChain<'_>> {
        let ids = self.registry.chain_ids(resource.id())?;
        Some(RedirectChain { graph: self, ids })
    }

    /// When false, the first redirect of the landing page is not penalized.
    pub fn initial_resource_is_canonical(&self) -> bool {
        self.initial_resource_is_canonical
    }

    pub fn onload_millis(&self) -> Option<i64> {
        self.onload_millis
    }

    pub fn dom(&self) -> Option<&dyn DomDocument> {
        self.dom.as_deref()
    }

    pub fn input_information(&self) -> &InputInformation {
        &self.input_information
    }

    pub fn is_lazy_loaded(&self, resource: &Resource) -> bool {
        match (self.onload_millis, resource.request_start_millis()) {
            (Some(onload), Some(start)) => start > onload,
            _ => false,
        }
    }

    /// Capabilities this capture can satisfy.
    pub fn estimate_capabilities(&self) -> InputCapabilities {
        let mut caps = InputCapabilities::NONE;
        if self.dom.is_some() {
            caps = caps | InputCapabilities::DOM;
        }
        if self.onload_millis.is_some() {
            caps = caps | InputCapabilities::ONLOAD | InputCapabilities::LAZY_LOADED;
        }
        if self.resources.iter().any(|r| !r.response_body().is_empty()) {
            caps = caps | InputCapabilities::RESPONSE_BODY;
        }
        caps
    }
}

#[derive(Debug, Default)]
pub struct ResourceGraphBuilder {
    resources: Vec<Resource>,
    primary_url: Option<String>,
    initial_resource_is_canonical: bool,
    onload_millis: Option<i64>,
    dom: Option<Arc<dyn DomDocument>>,
}

impl ResourceGraphBuilder {
    pub fn add_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn primary_url(mut self, url: impl Into<String>) -> Self {
        self.primary_url = Some(url.into());
        self
    }

    pub fn initial_resource_is_canonical(mut self, canonical: bool) -> Self {
        self.initial_resource_is_canonical = canonical;
        self
    }

    pub fn onload_millis(mut self, millis: i64) -> Self {
        self.onload_millis = Some(millis);
        self
    }

    pub fn dom(mut self, dom: Arc<dyn DomDocument>) -> Self {
        self.dom = Some(dom);
        self
    }

    pub fn build(self) -> ResourceGraph {
        let mut resources = self.resources;
        let mut url_index = HashMap::with_capacity(resources.len());
        for (idx, r) in resources.iter_mut().enumerate() {
            r.id = ResourceId(idx);
            let key = normalize(r.request_url());
            if url_index.contains_key(&key) {
                warn!(url = %r.request_url(), "duplicate resource url, keeping first");
                continue;
            }
            url_index.insert(key, r.id);
        }

        let primary = self.primary_url.as_deref().and_then(|url| {
            let found = url_index.get(&normalize(url)).copied();
            if found.is_none() {
                warn!(%url, "primary resource not found in capture");
            }
            found
        });

        let registry = RedirectRegistry::build(&resources, &url_index);
        let input_information =
            InputInformation::compute(&resources, primary.map(|id| &resources[id.0]));

        ResourceGraph {
            resources,
            url_index,
            primary,
            registry,
            initial_resource_is_canonical: self.initial_resource_is_canonical,
            onload_millis: self.onload_millis,
            dom: self.dom,
            input_information,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_css, make_html, make_redirect};

    fn chain_urls(graph: &ResourceGraph, url: &str) -> Vec<String> {
        let r = graph.get_resource_with_url(url).expect("resource");
        graph
            .get_redirect_chain_for(r)
            .expect("chain")
            .iter()
            .map(|r| r.request_url().to_string())
            .collect()
    }

    #[test]
    fn lookup_by_url_and_primary() {
        let graph = ResourceGraph::builder()
            .add_resource(make_html("http://example.com/", ""))
            .add_resource(make_css("http://example.com/a.css", "a{}"))
            .primary_url("http://example.com/")
            .build();
        assert_eq!(
            graph.get_primary_resource().map(|r| r.request_url()),
            Some("http://example.com/")
        );
        assert!(graph.get_resource_with_url("http://example.com/a.css").is_some());
        assert!(graph.get_resource_with_url("http://example.com/missing.css").is_none());
    }

    #[test]
    fn missing_primary_is_none() {
        let graph = ResourceGraph::builder()
            .add_resource(make_html("http://example.com/", ""))
            .primary_url("http://other.example/")
            .build();
        assert!(graph.get_primary_resource().is_none());
        assert_eq!(graph.input_information().primary_resource_url, None);
    }

    #[test]
    fn duplicate_url_keeps_first() {
        let graph = ResourceGraph::builder()
            .add_resource(make_css("http://example.com/a.css", "first"))
            .add_resource(make_css("http://example.com/a.css", "second"))
            .build();
        assert_eq!(graph.num_resources(), 2);
        let r = graph.get_resource_with_url("http://example.com/a.css").unwrap();
        assert_eq!(r.response_body().as_ref(), b"first");
    }

    #[test]
    fn non_redirect_has_degenerate_chain() {
        let graph = ResourceGraph::builder()
            .add_resource(make_html("http://example.com/", ""))
            .build();
        assert_eq!(chain_urls(&graph, "http://example.com/"), vec!["http://example.com/"]);
    }

    #[test]
    fn chain_follows_relative_and_absolute_locations() {
        let graph = ResourceGraph::builder()
            .add_resource(make_redirect("http://example.com/", 301, "https://www.example.com/"))
            .add_resource(make_redirect("https://www.example.com/", 302, "/home"))
            .add_resource(make_html("https://www.example.com/home", "<html></html>"))
            .build();
        let expected = vec![
            "http://example.com/",
            "https://www.example.com/",
            "https://www.example.com/home",
        ];
        assert_eq!(chain_urls(&graph, "http://example.com/"), expected);
        // every member maps to the same chain
        assert_eq!(chain_urls(&graph, "https://www.example.com/home"), expected);

        let r = graph.get_resource_with_url("http://example.com/").unwrap();
        let chain = graph.get_redirect_chain_for(r).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.first().map(|r| r.request_url()), Some("http://example.com/"));
        assert_eq!(
            chain.last().map(|r| r.resource_type()),
            Some(ResourceType::Html)
        );
    }

    #[test]
    fn chain_matches_captured_urls_in_any_serialization() {
        let graph = ResourceGraph::builder()
            .add_resource(make_redirect("http://example.com", 301, "https://WWW.example.com"))
            .add_resource(make_redirect("https://www.example.com", 302, "/home#top"))
            .add_resource(make_html("https://www.example.com/home", "<html></html>"))
            .primary_url("http://example.com")
            .build();
        let expected = vec![
            "http://example.com",
            "https://www.example.com",
            "https://www.example.com/home",
        ];
        assert_eq!(chain_urls(&graph, "http://example.com/"), expected);
        assert!(graph.get_primary_resource().is_some());
        assert!(graph.get_resource_with_url("HTTPS://www.example.com/").is_some());
    }

    #[test]
    fn cycle_is_truncated() {
        let graph = ResourceGraph::builder()
            .add_resource(make_redirect("http://example.com/a", 302, "/b"))
            .add_resource(make_redirect("http://example.com/b", 302, "/a"))
            .build();
        assert_eq!(
            chain_urls(&graph, "http://example.com/a"),
            vec!["http://example.com/a", "http://example.com/b"]
        );
    }

    #[test]
    fn input_information_counts_types_and_hosts() {
        let graph = ResourceGraph::builder()
            .add_resource(make_html("http://example.com/", "<html></html>"))
            .add_resource(make_css("http://example.com/a.css", "a{}"))
            .add_resource(make_css("http://cdn.example.net/b.css", "b{}"))
            .add_resource(make_redirect("http://example.com/r", 302, "/"))
            .build();
        let info = graph.input_information();
        assert_eq!(info.number_resources, 4);
        assert_eq!(info.number_css_resources, 2);
        assert_eq!(info.number_html_resources, 1);
        assert_eq!(info.number_other_resources, 1);
        assert_eq!(info.number_hosts, 2);
        assert_eq!(info.total_response_bytes, 19);
        assert_eq!(info.count_of_type(ResourceType::Css), 2);
    }

    #[test]
    fn lazy_loaded_requires_onload() {
        let late = Resource::builder("http://example.com/late.js")
            .request_start_millis(2000)
            .build();
        let without_onload = ResourceGraph::builder().add_resource(late.clone()).build();
        let r = without_onload.get_resource_with_url("http://example.com/late.js").unwrap();
        assert!(!r.is_lazy_loaded(&without_onload));

        let with_onload = ResourceGraph::builder()
            .add_resource(late)
            .onload_millis(1000)
            .build();
        let r = with_onload.get_resource_with_url("http://example.com/late.js").unwrap();
        assert!(r.is_lazy_loaded(&with_onload));
    }

    #[test]
    fn capabilities_reflect_capture_contents() {
        let bare = ResourceGraph::builder()
            .add_resource(Resource::builder("http://example.com/").build())
            .build();
        assert_eq!(bare.estimate_capabilities(), InputCapabilities::NONE);

        let full = ResourceGraph::builder()
            .add_resource(make_html("http://example.com/", "<html></html>"))
            .onload_millis(100)
            .dom(Arc::new(crate::dom::HtmlDomDocument::new(
                "http://example.com/",
                "<html></html>",
            )))
            .build();
        let caps = full.estimate_capabilities();
        assert!(caps.satisfies(
            InputCapabilities::DOM
                | InputCapabilities::LAZY_LOADED
                | InputCapabilities::RESPONSE_BODY
                | InputCapabilities::ONLOAD
        ));
    }
}
