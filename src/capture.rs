// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Page capture loading from JSON.
//!
//! A capture records every request/response of one page load. Loading it
//! yields a [`ResourceGraph`] ready for the engine.

use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;
use hyper::HeaderMap;
use serde::Deserialize;

use crate::config::GeneralConfig;
use crate::dom::HtmlDomDocument;
use crate::resource::{Resource, ResourceType};
use crate::resource_graph::ResourceGraph;
use crate::serde_helpers::deserialize_header_pairs;

fn default_method() -> String {
    "GET".to_string()
}

fn default_protocol() -> String {
    "HTTP/1.1".to_string()
}

fn default_status() -> u16 {
    200
}

/// One captured request/response pair as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CapturedResource {
    pub request_url: String,
    #[serde(default = "default_method")]
    pub request_method: String,
    #[serde(default = "default_protocol")]
    pub request_protocol: String,
    #[serde(default, deserialize_with = "deserialize_header_pairs")]
    pub request_headers: HeaderMap,
    #[serde(default)]
    pub request_start_millis: Option<i64>,
    #[serde(default = "default_status")]
    pub response_status_code: u16,
    #[serde(default = "default_protocol")]
    pub response_protocol: String,
    #[serde(default, deserialize_with = "deserialize_header_pairs")]
    pub response_headers: HeaderMap,
    /// Body as UTF-8 text.
    #[serde(default)]
    pub response_body: Option<String>,
    /// Body as base64, for binary responses.
    #[serde(default)]
    pub response_body_base64: Option<String>,
    /// Overrides the type derived from status and headers.
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
}

impl CapturedResource {
    fn into_resource(self) -> anyhow::Result<Resource> {
        let body: Vec<u8> = match (self.response_body, self.response_body_base64) {
            (Some(_), Some(_)) => {
                return Err(anyhow::anyhow!(
                    "resource {} has both response_body and response_body_base64",
                    self.request_url
                ))
            }
            (Some(text), None) => text.into_bytes(),
            (None, Some(encoded)) => base64::engine::general_purpose::STANDARD
                .decode(encoded.trim())
                .with_context(|| format!("invalid base64 body for {}", self.request_url))?,
            (None, None) => Vec::new(),
        };

        let mut builder = Resource::builder(self.request_url)
            .request_method(self.request_method)
            .request_protocol(self.request_protocol)
            .request_headers(self.request_headers)
            .status(self.response_status_code)
            .response_protocol(self.response_protocol)
            .response_headers(self.response_headers)
            .body(body);
        if let Some(start) = self.request_start_millis {
            builder = builder.request_start_millis(start);
        }
        if let Some(resource_type) = self.resource_type {
            builder = builder.resource_type(resource_type);
        }
        Ok(builder.build())
    }
}

/// A complete page load capture.
#[derive(Debug, Clone, Deserialize)]
pub struct PageCapture {
    /// URL navigated to. Defaults to the first resource.
    #[serde(default)]
    pub primary_url: Option<String>,
    #[serde(default)]
    pub initial_resource_is_canonical: bool,
    #[serde(default)]
    pub onload_millis: Option<i64>,
    pub resources: Vec<CapturedResource>,
}

impl PageCapture {
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("failed to parse page capture")
    }

    pub async fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let s = tokio::fs::read_to_string(path_ref)
            .await
            .with_context(|| format!("failed to read capture {}", path_ref.display()))?;
        Self::from_json_str(&s).with_context(|| format!("in capture {}", path_ref.display()))
    }

    /// Build the resource graph. Settings in `general` override the capture.
    ///
    /// When the primary resource is an HTML document with a UTF-8 body, its
    /// parsed DOM is attached to the graph.
    pub fn into_graph(self, general: &GeneralConfig) -> anyhow::Result<ResourceGraph> {
        let primary_url = self
            .primary_url
            .or_else(|| self.resources.first().map(|r| r.request_url.clone()));
        let canonical = general
            .initial_resource_is_canonical
            .unwrap_or(self.initial_resource_is_canonical);

        let mut builder = ResourceGraph::builder().initial_resource_is_canonical(canonical);
        if let Some(onload) = self.onload_millis {
            builder = builder.onload_millis(onload);
        }

        let mut dom = None;
        for captured in self.resources {
            let resource = captured.into_resource()?;
            if dom.is_none() && Some(resource.request_url()) == primary_url.as_deref() {
                dom = html_document_of(&resource);
            }
            builder = builder.add_resource(resource);
        }

        if let Some(url) = primary_url {
            builder = builder.primary_url(url);
        }
        if let Some(dom) = dom {
            builder = builder.dom(Arc::new(dom));
        }
        Ok(builder.build())
    }
}

fn html_document_of(resource: &Resource) -> Option<HtmlDomDocument> {
    if resource.resource_type() != ResourceType::Html || resource.response_body().is_empty() {
        return None;
    }
    let source = std::str::from_utf8(resource.response_body()).ok()?;
    Some(HtmlDomDocument::new(resource.request_url(), source))
}

/// Load a capture file and build its graph.
pub async fn load_graph<P: AsRef<std::path::Path>>(
    path: P,
    general: &GeneralConfig,
) -> anyhow::Result<ResourceGraph> {
    PageCapture::load_from_path(path).await?.into_graph(general)
}
