// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! A single captured HTTP exchange.

use bytes::Bytes;
use hyper::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::helpers::headers::{get_header_str, media_type_of};
use crate::resource_graph::ResourceGraph;

/// Stable identity of a resource inside one [`ResourceGraph`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub usize);

/// Coarse classification of a resource, derived from status and headers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Html,
    Text,
    Css,
    Image,
    Js,
    Redirect,
    Flash,
    Other,
}

impl ResourceType {
    /// Derive the type from a status code and response headers.
    pub fn from_response(status: u16, headers: &HeaderMap) -> Self {
        if crate::helpers::status::is_redirection_status(status)
            && status != 304
            && headers.contains_key("location")
        {
            return ResourceType::Redirect;
        }

        let Some(media) = media_type_of(headers) else {
            return ResourceType::Other;
        };

        match media.as_str() {
            "text/html" | "application/xhtml+xml" => ResourceType::Html,
            "text/css" => ResourceType::Css,
            "application/x-shockwave-flash" => ResourceType::Flash,
            m if m.contains("javascript") || m.contains("ecmascript") => ResourceType::Js,
            m if m.starts_with("image/") => ResourceType::Image,
            m if m.starts_with("text/") => ResourceType::Text,
            _ => ResourceType::Other,
        }
    }
}

/// One captured request/response pair. Read-only once it is part of a graph.
#[derive(Debug, Clone)]
pub struct Resource {
    pub(crate) id: ResourceId,
    request_url: String,
    request_method: String,
    request_protocol: String,
    request_headers: HeaderMap,
    request_start_millis: Option<i64>,
    response_status_code: u16,
    response_protocol: String,
    response_headers: HeaderMap,
    response_body: Bytes,
    resource_type: ResourceType,
}

impl Resource {
    pub fn builder(url: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(url)
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn request_method(&self) -> &str {
        &self.request_method
    }

    pub fn request_protocol(&self) -> &str {
        &self.request_protocol
    }

    pub fn request_headers(&self) -> &HeaderMap {
        &self.request_headers
    }

    /// Offset from navigation start at which the request was issued, if known.
    pub fn request_start_millis(&self) -> Option<i64> {
        self.request_start_millis
    }

    pub fn response_status_code(&self) -> u16 {
        self.response_status_code
    }

    pub fn response_protocol(&self) -> &str {
        &self.response_protocol
    }

    /// Response headers. Lookups are case-insensitive and repeated headers are kept.
    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    /// First value of a response header, if present and visible ASCII.
    pub fn response_header(&self, name: &str) -> Option<&str> {
        get_header_str(&self.response_headers, name)
    }

    pub fn response_body(&self) -> &Bytes {
        &self.response_body
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Whether the request was issued after the page's onload event.
    pub fn is_lazy_loaded(&self, graph: &ResourceGraph) -> bool {
        graph.is_lazy_loaded(self)
    }
}

/// Builder used by capture loading and tests to assemble a [`Resource`].
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
    request_url: String,
    request_method: String,
    request_protocol: String,
    request_headers: HeaderMap,
    request_start_millis: Option<i64>,
    response_status_code: u16,
    response_protocol: String,
    response_headers: HeaderMap,
    response_body: Bytes,
    resource_type: Option<ResourceType>,
}

impl ResourceBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            request_url: url.into(),
            request_method: "GET".into(),
            request_protocol: "HTTP/1.1".into(),
            request_headers: HeaderMap::new(),
            request_start_millis: None,
            response_status_code: 200,
            response_protocol: "HTTP/1.1".into(),
            response_headers: HeaderMap::new(),
            response_body: Bytes::new(),
            resource_type: None,
        }
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = method.into();
        self
    }

    pub fn request_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.request_protocol = protocol.into();
        self
    }

    pub fn request_headers(mut self, headers: HeaderMap) -> Self {
        self.request_headers = headers;
        self
    }

    pub fn request_start_millis(mut self, millis: i64) -> Self {
        self.request_start_millis = Some(millis);
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.response_status_code = status;
        self
    }

    pub fn response_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.response_protocol = protocol.into();
        self
    }

    pub fn response_headers(mut self, headers: HeaderMap) -> Self {
        self.response_headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.response_body = body.into();
        self
    }

    /// Force a resource type instead of deriving it from the response.
    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn build(self) -> Resource {
        let resource_type = self.resource_type.unwrap_or_else(|| {
            ResourceType::from_response(self.response_status_code, &self.response_headers)
        });
        Resource {
            id: ResourceId(0),
            request_url: self.request_url,
            request_method: self.request_method,
            request_protocol: self.request_protocol,
            request_headers: self.request_headers,
            request_start_millis: self.request_start_millis,
            response_status_code: self.response_status_code,
            response_protocol: self.response_protocol,
            response_headers: self.response_headers,
            response_body: self.response_body,
            resource_type,
        }
    }
}
