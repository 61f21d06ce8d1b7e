// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use hyper::header::{HeaderName, HeaderValue};
use hyper::HeaderMap;

use crate::config::Config;
use crate::resource::Resource;

/// Build a `HeaderMap` from name/value pairs, keeping repeated names.
pub fn make_headers_from_pairs(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (k, v) in pairs {
        headers.append(
            HeaderName::from_bytes(k.as_bytes()).expect("valid test header name"),
            HeaderValue::from_str(v).expect("valid test header value"),
        );
    }
    headers
}

fn make_typed(url: &str, content_type: &str, body: &str) -> Resource {
    Resource::builder(url)
        .response_headers(make_headers_from_pairs(&[("content-type", content_type)]))
        .body(body.to_string())
        .build()
}

/// A 200 `text/html` resource.
pub fn make_html(url: &str, body: &str) -> Resource {
    make_typed(url, "text/html; charset=utf-8", body)
}

/// A 200 `text/css` resource.
pub fn make_css(url: &str, body: &str) -> Resource {
    make_typed(url, "text/css", body)
}

/// A 200 `application/javascript` resource.
pub fn make_js(url: &str, body: &str) -> Resource {
    make_typed(url, "application/javascript", body)
}

/// A redirect with an empty body pointing at `location`.
pub fn make_redirect(url: &str, status: u16, location: &str) -> Resource {
    Resource::builder(url)
        .status(status)
        .response_headers(make_headers_from_pairs(&[("location", location)]))
        .build()
}

/// Like [`make_redirect`] with extra response headers.
pub fn make_redirect_with_headers(
    url: &str,
    status: u16,
    location: &str,
    extra: &[(&str, &str)],
) -> Resource {
    let mut pairs = vec![("location", location)];
    pairs.extend_from_slice(extra);
    Resource::builder(url)
        .status(status)
        .response_headers(make_headers_from_pairs(&pairs))
        .build()
}

/// Add `[rules.<rule>] enabled = false`.
pub fn disable_rule(cfg: &mut Config, rule: &str) {
    set_rule_option(cfg, rule, "enabled", toml::Value::Boolean(false));
}

/// Set one key in the rule's table, creating the table when needed.
pub fn set_rule_option(cfg: &mut Config, rule: &str, key: &str, value: toml::Value) {
    let entry = cfg
        .rules
        .entry(rule.to_string())
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    if let toml::Value::Table(table) = entry {
        table.insert(key.to_string(), value);
    }
}
