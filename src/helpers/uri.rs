// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Small reusable helpers for URL handling used by the graph and several rules.

use url::{Host, Url};

/// Resolve `raw` against `base` (or parse it as absolute when there is no base).
///
/// Only http(s) results are returned, with any fragment removed so the value
/// can be matched against captured request URLs.
pub fn resolve(base: Option<&Url>, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut url = match base {
        Some(b) => b.join(raw).ok()?,
        None => Url::parse(raw).ok()?,
    };
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

/// Like [`resolve`], with the base given as a string.
pub fn resolve_str(base: &str, raw: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    resolve(Some(&base), raw)
}

/// Canonical form used to key and look up captured URLs: parsed and
/// re-serialized with the fragment dropped, the same shape [`resolve`]
/// produces. Unparsable input is returned trimmed.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// Host of an absolute URL, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

/// `host:port`, inferring the port from the scheme when it is not explicit.
pub fn host_and_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    let port = url
        .port()
        .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });
    format!("{}:{}", host, port)
}

pub fn host_is_ip_address(url: &Url) -> bool {
    matches!(url.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)))
}

pub fn scheme_is_secure(url: &Url) -> bool {
    matches!(url.scheme(), "https" | "wss")
}
