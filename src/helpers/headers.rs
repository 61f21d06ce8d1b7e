// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use hyper::HeaderMap;

/// Retrieve a header value as a string, if it exists and contains only visible ASCII.
///
/// Returns `None` if the header is missing or contains non-visible ASCII characters
/// (control characters) or non-ASCII bytes.
pub fn get_header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Parse a comma-separated list of header values (e.g., Cache-Control, Pragma).
///
/// This iterator splits by comma, trims whitespace, and skips empty parts.
pub fn parse_list_header(val: &str) -> impl Iterator<Item = &str> {
    val.split(',').map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Lower-cased `type/subtype` of the `Content-Type` header, without parameters.
pub fn media_type_of(headers: &HeaderMap) -> Option<String> {
    let val = get_header_str(headers, "content-type")?;
    let media = val.split(';').next()?.trim();
    if media.is_empty() || !media.contains('/') {
        return None;
    }
    Some(media.to_ascii_lowercase())
}

/// A single `Cache-Control` directive, name lower-cased, value unquoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirective {
    pub name: String,
    pub value: Option<String>,
}

/// Collect directives across every `Cache-Control` header line.
pub fn cache_control_directives(headers: &HeaderMap) -> Vec<CacheDirective> {
    let mut out = Vec::new();
    for hv in headers.get_all("cache-control").iter() {
        let Ok(s) = hv.to_str() else {
            continue;
        };
        for part in parse_list_header(s) {
            let mut it = part.splitn(2, '=');
            let name = it.next().unwrap_or("").trim().to_ascii_lowercase();
            if name.is_empty() {
                continue;
            }
            let value = it
                .next()
                .map(|v| v.trim().trim_matches('"').to_string());
            out.push(CacheDirective { name, value });
        }
    }
    out
}

/// True when any header line named `name` lists `token` (case-insensitive).
pub fn header_has_token(headers: &HeaderMap, name: &str, token: &str) -> bool {
    headers.get_all(name).iter().any(|hv| {
        hv.to_str()
            .map(|s| {
                parse_list_header(s).any(|p| {
                    p.split('=')
                        .next()
                        .map(|n| n.trim().eq_ignore_ascii_case(token))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    })
}
