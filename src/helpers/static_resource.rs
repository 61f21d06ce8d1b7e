// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Heuristic for telling static resources from dynamically generated ones.

use crate::helpers::headers::header_has_token;
use crate::resource::{Resource, ResourceType};

/// Status codes whose responses may be stored by a cache.
const CACHEABLE_STATUS_CODES: &[u16] = &[200, 203, 206, 300, 301, 304, 410];

/// Returns true when `resource` looks like a static file rather than
/// per-request output.
pub fn is_likely_static_resource(resource: &Resource) -> bool {
    if !matches!(
        resource.resource_type(),
        ResourceType::Css
            | ResourceType::Js
            | ResourceType::Image
            | ResourceType::Flash
            | ResourceType::Text
    ) {
        return false;
    }

    if !CACHEABLE_STATUS_CODES.contains(&resource.response_status_code()) {
        return false;
    }

    let headers = resource.response_headers();
    if headers.contains_key("set-cookie") {
        return false;
    }

    let uncacheable = ["no-cache", "no-store", "private"]
        .iter()
        .any(|t| header_has_token(headers, "cache-control", t));
    !uncacheable && !header_has_token(headers, "pragma", "no-cache")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_headers_from_pairs;
    use rstest::rstest;

    #[rstest]
    #[case(200, &[("content-type", "text/css")], true)]
    #[case(200, &[("content-type", "application/javascript"), ("cache-control", "public, max-age=60")], true)]
    #[case(304, &[("content-type", "image/png")], true)]
    #[case(200, &[("content-type", "text/html")], false)]
    #[case(500, &[("content-type", "text/css")], false)]
    #[case(200, &[("content-type", "text/css"), ("set-cookie", "sid=1")], false)]
    #[case(200, &[("content-type", "text/css"), ("cache-control", "private, max-age=60")], false)]
    #[case(200, &[("content-type", "text/css"), ("cache-control", "no-store")], false)]
    #[case(200, &[("content-type", "text/css"), ("pragma", "no-cache")], false)]
    fn static_cases(
        #[case] status: u16,
        #[case] pairs: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        let r = Resource::builder("http://example.com/x")
            .status(status)
            .response_headers(make_headers_from_pairs(pairs))
            .build();
        assert_eq!(is_likely_static_resource(&r), expected);
    }
}
