// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Explicit freshness lifetime of a cached response.

use crate::helpers::headers::{cache_control_directives, get_header_str, header_has_token};
use crate::http_date::parse_http_date_to_datetime;
use crate::resource::Resource;

pub const MILLIS_IN_A_DAY: i64 = 1000 * 60 * 60 * 24;
pub const MILLIS_IN_A_WEEK: i64 = MILLIS_IN_A_DAY * 7;

/// Freshness lifetime in milliseconds when the response states one explicitly.
///
/// `Cache-Control: no-cache`/`no-store` and `Pragma: no-cache` count as an
/// explicit lifetime of zero. `s-maxage` wins over `max-age`, which wins over
/// `Expires - Date`. An unparsable `Expires` means already expired. Returns
/// `None` when nothing explicit is present.
pub fn freshness_lifetime_millis(resource: &Resource) -> Option<i64> {
    let headers = resource.response_headers();
    let directives = cache_control_directives(headers);

    if directives
        .iter()
        .any(|d| d.name == "no-cache" || d.name == "no-store")
        || header_has_token(headers, "pragma", "no-cache")
    {
        return Some(0);
    }

    let max_age = |name: &str| {
        directives
            .iter()
            .find(|d| d.name == name)
            .and_then(|d| d.value.as_deref())
            .and_then(|v| v.parse::<i64>().ok())
    };
    if let Some(secs) = max_age("s-maxage").or_else(|| max_age("max-age")) {
        return Some(secs.max(0).saturating_mul(1000));
    }

    let expires = get_header_str(headers, "expires")?;
    let Ok(expires) = parse_http_date_to_datetime(expires.trim()) else {
        return Some(0);
    };
    let date = get_header_str(headers, "date")
        .and_then(|d| parse_http_date_to_datetime(d.trim()).ok())?;
    Some((expires - date).num_milliseconds().max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_headers_from_pairs;
    use rstest::rstest;

    #[rstest]
    #[case(&[], None)]
    #[case(&[("cache-control", "max-age=60")], Some(60_000))]
    #[case(&[("cache-control", "public, max-age=604800")], Some(MILLIS_IN_A_WEEK))]
    #[case(&[("cache-control", "max-age=60, s-maxage=120")], Some(120_000))]
    #[case(&[("cache-control", "max-age=600, no-cache")], Some(0))]
    #[case(&[("cache-control", "no-store")], Some(0))]
    #[case(&[("pragma", "no-cache")], Some(0))]
    #[case(&[("cache-control", "max-age=abc")], None)]
    #[case(&[("cache-control", "max-age=-5")], Some(0))]
    #[case(
        &[
            ("date", "Wed, 21 Oct 2015 07:28:00 GMT"),
            ("expires", "Thu, 22 Oct 2015 07:28:00 GMT"),
        ],
        Some(MILLIS_IN_A_DAY)
    )]
    #[case(
        &[
            ("date", "Thu, 22 Oct 2015 07:28:00 GMT"),
            ("expires", "Wed, 21 Oct 2015 07:28:00 GMT"),
        ],
        Some(0)
    )]
    #[case(&[("expires", "Thu, 22 Oct 2015 07:28:00 GMT")], None)]
    #[case(&[("expires", "0")], Some(0))]
    fn freshness_cases(#[case] pairs: &[(&str, &str)], #[case] expected: Option<i64>) {
        let r = Resource::builder("http://example.com/")
            .response_headers(make_headers_from_pairs(pairs))
            .build();
        assert_eq!(freshness_lifetime_millis(&r), expected);
    }
}
