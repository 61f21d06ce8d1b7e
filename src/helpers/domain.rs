// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Registrable-domain lookup used for same-site judgments.

use url::{Host, Url};

/// The public-suffix-aware registrable domain of `url`'s host.
///
/// Returns an empty string when it cannot be determined: unparsable URLs,
/// URLs without a host, IP literals, hosts that are themselves a public
/// suffix and hosts whose suffix is not on the public suffix list.
pub fn registrable_domain(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let host = match parsed.host() {
        Some(Host::Domain(d)) => d.trim_end_matches('.').to_ascii_lowercase(),
        _ => return String::new(),
    };
    // psl falls back to an implicit `*` rule for unlisted suffixes
    let Some(domain) = psl::domain(host.as_bytes()) else {
        return String::new();
    };
    if !domain.suffix().is_known() {
        return String::new();
    }
    std::str::from_utf8(domain.as_bytes())
        .map(str::to_string)
        .unwrap_or_default()
}
