// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! HTML scanning for externally referenced resources.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

const EXTERNAL_RESOURCE_SELECTOR_STR: &str = "script[src], link[href], img[src], \
     iframe[src], frame[src], embed[src], object[data], input[type=image][src], \
     body[background]";
const BASE_SELECTOR_STR: &str = "base[href]";

static EXTERNAL_RESOURCE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(EXTERNAL_RESOURCE_SELECTOR_STR)
        .expect("Failed to parse external resource selector - this is a bug")
});

static BASE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(BASE_SELECTOR_STR).expect("Failed to parse base selector - this is a bug")
});

/// The URL relative references in `html` resolve against: `<base href>` when
/// present, otherwise the document URL.
pub fn document_base_url(html: &Html, document_url: &str) -> Option<Url> {
    let document = Url::parse(document_url).ok()?;
    let base_href = html
        .select(&BASE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"));
    match base_href {
        Some(href) => document.join(href.trim()).ok().or(Some(document)),
        None => Some(document),
    }
}

/// Absolute URLs of the external resources `html_body` references, in
/// document order. Script-inserted references are not discovered.
///
/// Returns `None` when the body is not UTF-8 or the base URL does not parse.
pub fn extract_external_resource_urls(html_body: &[u8], base_url: &str) -> Option<Vec<String>> {
    let source = std::str::from_utf8(html_body).ok()?;
    let html = Html::parse_document(source);
    let base = document_base_url(&html, base_url)?;

    let urls = html
        .select(&EXTERNAL_RESOURCE_SELECTOR)
        .filter_map(|el| reference_of(&el))
        .filter_map(|raw| super::uri::resolve(Some(&base), raw))
        .collect();
    Some(urls)
}

fn reference_of<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    let v = el.value();
    match v.name() {
        "link" => {
            let rel = v.attr("rel")?;
            rel.split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case("stylesheet"))
                .then(|| v.attr("href"))
                .flatten()
        }
        "object" => v.attr("data"),
        "body" => v.attr("background"),
        _ => v.attr("src"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_scripts_stylesheets_and_images_in_order() {
        let body = br#"<html><head>
            <link rel="stylesheet" href="a.css">
            <link rel="icon" href="favicon.ico">
            <script src="/js/b.js"></script>
            <script>var inline = 1;</script>
        </head><body>
            <img src="c.png"><iframe src="https://other.example/frame"></iframe>
            <link rel="Alternate StyleSheet" href="d.css">
        </body></html>"#;
        let urls = extract_external_resource_urls(body, "http://example.com/dir/").unwrap();
        assert_eq!(
            urls,
            vec![
                "http://example.com/dir/a.css",
                "http://example.com/js/b.js",
                "http://example.com/dir/c.png",
                "https://other.example/frame",
                "http://example.com/dir/d.css",
            ]
        );
    }

    #[test]
    fn base_href_changes_resolution() {
        let body = br#"<html><head><base href="http://static.example.com/v2/"></head>
            <body><script src="app.js"></script></body></html>"#;
        let urls = extract_external_resource_urls(body, "http://example.com/").unwrap();
        assert_eq!(urls, vec!["http://static.example.com/v2/app.js"]);
    }

    #[test]
    fn repeated_references_are_all_reported() {
        let body = br#"<script src="a.js"></script><script src="a.js"></script>"#;
        let urls = extract_external_resource_urls(body, "http://example.com/").unwrap();
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn non_utf8_body_is_none() {
        assert!(extract_external_resource_urls(&[0xff, 0xfe, 0x00], "http://example.com/").is_none());
    }

    #[test]
    fn bad_base_url_is_none() {
        assert!(extract_external_resource_urls(b"<p>x</p>", "not a url").is_none());
    }
}
