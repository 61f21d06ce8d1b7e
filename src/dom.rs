// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Read-only DOM access for rules that declare `InputCapabilities::DOM`.

use scraper::{ElementRef, Html};
use url::Url;

/// One element visited during a DOM traversal.
pub trait DomElement {
    /// Upper-case tag name, e.g. `IMG`.
    fn tag_name(&self) -> String;

    /// Absolute URL of the resource this element loads, if any.
    fn get_resource_url(&self) -> Option<String>;

    fn get_attribute_by_name(&self, name: &str) -> Option<String>;

    /// Integer-valued property such as `width` or `height`.
    fn get_int_property_by_name(&self, name: &str) -> Option<i64>;
}

/// A captured document that can be walked element by element in document order.
pub trait DomDocument: Send + Sync + std::fmt::Debug {
    fn document_url(&self) -> &str;

    fn traverse(&self, visitor: &mut dyn FnMut(&dyn DomElement));
}

/// DOM backed by the captured HTML source. The source is re-parsed on each
/// traversal because parsed trees are not shareable across threads.
#[derive(Debug, Clone)]
pub struct HtmlDomDocument {
    url: String,
    source: String,
}

impl HtmlDomDocument {
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

impl DomDocument for HtmlDomDocument {
    fn document_url(&self) -> &str {
        &self.url
    }

    fn traverse(&self, visitor: &mut dyn FnMut(&dyn DomElement)) {
        let html = Html::parse_document(&self.source);
        let base = crate::helpers::html::document_base_url(&html, &self.url);
        for node in html.root_element().descendants() {
            if let Some(element) = ElementRef::wrap(node) {
                visitor(&ScrapedElement {
                    element,
                    base: base.as_ref(),
                });
            }
        }
    }
}

struct ScrapedElement<'a> {
    element: ElementRef<'a>,
    base: Option<&'a Url>,
}

impl DomElement for ScrapedElement<'_> {
    fn tag_name(&self) -> String {
        self.element.value().name().to_ascii_uppercase()
    }

    fn get_resource_url(&self) -> Option<String> {
        let attr = match self.element.value().name() {
            "img" | "script" | "iframe" | "frame" | "embed" | "audio" | "video" | "source" => "src",
            "link" => "href",
            "object" => "data",
            _ => return None,
        };
        let raw = self.element.value().attr(attr)?;
        crate::helpers::uri::resolve(self.base, raw)
    }

    fn get_attribute_by_name(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    fn get_int_property_by_name(&self, name: &str) -> Option<i64> {
        self.element.value().attr(name)?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traverse_visits_elements_in_document_order() {
        let dom = HtmlDomDocument::new(
            "http://example.com/dir/page.html",
            r#"<html><body><img src="a.png" width="10" height="20"><script src="/b.js"></script></body></html>"#,
        );
        let mut seen = Vec::new();
        dom.traverse(&mut |el| {
            if let Some(url) = el.get_resource_url() {
                seen.push((el.tag_name(), url, el.get_int_property_by_name("width")));
            }
        });
        assert_eq!(
            seen,
            vec![
                (
                    "IMG".to_string(),
                    "http://example.com/dir/a.png".to_string(),
                    Some(10)
                ),
                ("SCRIPT".to_string(), "http://example.com/b.js".to_string(), None),
            ]
        );
    }

    #[test]
    fn non_numeric_int_property_is_none() {
        let dom = HtmlDomDocument::new("http://example.com/", r#"<img src="a.png" width="auto">"#);
        let mut widths = Vec::new();
        dom.traverse(&mut |el| {
            if el.tag_name() == "IMG" {
                widths.push(el.get_int_property_by_name("width"));
            }
        });
        assert_eq!(widths, vec![None]);
    }
}
