// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Human-readable rendering of rule results as a tree of text blocks.

use serde::Serialize;

/// One line of output with the URLs it mentions and nested lines below it.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FormattedBlock>,
}

impl FormattedBlock {
    /// Append a child line and return it so further lines can nest under it.
    pub fn add_child(&mut self, text: impl Into<String>) -> &mut FormattedBlock {
        self.children.push(FormattedBlock {
            text: text.into(),
            ..Default::default()
        });
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a child line naming a single URL.
    pub fn add_url(&mut self, url: impl Into<String>) -> &mut FormattedBlock {
        let url = url.into();
        let child = self.add_child(url.clone());
        child.urls.push(url);
        child
    }

    /// Render as indented plain text.
    pub fn render(&self, depth: usize, out: &mut String) {
        if !self.text.is_empty() {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&self.text);
            out.push('\n');
        }
        for child in &self.children {
            child.render(depth + 1, out);
        }
    }
}

/// Collects the formatted output of one rule.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub blocks: Vec<FormattedBlock>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_summary_line(&mut self, text: impl Into<String>) {
        self.summary = Some(text.into());
    }

    pub fn add_block(&mut self, text: impl Into<String>) -> &mut FormattedBlock {
        self.blocks.push(FormattedBlock {
            text: text.into(),
            ..Default::default()
        });
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(summary) = &self.summary {
            out.push_str(summary);
            out.push('\n');
        }
        for block in &self.blocks {
            block.render(0, &mut out);
        }
        out
    }
}
