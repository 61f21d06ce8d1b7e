// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Capability flags negotiated between rules and captured inputs.
//!
//! A rule declares which parts of a capture it needs. A graph reports which
//! parts it has. Rules whose needs are not met are skipped, not failed.

use std::fmt;
use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputCapabilities(u32);

const NAMES: &[(InputCapabilities, &str)] = &[
    (InputCapabilities::DOM, "dom"),
    (InputCapabilities::LAZY_LOADED, "lazy_loaded"),
    (InputCapabilities::RESPONSE_BODY, "response_body"),
    (InputCapabilities::ONLOAD, "onload"),
];

impl InputCapabilities {
    pub const NONE: Self = Self(0);
    pub const DOM: Self = Self(1 << 0);
    pub const LAZY_LOADED: Self = Self(1 << 1);
    pub const RESPONSE_BODY: Self = Self(1 << 2);
    pub const ONLOAD: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true when every capability in `required` is present in `self`.
    pub fn satisfies(self, required: Self) -> bool {
        self.contains(required)
    }

    /// Capabilities in `required` that `self` lacks.
    pub fn missing(self, required: Self) -> Self {
        Self(required.0 & !self.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn names(self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(cap, _)| self.contains(*cap))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for InputCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for InputCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.names().join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_always_satisfied() {
        assert!(InputCapabilities::NONE.satisfies(InputCapabilities::NONE));
        assert!(InputCapabilities::DOM.satisfies(InputCapabilities::NONE));
    }

    #[test]
    fn missing_reports_only_absent_flags() {
        let have = InputCapabilities::RESPONSE_BODY | InputCapabilities::ONLOAD;
        let need = InputCapabilities::LAZY_LOADED | InputCapabilities::RESPONSE_BODY;
        assert!(!have.satisfies(need));
        assert_eq!(have.missing(need), InputCapabilities::LAZY_LOADED);
        assert_eq!(have.missing(need).to_string(), "lazy_loaded");
    }

    #[test]
    fn display_joins_names() {
        let caps = InputCapabilities::DOM | InputCapabilities::RESPONSE_BODY;
        assert_eq!(caps.to_string(), "dom|response_body");
        assert_eq!(InputCapabilities::NONE.to_string(), "none");
    }
}
