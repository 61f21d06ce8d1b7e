// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Page-speed rule evaluation over captured page loads.
//!
//! This library provides the core functionality for lint-page, including
//! the resource graph, the rule contract and its rules, capture loading,
//! configuration, and the engine that scores a page.

pub mod capabilities;
pub mod capture;
pub mod config;
pub mod dom;
pub mod engine;
pub mod formatter;
pub mod helpers;
pub mod http_date;
pub mod resource;
pub mod resource_graph;
pub mod result;
pub mod rule_input;
pub mod rules;
mod serde_helpers;

#[cfg(test)]
mod test_helpers;
