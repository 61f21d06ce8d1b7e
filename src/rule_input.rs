// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Read-only view of a graph, bound to the capabilities one rule declared.
//!
//! Rules receive a `RuleInput` rather than the graph itself so that the
//! capability check has already happened by the time they run.

use crate::capabilities::InputCapabilities;
use crate::resource_graph::ResourceGraph;

#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    graph: &'a ResourceGraph,
}

impl<'a> RuleInput<'a> {
    /// Bind `graph` for a rule needing `required`, or `None` if the capture lacks it.
    pub fn bind(graph: &'a ResourceGraph, required: InputCapabilities) -> Option<Self> {
        let available = graph.estimate_capabilities();
        available.satisfies(required).then_some(Self { graph })
    }

    pub fn graph(&self) -> &'a ResourceGraph {
        self.graph
    }
}
