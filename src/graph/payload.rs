//! Graph data injected by the host page.
//!
//! Expected format: JSON `{ "nodes": [...], "links": [...], "forces": {...} }`,
//! every key optional.

use serde::Deserialize;

use super::builder::build_from_props_or_fallback;
use super::types::{Graph, Link, Node};
use crate::components::force_graph::ForceConfig;
use crate::error::GraphLoadError;

/// Host-supplied props. Nodes and links are only used when both are present.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InjectedGraph {
	pub nodes: Option<Vec<Node>>,
	pub links: Option<Vec<Link>>,
	/// Layout overrides; missing fields keep their defaults.
	pub forces: Option<ForceConfig>,
}

impl InjectedGraph {
	pub fn from_json(text: &str) -> Result<Self, GraphLoadError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Whether the canonical graph will come from these props rather than the
	/// fallback table.
	pub fn supplies_graph(&self) -> bool {
		self.nodes.is_some() && self.links.is_some()
	}

	/// Split into the canonical graph and the layout overrides.
	pub fn into_parts(self) -> (Graph, Option<ForceConfig>) {
		(build_from_props_or_fallback(self.nodes, self.links), self.forces)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_payload_is_used_verbatim() {
		let payload = InjectedGraph::from_json(
			r#"{
				"nodes": [
					{"id": "process:P", "type": "process", "name": "P"},
					{"id": "flow:F", "type": "flow", "name": "F", "purpose": "sync"}
				],
				"links": [{"source": "process:P", "target": "flow:F"}]
			}"#,
		)
		.unwrap();
		assert!(payload.supplies_graph());
		let (graph, forces) = payload.into_parts();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.flows().next().unwrap().purpose, "sync");
		assert!(forces.is_none());
	}

	#[test]
	fn forces_only_payload_keeps_fallback_graph() {
		let payload = InjectedGraph::from_json(r#"{"forces": {"link_distance": 140.0}}"#).unwrap();
		assert!(!payload.supplies_graph());
		let (graph, forces) = payload.into_parts();
		assert!(graph.node("process:Kongre").is_some());
		let forces = forces.unwrap();
		assert_eq!(forces.link_distance, 140.0);
		assert_eq!(forces.charge, ForceConfig::default().charge);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = InjectedGraph::from_json("{ nodes: ").unwrap_err();
		assert!(matches!(err, GraphLoadError::Parse(_)));
	}
}
