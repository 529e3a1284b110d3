//! Process/flow graph data structures.
//!
//! The wire shape matches what a host page injects: nodes carry a `type`
//! discriminant (`"process"` or `"flow"`) and flow metadata uses camelCase keys.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Node identifiers are `"<kind>:<name>"`, see [`NodeKind::node_id`].
pub type NodeId = String;

/// Discriminant of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// Organisational workflow grouping.
	Process,
	/// Automated task, possibly shared by several processes.
	Flow,
}

impl NodeKind {
	/// Wire name of the kind, also used as the id prefix.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Process => "process",
			NodeKind::Flow => "flow",
		}
	}

	/// Capitalised name for display.
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Process => "Process",
			NodeKind::Flow => "Flow",
		}
	}

	/// Deterministic id for a named entity of this kind.
	///
	/// Repeated references to the same name collapse onto one id.
	pub fn node_id(self, name: &str) -> NodeId {
		format!("{}:{}", self.as_str(), name)
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A process node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessNode {
	/// `"process:" + name`.
	pub id: NodeId,
	/// Process name as it appears in the inventory.
	pub name: String,
}

impl ProcessNode {
	/// Create a process node with its derived id.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			id: NodeKind::Process.node_id(&name),
			name,
		}
	}
}

/// A flow node. Empty strings mean "absent" for the optional metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
	/// `"flow:" + name`.
	pub id: NodeId,
	/// Flow name as it appears in the inventory.
	pub name: String,
	/// External URL of the flow definition.
	#[serde(default)]
	pub link: String,
	/// Free-text description of what the flow does.
	#[serde(default)]
	pub purpose: String,
	/// Legacy name the flow was known by before a rename.
	#[serde(default)]
	pub old_name: String,
}

impl FlowNode {
	/// Create a flow node with its derived id and no metadata.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			id: NodeKind::Flow.node_id(&name),
			name,
			..Self::default()
		}
	}
}

/// A graph node: either a process or a flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
	/// Serialized with `"type": "process"`.
	Process(ProcessNode),
	/// Serialized with `"type": "flow"`.
	Flow(FlowNode),
}

impl Node {
	/// Unique id of the node.
	pub fn id(&self) -> &str {
		match self {
			Node::Process(p) => &p.id,
			Node::Flow(f) => &f.id,
		}
	}

	/// Display name.
	pub fn name(&self) -> &str {
		match self {
			Node::Process(p) => &p.name,
			Node::Flow(f) => &f.name,
		}
	}

	/// Process or flow.
	pub fn kind(&self) -> NodeKind {
		match self {
			Node::Process(_) => NodeKind::Process,
			Node::Flow(_) => NodeKind::Flow,
		}
	}

	/// The process payload, if this is a process node.
	pub fn as_process(&self) -> Option<&ProcessNode> {
		match self {
			Node::Process(p) => Some(p),
			Node::Flow(_) => None,
		}
	}

	/// The flow payload, if this is a flow node.
	pub fn as_flow(&self) -> Option<&FlowNode> {
		match self {
			Node::Flow(f) => Some(f),
			Node::Process(_) => None,
		}
	}
}

impl From<ProcessNode> for Node {
	fn from(node: ProcessNode) -> Self {
		Node::Process(node)
	}
}

impl From<FlowNode> for Node {
	fn from(node: FlowNode) -> Self {
		Node::Flow(node)
	}
}

/// A directed edge, process to flow in practice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
	/// Id of the process end.
	pub source: NodeId,
	/// Id of the flow end.
	pub target: NodeId,
}

impl Link {
	/// Link from `source` to `target`.
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Complete graph: nodes and links.
///
/// Every link endpoint is expected to name a node of the same graph. Graphs
/// built by [`rows_to_graph`](super::rows_to_graph) or derived by
/// [`filter_graph`](super::filter_graph) uphold this; externally supplied
/// graphs are taken as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
	/// Processes first, then flows, for graphs built from rows.
	pub nodes: Vec<Node>,
	/// Links in row order; duplicates are kept.
	pub links: Vec<Link>,
}

impl Graph {
	/// Find a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id() == id)
	}

	/// Map of id to node, for repeated lookups.
	pub fn index(&self) -> HashMap<&str, &Node> {
		self.nodes.iter().map(|n| (n.id(), n)).collect()
	}

	/// Process nodes in graph order.
	pub fn processes(&self) -> impl Iterator<Item = &ProcessNode> {
		self.nodes.iter().filter_map(Node::as_process)
	}

	/// Flow nodes in graph order.
	pub fn flows(&self) -> impl Iterator<Item = &FlowNode> {
		self.nodes.iter().filter_map(Node::as_flow)
	}

	/// Number of process nodes.
	pub fn process_count(&self) -> usize {
		self.processes().count()
	}

	/// Number of flow nodes.
	pub fn flow_count(&self) -> usize {
		self.flows().count()
	}

	/// Distinct process names, sorted. Drives the filter checkbox list.
	pub fn process_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.processes().map(|p| p.name.clone()).collect();
		names.sort();
		names.dedup();
		names
	}

	/// Links whose source or target does not name a node of this graph.
	pub fn dangling_links(&self) -> Vec<&Link> {
		let index = self.index();
		self.links
			.iter()
			.filter(|l| {
				!index.contains_key(l.source.as_str()) || !index.contains_key(l.target.as_str())
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_are_prefixed_by_kind() {
		assert_eq!(ProcessNode::new("Kongre").id, "process:Kongre");
		assert_eq!(FlowNode::new("GenerateGUID").id, "flow:GenerateGUID");
	}

	#[test]
	fn nodes_use_type_tag_on_the_wire() {
		let json = r#"[
			{"id": "process:A", "type": "process", "name": "A"},
			{"id": "flow:X", "type": "flow", "name": "X", "oldName": "LegacyX"}
		]"#;
		let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
		assert_eq!(nodes[0], Node::Process(ProcessNode::new("A")));
		let flow = nodes[1].as_flow().unwrap();
		assert_eq!(flow.old_name, "LegacyX");
		assert_eq!(flow.link, "");

		let back = serde_json::to_value(&nodes[1]).unwrap();
		assert_eq!(back["type"], "flow");
		assert_eq!(back["oldName"], "LegacyX");
	}

	#[test]
	fn dangling_links_are_reported() {
		let graph = Graph {
			nodes: vec![ProcessNode::new("A").into(), FlowNode::new("X").into()],
			links: vec![
				Link::new("process:A", "flow:X"),
				Link::new("process:A", "flow:missing"),
			],
		};
		let dangling = graph.dangling_links();
		assert_eq!(dangling.len(), 1);
		assert_eq!(dangling[0].target, "flow:missing");
	}

	#[test]
	fn process_names_are_sorted_and_distinct() {
		let graph = Graph {
			nodes: vec![
				ProcessNode::new("UTT").into(),
				ProcessNode::new("CTE").into(),
				FlowNode::new("X").into(),
			],
			links: vec![],
		};
		assert_eq!(graph.process_names(), vec!["CTE", "UTT"]);
	}
}
