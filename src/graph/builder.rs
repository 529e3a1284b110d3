//! Canonical graph construction from tabular rows or host-supplied arrays.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::fallback::fallback_rows;
use super::types::{FlowNode, Graph, Link, Node, NodeKind, ProcessNode};

/// One row of the inventory table: a process using a flow, plus flow metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowRow {
	/// Process name.
	pub process: String,
	/// Flow name.
	pub flow: String,
	/// URL of the flow, may be empty.
	pub link: String,
	/// What the flow does, may be empty.
	pub purpose: String,
	/// Legacy flow name, may be empty.
	pub old_name: String,
}

impl FlowRow {
	/// Row from its five columns.
	pub fn new(
		process: impl Into<String>,
		flow: impl Into<String>,
		link: impl Into<String>,
		purpose: impl Into<String>,
		old_name: impl Into<String>,
	) -> Self {
		Self {
			process: process.into(),
			flow: flow.into(),
			link: link.into(),
			purpose: purpose.into(),
			old_name: old_name.into(),
		}
	}
}

impl From<[&str; 5]> for FlowRow {
	fn from([process, flow, link, purpose, old_name]: [&str; 5]) -> Self {
		Self::new(process, flow, link, purpose, old_name)
	}
}

/// Fill `slot` from `value` only while the slot is still empty.
fn fill_empty(slot: &mut String, value: &str) {
	if slot.is_empty() && !value.is_empty() {
		*slot = value.to_string();
	}
}

/// Build the canonical graph from rows.
///
/// Process nodes come first, then flow nodes, each in first-seen order. A flow
/// named by several rows is merged: empty metadata fields are filled from later
/// rows, populated ones are never overwritten. Every row yields one link, so
/// repeated rows produce repeated links. A row without a flow name still
/// registers its process; a row without a process name is dropped.
pub fn rows_to_graph(rows: &[FlowRow]) -> Graph {
	let mut processes: Vec<ProcessNode> = Vec::new();
	let mut process_seen: HashSet<&str> = HashSet::new();
	let mut flows: Vec<FlowNode> = Vec::new();
	let mut flow_slots: HashMap<&str, usize> = HashMap::new();
	let mut links = Vec::with_capacity(rows.len());

	for row in rows {
		if row.process.is_empty() {
			warn!("flow-explorer: skipping row without process (flow={:?})", row.flow);
			continue;
		}

		if process_seen.insert(row.process.as_str()) {
			processes.push(ProcessNode::new(row.process.as_str()));
		}

		if row.flow.is_empty() {
			warn!("flow-explorer: process {:?} row has no flow", row.process);
			continue;
		}

		match flow_slots.get(row.flow.as_str()) {
			Some(&slot) => {
				let flow = &mut flows[slot];
				fill_empty(&mut flow.link, &row.link);
				fill_empty(&mut flow.purpose, &row.purpose);
				fill_empty(&mut flow.old_name, &row.old_name);
			}
			None => {
				flow_slots.insert(row.flow.as_str(), flows.len());
				flows.push(FlowNode {
					link: row.link.clone(),
					purpose: row.purpose.clone(),
					old_name: row.old_name.clone(),
					..FlowNode::new(row.flow.as_str())
				});
			}
		}

		links.push(Link::new(
			NodeKind::Process.node_id(&row.process),
			NodeKind::Flow.node_id(&row.flow),
		));
	}

	let nodes = processes
		.into_iter()
		.map(Node::from)
		.chain(flows.into_iter().map(Node::from))
		.collect();

	Graph { nodes, links }
}

/// Use host-supplied nodes and links verbatim when both are present,
/// otherwise build from the embedded fallback table.
pub fn build_from_props_or_fallback(nodes: Option<Vec<Node>>, links: Option<Vec<Link>>) -> Graph {
	match (nodes, links) {
		(Some(nodes), Some(links)) => Graph { nodes, links },
		_ => rows_to_graph(&fallback_rows()),
	}
}
