//! Neighbourhood lookups over a graph.
//!
//! Both lookups tolerate a node of the wrong kind and return an empty list.

use std::collections::HashSet;

use super::types::{FlowNode, Graph, Node, ProcessNode};

/// Flows targeted by links from `node`, in link order.
///
/// Repeated links yield repeated entries.
pub fn connected_flows<'g>(graph: &'g Graph, node: &Node) -> Vec<&'g FlowNode> {
	let Node::Process(process) = node else {
		return Vec::new();
	};
	let index = graph.index();
	graph
		.links
		.iter()
		.filter(|l| l.source == process.id)
		.filter_map(|l| index.get(l.target.as_str()).copied().and_then(Node::as_flow))
		.collect()
}

/// Processes linking to `node`, distinct by name, in first-seen order.
pub fn connected_processes<'g>(graph: &'g Graph, node: &Node) -> Vec<&'g ProcessNode> {
	let Node::Flow(flow) = node else {
		return Vec::new();
	};
	let index = graph.index();
	let mut seen = HashSet::new();
	graph
		.links
		.iter()
		.filter(|l| l.target == flow.id)
		.filter_map(|l| index.get(l.source.as_str()).copied().and_then(Node::as_process))
		.filter(|p| seen.insert(p.name.as_str()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FlowRow, rows_to_graph};

	fn sample() -> Graph {
		let rows: Vec<FlowRow> = [
			["A", "X", "", "", ""],
			["A", "Y", "", "", ""],
			["B", "X", "", "", ""],
			["A", "X", "", "", ""],
		]
		.into_iter()
		.map(FlowRow::from)
		.collect();
		rows_to_graph(&rows)
	}

	#[test]
	fn flows_follow_link_order_with_repeats() {
		let graph = sample();
		let a = graph.node("process:A").unwrap();
		let names: Vec<&str> = connected_flows(&graph, a)
			.iter()
			.map(|f| f.name.as_str())
			.collect();
		assert_eq!(names, vec!["X", "Y", "X"]);
	}

	#[test]
	fn processes_are_distinct_by_name() {
		let graph = sample();
		let x = graph.node("flow:X").unwrap();
		let names: Vec<&str> = connected_processes(&graph, x)
			.iter()
			.map(|p| p.name.as_str())
			.collect();
		assert_eq!(names, vec!["A", "B"]);
	}

	#[test]
	fn wrong_kind_yields_empty() {
		let graph = sample();
		let a = graph.node("process:A").unwrap();
		let x = graph.node("flow:X").unwrap();
		assert!(connected_processes(&graph, a).is_empty());
		assert!(connected_flows(&graph, x).is_empty());
	}

	#[test]
	fn lookups_ignore_links_to_missing_nodes() {
		let mut graph = sample();
		graph.links.push(crate::graph::Link::new("process:A", "flow:gone"));
		let a = graph.node("process:A").unwrap().clone();
		assert_eq!(connected_flows(&graph, &a).len(), 3);
	}
}
