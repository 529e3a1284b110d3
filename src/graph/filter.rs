//! Visible-subgraph derivation from process toggles and a text query.

use std::collections::{HashMap, HashSet};

use super::types::{Graph, Node};

/// Per-process enable overrides keyed by process name.
///
/// A name absent from the map is enabled; only an explicit `false` disables.
pub type ProcessToggles = HashMap<String, bool>;

/// Whether `name` is enabled under `toggles`.
pub fn is_process_enabled(toggles: &ProcessToggles, name: &str) -> bool {
	toggles.get(name).copied().unwrap_or(true)
}

/// Normalised, case-insensitive substring query. An empty query matches all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameQuery(String);

impl NameQuery {
	pub fn new(raw: &str) -> Self {
		Self(raw.trim().to_lowercase())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn matches(&self, name: &str) -> bool {
		self.0.is_empty() || name.to_lowercase().contains(&self.0)
	}
}

/// Derive the visible subgraph of `base`.
///
/// - A process is visible when it is enabled and its name matches `query`.
/// - A flow is visible when some enabled process links to it and its own
///   name matches `query`. Whether that process matches the query does not
///   matter.
/// - A link is kept when both endpoints are visible.
///
/// Node and link order follow `base`. The result is a fresh graph; filtering
/// a filtered graph with the same arguments returns it unchanged.
pub fn filter_graph(base: &Graph, toggles: &ProcessToggles, query: &str) -> Graph {
	let query = NameQuery::new(query);

	let allowed: HashSet<&str> = base
		.processes()
		.filter(|p| is_process_enabled(toggles, &p.name))
		.map(|p| p.id.as_str())
		.collect();

	let reachable: HashSet<&str> = base
		.links
		.iter()
		.filter(|l| allowed.contains(l.source.as_str()))
		.map(|l| l.target.as_str())
		.collect();

	let visible: HashSet<&str> = base
		.nodes
		.iter()
		.filter(|n| {
			let gate = match n {
				Node::Process(p) => allowed.contains(p.id.as_str()),
				Node::Flow(f) => reachable.contains(f.id.as_str()),
			};
			gate && query.matches(n.name())
		})
		.map(Node::id)
		.collect();

	Graph {
		nodes: base
			.nodes
			.iter()
			.filter(|n| visible.contains(n.id()))
			.cloned()
			.collect(),
		links: base
			.links
			.iter()
			.filter(|l| visible.contains(l.source.as_str()) && visible.contains(l.target.as_str()))
			.cloned()
			.collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FlowRow, rows_to_graph};

	fn sample() -> Graph {
		let rows: Vec<FlowRow> = [
			["Kongre", "Kongre PWC", "", "", ""],
			["Kongre", "GenerateGUID", "", "", ""],
			["UTT", "GenerateGUID", "", "", ""],
			["UTT", "UTT MAP", "", "", ""],
		]
		.into_iter()
		.map(FlowRow::from)
		.collect();
		rows_to_graph(&rows)
	}

	fn toggles(pairs: &[(&str, bool)]) -> ProcessToggles {
		pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
	}

	fn ids(graph: &Graph) -> Vec<&str> {
		graph.nodes.iter().map(Node::id).collect()
	}

	#[test]
	fn no_overrides_and_empty_query_keep_everything() {
		let base = sample();
		assert_eq!(filter_graph(&base, &ProcessToggles::new(), ""), base);
		assert_eq!(filter_graph(&base, &ProcessToggles::new(), "   "), base);
	}

	#[test]
	fn disabled_process_hides_its_exclusive_flows() {
		let base = sample();
		let filtered = filter_graph(&base, &toggles(&[("UTT", false)]), "");
		assert_eq!(
			ids(&filtered),
			vec!["process:Kongre", "flow:Kongre PWC", "flow:GenerateGUID"]
		);
		assert!(filtered.links.iter().all(|l| l.source == "process:Kongre"));
		assert!(filtered.dangling_links().is_empty());
	}

	#[test]
	fn explicit_true_is_same_as_absent() {
		let base = sample();
		assert_eq!(filter_graph(&base, &toggles(&[("UTT", true)]), ""), base);
	}

	#[test]
	fn query_is_case_insensitive_substring() {
		let base = sample();
		let filtered = filter_graph(&base, &ProcessToggles::new(), "kongre");
		assert_eq!(ids(&filtered), vec!["process:Kongre", "flow:Kongre PWC"]);
		assert_eq!(filtered.links.len(), 1);
	}

	#[test]
	fn flow_query_match_is_independent_of_process_match() {
		let base = sample();
		let filtered = filter_graph(&base, &ProcessToggles::new(), "guid");
		// Flow stays visible though neither process matches; links drop.
		assert_eq!(ids(&filtered), vec!["flow:GenerateGUID"]);
		assert!(filtered.links.is_empty());
	}

	#[test]
	fn filtering_is_idempotent() {
		let base = sample();
		let t = toggles(&[("Kongre", false)]);
		let once = filter_graph(&base, &t, "utt");
		let twice = filter_graph(&once, &t, "utt");
		assert_eq!(once, twice);
	}

	#[test]
	fn dangling_links_in_input_are_dropped() {
		let mut base = sample();
		base.links.push(crate::graph::Link::new("process:Kongre", "flow:ghost"));
		let filtered = filter_graph(&base, &ProcessToggles::new(), "");
		assert_eq!(filtered.links.len(), 4);
	}
}
