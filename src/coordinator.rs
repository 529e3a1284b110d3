//! Application state shared by both views.
//!
//! One [`Coordinator`] value owns the view mode, search query, process
//! toggles, the selected node (detail panel) and the hovered node (tooltip).
//! Selection and hover are independent slots: changing one never touches the
//! other. The app keeps it in a single `RwSignal` provided as context.

use log::debug;

use crate::graph::{
	FlowNode, Graph, Node, NodeId, ProcessNode, ProcessToggles, connected_flows,
	connected_processes, filter_graph, is_process_enabled,
};

/// Which presentation is mounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	/// Force-directed node diagram.
	#[default]
	Force,
	/// Collapsible card list grouped by process.
	Swimlane,
}

impl ViewMode {
	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			ViewMode::Force => ViewMode::Swimlane,
			ViewMode::Swimlane => ViewMode::Force,
		}
	}

	/// Button caption.
	pub fn label(self) -> &'static str {
		match self {
			ViewMode::Force => "Force Graph",
			ViewMode::Swimlane => "Swimlane",
		}
	}
}

/// Screen-space anchor of the hover tooltip, in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverPosition {
	/// Pointer x in viewport pixels.
	pub x: f64,
	/// Pointer y in viewport pixels.
	pub y: f64,
}

impl HoverPosition {
	/// Anchor at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// UI state machine. Every setter applies fully before returning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinator {
	view_mode: ViewMode,
	query: String,
	process_enabled: ProcessToggles,
	selected: Option<NodeId>,
	hovered: Option<NodeId>,
	hover_position: HoverPosition,
}

impl Coordinator {
	/// Force view, no filters, nothing selected or hovered.
	pub fn new() -> Self {
		Self::default()
	}

	/// Active view.
	pub fn view_mode(&self) -> ViewMode {
		self.view_mode
	}

	/// Switch views. Filters, selection and hover are left alone.
	pub fn set_view_mode(&mut self, mode: ViewMode) {
		if self.view_mode != mode {
			debug!("flow-explorer: view mode {:?} -> {:?}", self.view_mode, mode);
			self.view_mode = mode;
		}
	}

	/// Switch to the other view.
	pub fn toggle_view_mode(&mut self) {
		self.set_view_mode(self.view_mode.toggled());
	}

	/// Raw search text as typed.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Replace the search text.
	pub fn set_query(&mut self, text: impl Into<String>) {
		self.query = text.into();
	}

	/// Explicit per-process overrides. Absent names are enabled.
	pub fn process_toggles(&self) -> &ProcessToggles {
		&self.process_enabled
	}

	/// Whether `name` passes the process toggles.
	pub fn is_process_enabled(&self, name: &str) -> bool {
		is_process_enabled(&self.process_enabled, name)
	}

	/// Enable or disable one process.
	pub fn set_process_filter(&mut self, name: impl Into<String>, enabled: bool) {
		let name = name.into();
		debug!("flow-explorer: process {name:?} enabled={enabled}");
		self.process_enabled.insert(name, enabled);
	}

	/// Clear the query and every process override.
	pub fn reset_filters(&mut self) {
		debug!("flow-explorer: filters reset");
		self.query.clear();
		self.process_enabled.clear();
	}

	/// Whether the query or any override narrows the graph.
	pub fn has_active_filters(&self) -> bool {
		!self.query.trim().is_empty() || self.process_enabled.values().any(|enabled| !enabled)
	}

	/// Id of the node shown in the detail panel.
	pub fn selected_node_id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Set or clear the detail-panel target. Hover is untouched.
	pub fn select_node(&mut self, node: Option<&Node>) {
		self.selected = node.map(|n| n.id().to_string());
		debug!("flow-explorer: selected {:?}", self.selected);
	}

	/// Id of the node under the pointer.
	pub fn hovered_node_id(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Where the tooltip is anchored.
	pub fn hover_position(&self) -> HoverPosition {
		self.hover_position
	}

	/// Set or clear the tooltip target and its anchor. Selection is untouched.
	pub fn set_hover(&mut self, node: Option<&Node>, position: HoverPosition) {
		self.hovered = node.map(|n| n.id().to_string());
		self.hover_position = position;
	}

	/// Visible subgraph of `base` under the current query and toggles.
	pub fn filtered_graph(&self, base: &Graph) -> Graph {
		filter_graph(base, &self.process_enabled, &self.query)
	}

	/// Flows linked from `node` in `filtered`; empty for flow nodes.
	pub fn connected_flows<'g>(&self, filtered: &'g Graph, node: &Node) -> Vec<&'g FlowNode> {
		connected_flows(filtered, node)
	}

	/// Distinct processes linking to `node` in `filtered`; empty for process nodes.
	pub fn connected_processes<'g>(
		&self,
		filtered: &'g Graph,
		node: &Node,
	) -> Vec<&'g ProcessNode> {
		connected_processes(filtered, node)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FlowRow, rows_to_graph};

	fn base() -> Graph {
		let rows: Vec<FlowRow> = [
			["A", "X", "", "", ""],
			["A", "Y", "", "", ""],
			["B", "X", "", "", ""],
		]
		.into_iter()
		.map(FlowRow::from)
		.collect();
		rows_to_graph(&rows)
	}

	#[test]
	fn selection_and_hover_are_independent() {
		let graph = base();
		let a = graph.node("process:A").unwrap();
		let x = graph.node("flow:X").unwrap();
		let mut c = Coordinator::new();

		c.select_node(Some(a));
		c.set_hover(Some(x), HoverPosition::new(10.0, 20.0));
		assert_eq!(c.selected_node_id(), Some("process:A"));
		assert_eq!(c.hovered_node_id(), Some("flow:X"));

		c.set_hover(None, HoverPosition::default());
		assert_eq!(c.selected_node_id(), Some("process:A"));

		c.set_hover(Some(x), HoverPosition::new(1.0, 2.0));
		c.select_node(None);
		assert_eq!(c.hovered_node_id(), Some("flow:X"));
		assert_eq!(c.hover_position(), HoverPosition::new(1.0, 2.0));
	}

	#[test]
	fn view_mode_switch_keeps_other_state() {
		let graph = base();
		let mut c = Coordinator::new();
		c.set_query("x");
		c.set_process_filter("B", false);
		c.select_node(graph.node("flow:X"));

		c.toggle_view_mode();
		assert_eq!(c.view_mode(), ViewMode::Swimlane);
		assert_eq!(c.query(), "x");
		assert!(!c.is_process_enabled("B"));
		assert_eq!(c.selected_node_id(), Some("flow:X"));

		c.toggle_view_mode();
		assert_eq!(c.view_mode(), ViewMode::Force);
	}

	#[test]
	fn reset_restores_default_enabled() {
		let mut c = Coordinator::new();
		c.set_query("kon");
		c.set_process_filter("A", false);
		assert!(c.has_active_filters());

		c.reset_filters();
		assert_eq!(c.query(), "");
		assert!(c.process_toggles().is_empty());
		assert!(c.is_process_enabled("A"));
		assert!(!c.has_active_filters());
	}

	#[test]
	fn lookups_run_against_the_filtered_graph() {
		let graph = base();
		let mut c = Coordinator::new();
		c.set_process_filter("B", false);
		let filtered = c.filtered_graph(&graph);

		let x = filtered.node("flow:X").unwrap();
		let procs: Vec<&str> = c
			.connected_processes(&filtered, x)
			.iter()
			.map(|p| p.name.as_str())
			.collect();
		assert_eq!(procs, vec!["A"]);

		let a = filtered.node("process:A").unwrap();
		assert_eq!(c.connected_flows(&filtered, a).len(), 2);
		assert!(c.connected_flows(&filtered, x).is_empty());
	}
}
