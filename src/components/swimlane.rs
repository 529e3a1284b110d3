//! Swimlane view: one collapsible lane per process with a card per flow.

use std::collections::HashSet;

use leptos::prelude::*;

use super::force_graph::ProcessColors;
use crate::coordinator::Coordinator;
use crate::graph::{FlowNode, Graph, Node, NodeId, ProcessNode, connected_flows};

/// One process and its flows in link order.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
	pub process: ProcessNode,
	pub flows: Vec<FlowNode>,
}

/// Lanes for every process of `graph`, in node order.
pub fn swimlanes(graph: &Graph) -> Vec<Lane> {
	graph
		.processes()
		.map(|process| {
			let node = Node::Process(process.clone());
			Lane {
				process: process.clone(),
				flows: connected_flows(graph, &node).into_iter().cloned().collect(),
			}
		})
		.collect()
}

/// Which lanes are open, keyed by process id. Lanes start collapsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpandState {
	expanded: HashSet<NodeId>,
}

impl ExpandState {
	pub fn is_expanded(&self, id: &str) -> bool {
		self.expanded.contains(id)
	}

	pub fn toggle(&mut self, id: &str) {
		if !self.expanded.remove(id) {
			self.expanded.insert(id.to_string());
		}
	}

	pub fn expand_all<I, S>(&mut self, ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<NodeId>,
	{
		self.expanded.extend(ids.into_iter().map(Into::into));
	}

	pub fn collapse_all(&mut self) {
		self.expanded.clear();
	}

	pub fn open_count(&self) -> usize {
		self.expanded.len()
	}
}

/// Card grid grouped by process. Clicking a card selects its flow.
#[component]
pub fn Swimlane(
	#[prop(into)] graph: Signal<Graph>,
	#[prop(into)] colors: Signal<ProcessColors>,
) -> impl IntoView {
	let expanded = RwSignal::new(ExpandState::default());

	let expand_all = move |_| {
		let ids: Vec<NodeId> = graph.with(|g| g.processes().map(|p| p.id.clone()).collect());
		expanded.update(|e| e.expand_all(ids));
	};
	let collapse_all = move |_| expanded.update(ExpandState::collapse_all);

	view! {
		<div class="swimlane">
			<div class="swimlane-toolbar">
				<span class="swimlane-stat">
					{move || format!("{} Processes", graph.with(Graph::process_count))}
				</span>
				<span class="swimlane-stat">
					{move || format!("{} Flows", graph.with(Graph::flow_count))}
				</span>
				<button class="btn btn-sm" on:click=expand_all>"Expand All"</button>
				<button class="btn btn-sm" on:click=collapse_all>"Collapse All"</button>
			</div>
			{move || {
				let lanes = graph.with(swimlanes);
				if lanes.is_empty() {
					return view! {
						<p class="swimlane-empty">"No processes match the current filters."</p>
					}
						.into_any();
				}
				lanes
					.into_iter()
					.map(|lane| view! { <LaneView lane=lane colors=colors expanded=expanded /> })
					.collect_view()
					.into_any()
			}}
		</div>
	}
}

#[component]
fn LaneView(
	lane: Lane,
	colors: Signal<ProcessColors>,
	expanded: RwSignal<ExpandState>,
) -> impl IntoView {
	let Lane { process, flows } = lane;
	let count = flows.len();
	let id = process.id.clone();
	let is_open = move || expanded.with(|e| e.is_expanded(&id));
	let name = process.name.clone();
	let accent = move || format!("border-left-color: {}", colors.with(|c| c.get(&name).to_css()));
	let toggle = {
		let id = process.id.clone();
		move |_| expanded.update(|e| e.toggle(&id))
	};
	let chevron = {
		let is_open = is_open.clone();
		move || if is_open() { "▴" } else { "▾" }
	};

	view! {
		<section class="lane">
			<header class="lane-header" style=accent on:click=toggle>
				<span class="lane-title">{process.name.clone()}</span>
				<span class="lane-count">{format!("{count} flows")}</span>
				<span class="lane-chevron">{chevron}</span>
			</header>
			<Show when=is_open>
				{
					let flows = flows.clone();
					if flows.is_empty() {
						view! { <p class="lane-empty">"No flows connected"</p> }.into_any()
					} else {
						view! {
							<div class="lane-cards">
								{flows.into_iter().map(|flow| view! { <FlowCard flow=flow /> }).collect_view()}
							</div>
						}
							.into_any()
					}
				}
			</Show>
		</section>
	}
}

#[component]
fn FlowCard(flow: FlowNode) -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();
	let legacy = (!flow.old_name.is_empty()).then(|| {
		view! { <span class="badge badge-legacy" title=flow.old_name.clone()>"Legacy"</span> }
	});
	let linked = (!flow.link.is_empty()).then(|| view! { <span class="badge badge-linked">"Linked"</span> });
	let purpose = (!flow.purpose.is_empty()).then(|| view! { <p class="card-purpose">{flow.purpose.clone()}</p> });
	let name = flow.name.clone();
	let select = move |_| {
		let node = Node::Flow(flow.clone());
		coordinator.update(|c| c.select_node(Some(&node)));
	};

	view! {
		<div class="flow-card" on:click=select>
			<div class="card-title">{name}</div>
			{purpose}
			<div class="card-badges">{legacy} {linked}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FlowRow, rows_to_graph};

	fn graph() -> Graph {
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
	fn lanes_follow_process_order_and_link_order() {
		let lanes = swimlanes(&graph());
		let summary: Vec<(&str, Vec<&str>)> = lanes
			.iter()
			.map(|l| {
				(
					l.process.name.as_str(),
					l.flows.iter().map(|f| f.name.as_str()).collect(),
				)
			})
			.collect();
		assert_eq!(summary, vec![("A", vec!["X", "Y"]), ("B", vec!["X"])]);
	}

	#[test]
	fn process_without_flows_gets_empty_lane() {
		let graph = Graph {
			nodes: vec![ProcessNode::new("Solo").into()],
			links: vec![],
		};
		let lanes = swimlanes(&graph);
		assert_eq!(lanes.len(), 1);
		assert!(lanes[0].flows.is_empty());
	}

	#[test]
	fn expand_state_toggles_independently() {
		let mut state = ExpandState::default();
		assert!(!state.is_expanded("process:A"));

		state.toggle("process:A");
		assert!(state.is_expanded("process:A"));
		assert!(!state.is_expanded("process:B"));

		state.toggle("process:A");
		assert!(!state.is_expanded("process:A"));
	}

	#[test]
	fn expand_and_collapse_all() {
		let lanes = swimlanes(&graph());
		let mut state = ExpandState::default();
		state.expand_all(lanes.iter().map(|l| l.process.id.clone()));
		assert_eq!(state.open_count(), 2);
		assert!(state.is_expanded("process:B"));

		state.collapse_all();
		assert_eq!(state.open_count(), 0);
	}
}
