//! Persistent side panel for the selected node.

use leptos::prelude::*;

use crate::coordinator::Coordinator;
use crate::graph::{Graph, Node, connected_flows, connected_processes};

/// Pretty-printed wire form of a node, as offered for export.
pub fn node_json(node: &Node) -> String {
	serde_json::to_string_pretty(node).unwrap_or_default()
}

/// Panel for the selected node. `base` resolves the selection so the panel
/// survives filtering; `filtered` supplies the connection lists.
#[component]
pub fn DetailPanel(
	#[prop(into)] base: Signal<Graph>,
	#[prop(into)] filtered: Signal<Graph>,
) -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();
	let close = move |_| coordinator.update(|c| c.select_node(None));

	move || {
		let id = coordinator.with(|c| c.selected_node_id().map(str::to_string))?;
		let node = base.with(|g| g.node(&id).cloned())?;
		let connections = filtered.with(|g| connection_list(g, &node));
		let json = node_json(&node);
		let flow = node.as_flow().cloned();
		let is_flow = flow.is_some();

		let purpose = flow
			.as_ref()
			.filter(|f| !f.purpose.is_empty())
			.map(|f| view! { <DetailField label="Purpose" value=f.purpose.clone() /> });
		let previous = flow
			.as_ref()
			.filter(|f| !f.old_name.is_empty())
			.map(|f| view! { <DetailField label="Previous name" value=f.old_name.clone() /> });
		let link = flow.as_ref().filter(|f| !f.link.is_empty()).map(|f| {
			view! {
				<a class="btn btn-primary" href=f.link.clone() target="_blank" rel="noreferrer">
					"Open flow ↗"
				</a>
			}
		});

		Some(view! {
			<div class="panel-backdrop" on:click=close></div>
			<aside class="detail-panel" class:flow=is_flow>
				<header class="panel-header">
					<span class="badge">{node.kind().label()}</span>
					<h2>{node.name().to_string()}</h2>
					<button class="btn btn-sm panel-close" on:click=close>"×"</button>
				</header>
				<div class="panel-body">
					<DetailField label="Full name" value=node.name().to_string() />
					<DetailField label="Type" value=format!("{} node", node.kind().label()) />
					<DetailField label="Node ID" value=id />
					{purpose}
					{previous}
					{link}
					<h3>{connections.0}</h3>
					<ul class="panel-connections">
						{connections
							.1
							.into_iter()
							.map(|name| view! { <li>{name}</li> })
							.collect_view()}
					</ul>
					<details class="panel-export">
						<summary>"Export JSON"</summary>
						<pre>{json}</pre>
					</details>
				</div>
			</aside>
		})
	}
}

/// Heading and names of the nodes connected to `node` in `graph`.
fn connection_list(graph: &Graph, node: &Node) -> (&'static str, Vec<String>) {
	match node {
		Node::Process(_) => (
			"Connected flows",
			connected_flows(graph, node)
				.into_iter()
				.map(|f| f.name.clone())
				.collect(),
		),
		Node::Flow(_) => (
			"Used by processes",
			connected_processes(graph, node)
				.into_iter()
				.map(|p| p.name.clone())
				.collect(),
		),
	}
}

#[component]
fn DetailField(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
	view! {
		<div class="panel-field">
			<label>{label}</label>
			<p>{value}</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FlowNode, FlowRow, rows_to_graph};

	#[test]
	fn json_export_uses_wire_names() {
		let mut flow = FlowNode::new("Sync");
		flow.old_name = "Legacy sync".into();
		let json = node_json(&flow.into());
		assert!(json.contains(r#""type": "flow""#));
		assert!(json.contains(r#""oldName": "Legacy sync""#));
		assert!(json.contains(r#""id": "flow:Sync""#));
	}

	#[test]
	fn connections_depend_on_kind() {
		let rows: Vec<FlowRow> = [["A", "X", "", "", ""], ["B", "X", "", "", ""]]
			.into_iter()
			.map(FlowRow::from)
			.collect();
		let graph = rows_to_graph(&rows);

		let x = graph.node("flow:X").unwrap();
		assert_eq!(
			connection_list(&graph, x),
			("Used by processes", vec!["A".to_string(), "B".to_string()])
		);
		let a = graph.node("process:A").unwrap();
		assert_eq!(connection_list(&graph, a), ("Connected flows", vec!["X".to_string()]));
	}
}
