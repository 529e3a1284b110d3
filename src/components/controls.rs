//! Header controls: view toggle, search, process filter and statistics.

use leptos::prelude::*;

use crate::coordinator::{Coordinator, ViewMode};
use crate::graph::Graph;

/// Counts shown in the statistics strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	/// Visible process nodes.
	pub processes: usize,
	/// Visible flow nodes.
	pub flows: usize,
	/// Visible links.
	pub links: usize,
}

impl GraphStats {
	/// Counts of `graph`.
	pub fn of(graph: &Graph) -> Self {
		Self {
			processes: graph.process_count(),
			flows: graph.flow_count(),
			links: graph.links.len(),
		}
	}
}

/// Toggle between the force and swimlane views.
#[component]
pub fn ViewToggle() -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();
	let mode = move || coordinator.with(Coordinator::view_mode);

	let button = move |target: ViewMode| {
		view! {
			<button
				class="btn btn-sm"
				class:active=move || mode() == target
				on:click=move |_| coordinator.update(|c| c.set_view_mode(target))
			>
				{target.label()}
			</button>
		}
	};

	view! {
		<div class="view-toggle" role="group">
			{button(ViewMode::Force)}
			{button(ViewMode::Swimlane)}
		</div>
	}
}

/// Case-insensitive name search.
#[component]
pub fn SearchBox() -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();

	view! {
		<input
			class="search-box"
			type="search"
			placeholder="Search processes or flows..."
			prop:value=move || coordinator.with(|c| c.query().to_string())
			on:input=move |ev| coordinator.update(|c| c.set_query(event_target_value(&ev)))
		/>
	}
}

/// One checkbox per process name of the canonical graph, plus Reset.
#[component]
pub fn ProcessFilter(#[prop(into)] process_names: Signal<Vec<String>>) -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();
	let reset = move |_| coordinator.update(Coordinator::reset_filters);
	let has_filters = move || coordinator.with(Coordinator::has_active_filters);

	view! {
		<div class="process-filter">
			<div class="filter-header">
				<span>"Processes"</span>
				<button class="btn btn-sm" on:click=reset disabled=move || !has_filters()>
					"Reset"
				</button>
			</div>
			{move || {
				process_names
					.get()
					.into_iter()
					.map(|name| {
						let checked = {
							let name = name.clone();
							move || coordinator.with(|c| c.is_process_enabled(&name))
						};
						let toggle = {
							let name = name.clone();
							move |ev| {
								let enabled = event_target_checked(&ev);
								coordinator.update(|c| c.set_process_filter(name.clone(), enabled));
							}
						};
						view! {
							<label class="filter-item">
								<input type="checkbox" prop:checked=checked on:change=toggle />
								<span>{name}</span>
							</label>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

/// Visible process, flow and link counts.
#[component]
pub fn Stats(#[prop(into)] graph: Signal<Graph>) -> impl IntoView {
	let stats = Memo::new(move |_| graph.with(GraphStats::of));

	view! {
		<div class="stats">
			<span>{move || format!("{} processes", stats.get().processes)}</span>
			<span>{move || format!("{} flows", stats.get().flows)}</span>
			<span>{move || format!("{} links", stats.get().links)}</span>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FlowRow, rows_to_graph};

	#[test]
	fn stats_count_the_given_graph() {
		let rows: Vec<FlowRow> = [
			["A", "X", "", "", ""],
			["A", "Y", "", "", ""],
			["B", "X", "", "", ""],
		]
		.into_iter()
		.map(FlowRow::from)
		.collect();
		let graph = rows_to_graph(&rows);
		assert_eq!(
			GraphStats::of(&graph),
			GraphStats {
				processes: 2,
				flows: 2,
				links: 3
			}
		);
		assert_eq!(GraphStats::of(&Graph::default()), GraphStats::default());
	}
}
