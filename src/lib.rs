//! process-flow-explorer: interactive explorer for processes and the flows they run.
//!
//! The canonical graph is built once from host-injected data (or the embedded
//! fallback table). A single [`Coordinator`] signal holds view mode, filters,
//! selection and hover; both views render the filtered subgraph it derives.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod coordinator;
pub mod error;
pub mod graph;

pub use components::force_graph::{ForceConfig, ForceGraphView, ProcessColors, Theme};
pub use components::{
	DetailPanel, HoverCard, ProcessFilter, SearchBox, Stats, Swimlane, ViewToggle,
};
pub use coordinator::{Coordinator, HoverPosition, ViewMode};
pub use error::GraphLoadError;
pub use graph::{Graph, InjectedGraph};

/// Id of the `<script type="application/json">` element holding injected data.
pub const GRAPH_DATA_ELEMENT: &str = "graph-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("flow-explorer: logging initialized");
}

/// Read the host payload from the `graph-data` script element.
pub fn load_injected_graph() -> Result<InjectedGraph, GraphLoadError> {
	let element = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(GRAPH_DATA_ELEMENT))
		.ok_or(GraphLoadError::MissingElement(GRAPH_DATA_ELEMENT))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| GraphLoadError::NotAScript(GRAPH_DATA_ELEMENT))?;
	let text = script.text().unwrap_or_default();
	if text.trim().is_empty() {
		return Err(GraphLoadError::EmptyPayload(GRAPH_DATA_ELEMENT));
	}
	InjectedGraph::from_json(&text)
}

/// Canonical graph and force overrides, falling back to the embedded table.
fn initial_data() -> (Graph, ForceConfig) {
	let payload = match load_injected_graph() {
		Ok(payload) => payload,
		Err(GraphLoadError::MissingElement(_)) => {
			debug!("flow-explorer: no injected data");
			InjectedGraph::default()
		}
		Err(e) => {
			warn!("flow-explorer: ignoring injected data: {e}");
			InjectedGraph::default()
		}
	};
	let source = if payload.supplies_graph() {
		"injected"
	} else {
		"fallback"
	};
	let (graph, forces) = payload.into_parts();
	info!(
		"flow-explorer: {source} graph with {} nodes, {} links",
		graph.nodes.len(),
		graph.links.len()
	);
	let dangling = graph.dangling_links().len();
	if dangling > 0 {
		warn!("flow-explorer: {dangling} links reference unknown nodes");
	}
	(graph, forces.unwrap_or_default())
}

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, default: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(default)
	};
	(
		dim(window.inner_width(), 1024.0),
		dim(window.inner_height(), 768.0),
	)
}

/// Viewport size signal, updated on window resize.
fn viewport_signal() -> RwSignal<(f64, f64)> {
	let Some(window) = web_sys::window() else {
		return RwSignal::new((1024.0, 768.0));
	};
	let viewport = RwSignal::new(window_size(&window));
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		if let Some(win) = web_sys::window() {
			viewport.set(window_size(&win));
		}
	});
	let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
	// The listener lives as long as the page.
	on_resize.forget();
	viewport
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (base, forces) = initial_data();
	let theme = Theme::default();
	let colors = Signal::stored(theme.process_colors(&base));
	let process_names = Signal::stored(base.process_names());
	let base = Signal::stored(base);

	let coordinator = RwSignal::new(Coordinator::new());
	provide_context(coordinator);

	let filtered = Memo::new(move |_| base.with(|g| coordinator.with(|c| c.filtered_graph(g))));
	let viewport = viewport_signal();
	let is_force = move || coordinator.with(Coordinator::view_mode) == ViewMode::Force;

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Process Flow Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<header class="app-header">
				<h1>"Process Flow Explorer"</h1>
				<SearchBox />
				<ViewToggle />
				<Stats graph=filtered />
			</header>
			<div class="app-body">
				<aside class="app-sidebar">
					<ProcessFilter process_names=process_names />
					<p class="hint">
						"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Click a node for details."
					</p>
				</aside>
				<main class="app-main">
					<Show
						when=is_force
						fallback=move || view! { <Swimlane graph=filtered colors=colors /> }
					>
						<ForceGraphView
							graph=filtered
							colors=colors
							viewport=viewport
							forces=forces.clone()
						/>
					</Show>
				</main>
			</div>
			<HoverCard graph=filtered viewport=viewport />
			<DetailPanel base=base filtered=filtered />
		</div>
	}
}
