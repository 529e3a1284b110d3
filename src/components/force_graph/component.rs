//! Leptos component wrapping the force view canvas.
//!
//! An effect builds a fresh simulation whenever the filtered graph or the
//! viewport changes. The previous simulation is stopped first and its
//! `requestAnimationFrame` loop exits on the next frame (generation check).
//! A loop also exits once its canvas has left the document.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::layout::ForceConfig;
use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::{ProcessColors, Theme};
use crate::coordinator::{Coordinator, HoverPosition};
use crate::graph::Graph;

/// Settled once a step moves nodes less than this in total (squared world units).
const SETTLED_ENERGY: f64 = 0.5;

/// Simulation state with the visual configuration it is drawn with.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed view of `graph`, coloured by `colors`.
///
/// Hover and click go through the [`Coordinator`] found in context.
#[component]
pub fn ForceGraphView(
	#[prop(into)] graph: Signal<Graph>,
	#[prop(into)] colors: Signal<ProcessColors>,
	#[prop(into)] viewport: Signal<(f64, f64)>,
	#[prop(optional)] forces: ForceConfig,
) -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let generation = Rc::new(Cell::new(0u64));
	let context_init = context.clone();

	Effect::new(move |_| {
		let graph = graph.get();
		let colors = colors.get();
		let (vw, vh) = viewport.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let w = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(vw);
		let h = canvas
			.parent_element()
			.map(|p| p.client_height() as f64)
			.filter(|h| *h > 0.0)
			.unwrap_or(vh);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Ok(Some(ctx)) = canvas.get_context("2d") else {
			return;
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};

		if let Some(previous) = context_init.borrow_mut().as_mut() {
			previous.state.stop();
			debug!("flow-explorer: simulation {} stopped", generation.get());
		}
		let current = generation.get() + 1;
		generation.set(current);

		let mut state = ForceGraphState::new(&graph, &colors, &forces, w, h);
		let selected = coordinator.with_untracked(|c| c.selected_node_id().map(str::to_string));
		state.set_selected(selected.as_deref());
		let mut settled = false;
		state.on_tick(Box::new(move |tick| {
			if !settled && tick.tick > 30 && tick.energy < SETTLED_ENERGY {
				settled = true;
				info!("flow-explorer: layout settled after {} ticks", tick.tick);
			}
		}));
		debug!(
			"flow-explorer: simulation {current} started with {} nodes, {} links ({w}x{h})",
			graph.nodes.len(),
			graph.links.len()
		);

		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (context_anim, animate_inner, generation_anim) =
			(context_init.clone(), animate.clone(), generation.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if generation_anim.get() != current || !canvas.is_connected() {
				if generation_anim.get() == current {
					if let Some(c) = context_anim.borrow_mut().as_mut() {
						c.state.stop();
					}
					debug!("flow-explorer: simulation {current} detached");
				}
				drop(animate_inner.borrow_mut().take());
				return;
			}
			if let Some(c) = context_anim.borrow_mut().as_mut() {
				c.state.tick(0.016);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(cb) = animate.borrow().as_ref() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_sel = context.clone();
	Effect::new(move |_| {
		let selected = coordinator.with(|c| c.selected_node_id().map(str::to_string));
		if let Some(c) = context_sel.borrow_mut().as_mut() {
			c.state.set_selected(selected.as_deref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		if let Some(c) = context_md.borrow_mut().as_mut() {
			match c.state.node_at_position(x, y, &c.scale) {
				Some(idx) => c.state.begin_drag(idx, x, y),
				None => c.state.begin_pan(x, y),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		let mut hover_change = None;
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			if c.state.is_dragging() {
				c.state.drag_to(x, y);
			} else if c.state.pan.active {
				c.state.pan_to(x, y);
			} else {
				let previous = c.state.highlight.hovered();
				let hovered = c.state.node_at_position(x, y, &c.scale);
				c.state.set_hover(hovered);
				if hovered.is_some() || previous.is_some() {
					hover_change = Some(hovered.map(|idx| c.state.nodes[idx].id.clone()));
				}
			}
		}
		if let Some(id) = hover_change {
			let node = id.and_then(|id| graph.with_untracked(|g| g.node(&id).cloned()));
			let position = HoverPosition::new(ev.client_x() as f64, ev.client_y() as f64);
			coordinator.update(|c| c.set_hover(node.as_ref(), position));
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let mut clicked = None;
		if let Some(c) = context_mu.borrow_mut().as_mut() {
			clicked = c.state.end_drag().map(|idx| c.state.nodes[idx].id.clone());
			c.state.end_pan();
		}
		if let Some(id) = clicked {
			let node = graph.with_untracked(|g| g.node(&id).cloned());
			coordinator.update(|c| c.select_node(node.as_ref()));
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			let _ = c.state.end_drag();
			c.state.end_pan();
			c.state.set_hover(None);
		}
		coordinator.update(|c| c.set_hover(None, HoverPosition::default()));
	};

	let context_wh = context;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
