//! Transient tooltip for the hovered node.

use leptos::prelude::*;

use crate::coordinator::{Coordinator, HoverPosition};
use crate::graph::{Graph, Node, connected_flows, connected_processes};

/// Offset of the card from the pointer.
const OFFSET_X: f64 = 15.0;
const OFFSET_Y: f64 = -10.0;
/// Horizontal room kept free at the right edge of the viewport.
const RIGHT_MARGIN: f64 = 400.0;
const CARD_WIDTH: f64 = 320.0;
const MIN_EDGE: f64 = 10.0;

/// Where to place the card, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipAnchor {
	pub left: f64,
	pub top: f64,
	/// Card sits left of the pointer.
	pub flipped: bool,
}

/// Anchor for a pointer at `pos` in a viewport `viewport_width` pixels wide.
pub fn tooltip_anchor(pos: HoverPosition, viewport_width: f64) -> TooltipAnchor {
	let max_left = viewport_width - RIGHT_MARGIN;
	let flipped = pos.x + OFFSET_X > max_left;
	let left = if flipped {
		pos.x - OFFSET_X - CARD_WIDTH
	} else {
		pos.x + OFFSET_X
	};
	TooltipAnchor {
		left: left.min(max_left).max(MIN_EDGE),
		top: (pos.y + OFFSET_Y).max(MIN_EDGE),
		flipped,
	}
}

/// Card following the pointer while a node is hovered.
#[component]
pub fn HoverCard(
	#[prop(into)] graph: Signal<Graph>,
	#[prop(into)] viewport: Signal<(f64, f64)>,
) -> impl IntoView {
	let coordinator = expect_context::<RwSignal<Coordinator>>();

	move || {
		let (id, pos) = coordinator.with(|c| {
			(
				c.hovered_node_id().map(str::to_string),
				c.hover_position(),
			)
		});
		let id = id?;
		graph.with(|g| {
			let node = g.node(&id)?;
			let anchor = tooltip_anchor(pos, viewport.get().0);
			let style = format!("left: {}px; top: {}px;", anchor.left, anchor.top);
			Some(view! {
				<div class="hover-card" class:flipped=anchor.flipped style=style>
					<div class="hover-kind">{node.kind().label()}</div>
					<div class="hover-name">{node.name().to_string()}</div>
					{summary(g, node)}
				</div>
			})
		})
	}
}

fn summary(graph: &Graph, node: &Node) -> AnyView {
	match node {
		Node::Flow(flow) => {
			let processes: Vec<String> = connected_processes(graph, node)
				.into_iter()
				.map(|p| p.name.clone())
				.collect();
			let purpose = (!flow.purpose.is_empty())
				.then(|| view! { <div class="hover-purpose">{flow.purpose.clone()}</div> });
			let link = (!flow.link.is_empty()).then(|| {
				view! {
					<a class="hover-link" href=flow.link.clone() target="_blank" rel="noreferrer">
						"Open flow ↗"
					</a>
				}
			});
			view! {
				{purpose}
				<div class="hover-section">"In processes"</div>
				<div class="hover-badges">
					{processes
						.into_iter()
						.map(|name| view! { <span class="badge badge-info">{name}</span> })
						.collect_view()}
				</div>
				{link}
			}
				.into_any()
		}
		Node::Process(_) => {
			let count = connected_flows(graph, node).len();
			view! { <div class="hover-section">{format!("{count} flows")}</div> }.into_any()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn card_sits_right_of_pointer() {
		let anchor = tooltip_anchor(HoverPosition::new(100.0, 100.0), 1200.0);
		assert_eq!(
			anchor,
			TooltipAnchor {
				left: 115.0,
				top: 90.0,
				flipped: false
			}
		);
	}

	#[test]
	fn top_is_clamped() {
		let anchor = tooltip_anchor(HoverPosition::new(100.0, 5.0), 1200.0);
		assert_eq!(anchor.top, 10.0);
	}

	#[test]
	fn flips_near_right_edge() {
		let anchor = tooltip_anchor(HoverPosition::new(1000.0, 300.0), 1200.0);
		assert!(anchor.flipped);
		assert_eq!(anchor.left, 665.0);

		let far = tooltip_anchor(HoverPosition::new(1190.0, 300.0), 1200.0);
		assert_eq!(far.left, 800.0);
	}

	#[test]
	fn narrow_viewport_keeps_left_margin() {
		let anchor = tooltip_anchor(HoverPosition::new(50.0, 50.0), 300.0);
		assert!(anchor.flipped);
		assert_eq!(anchor.left, 10.0);
	}
}
