//! Per-mount force view state and interaction tracking.
//!
//! Wraps a [`ForceLayout`] with per-node display metadata, the pan/zoom
//! transform, drag pinning, and a highlight state that fades the hovered node
//! and its neighbours in and out.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use super::layout::{ForceConfig, ForceGraphLayout, ForceLayout, TickCallback};
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, ProcessColors};
use crate::graph::{Graph, Node, NodeId, NodeKind};

/// Zoom bounds for the wheel.
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 3.0;

/// Pointer travel in screen pixels below which a press counts as a click.
pub const CLICK_THRESHOLD: f64 = 4.0;

/// Display metadata for one simulated node.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub kind: NodeKind,
	/// Pie segment colours. Processes and single-process flows have one.
	pub segments: Vec<Color>,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
	pub k: f64,
}

/// An in-progress node press. Becomes a drag once the pointer travels.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Per-node highlight intensity (0..1) easing toward the hovered neighbourhood.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<usize>,
	target: HashSet<usize>,
	intensity: HashMap<usize, f64>,
	max: f64,
}

impl HighlightState {
	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	/// Hover `node` and target it plus its neighbours.
	pub fn set_hover(&mut self, node: Option<usize>, edges: &[(usize, usize)]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.target.clear();
		if let Some(idx) = node {
			self.target.insert(idx);
			for &(a, b) in edges {
				if a == idx {
					self.target.insert(b);
				} else if b == idx {
					self.target.insert(a);
				}
			}
		}
	}

	/// Exponential ease: fast in, slower out.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;
		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target {
			let value = self.intensity.entry(idx).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}
		let target = &self.target;
		let mut max: f64 = 0.0;
		self.intensity.retain(|idx, value| {
			if !target.contains(idx) {
				*value *= fade_out;
			}
			max = max.max(*value);
			*value > 0.005
		});
		self.max = max;
	}

	pub fn node_intensity(&self, idx: usize) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}

	pub fn edge_intensity(&self, a: usize, b: usize) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Strongest intensity of any node, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.max
	}
}

/// Simulation plus everything the renderer and pointer handlers need.
///
/// Built from one filtered graph. A new graph or viewport means a new state;
/// the old one is stopped first.
pub struct ForceGraphState {
	layout: Box<dyn ForceLayout>,
	pub nodes: Vec<NodeInfo>,
	index: HashMap<NodeId, usize>,
	/// Link endpoints as node indices, source first.
	pub edges: Vec<(usize, usize)>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(
		graph: &Graph,
		colors: &ProcessColors,
		forces: &ForceConfig,
		width: f64,
		height: f64,
	) -> Self {
		let layout = ForceGraphLayout::new(forces.clone(), (0.0, 0.0));
		Self::with_layout(graph, colors, Box::new(layout), width, height)
	}

	/// Seed `layout` with the graph's nodes on a ring around the origin.
	pub fn with_layout(
		graph: &Graph,
		colors: &ProcessColors,
		mut layout: Box<dyn ForceLayout>,
		width: f64,
		height: f64,
	) -> Self {
		let count = graph.nodes.len().max(1) as f64;
		let ring = 60.0 + 6.0 * count;
		let mut nodes = Vec::with_capacity(graph.nodes.len());
		let mut index = HashMap::with_capacity(graph.nodes.len());

		for (i, node) in graph.nodes.iter().enumerate() {
			let angle = i as f64 * 2.0 * PI / count;
			layout.add_node(
				node.id(),
				node.kind(),
				(ring * angle.cos()) as f32,
				(ring * angle.sin()) as f32,
			);
			let segments = match node {
				Node::Process(p) => vec![colors.get(&p.name)],
				Node::Flow(f) => colors.segments(graph, f),
			};
			index.insert(node.id().to_string(), nodes.len());
			nodes.push(NodeInfo {
				id: node.id().to_string(),
				label: node.name().to_string(),
				kind: node.kind(),
				segments,
			});
		}

		let mut edges = Vec::with_capacity(graph.links.len());
		for link in &graph.links {
			if let (Some(&s), Some(&t)) = (index.get(&link.source), index.get(&link.target)) {
				layout.add_link(&link.source, &link.target);
				edges.push((s, t));
			}
		}

		Self {
			layout,
			nodes,
			index,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			selected: None,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// World position of node `idx`.
	pub fn position(&self, idx: usize) -> Option<(f64, f64)> {
		let info = self.nodes.get(idx)?;
		self.layout
			.position(&info.id)
			.map(|(x, y)| (x as f64, y as f64))
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen point. Later nodes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		(0..self.nodes.len()).rev().find(|&idx| {
			let Some((x, y)) = self.position(idx) else {
				return false;
			};
			let reach = scale.radius(self.nodes[idx].kind) + scale.hit_padding;
			(x - gx).powi(2) + (y - gy).powi(2) <= reach * reach
		})
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn set_selected(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.index_of(id));
	}

	pub fn begin_drag(&mut self, idx: usize, sx: f64, sy: f64) {
		let (nx, ny) = self.position(idx).unwrap_or_else(|| self.screen_to_graph(sx, sy));
		self.drag = DragState {
			node: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: nx,
			node_start_y: ny,
			moved: false,
		};
	}

	/// Move the pressed node with the pointer, pinning it once past the click threshold.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node else {
			return;
		};
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if !self.drag.moved && dx.hypot(dy) < CLICK_THRESHOLD {
			return;
		}
		self.drag.moved = true;
		let pos = (
			(self.drag.node_start_x + dx / self.transform.k) as f32,
			(self.drag.node_start_y + dy / self.transform.k) as f32,
		);
		let id = self.nodes[idx].id.clone();
		self.layout.pin_node(&id, Some(pos));
	}

	/// Finish a press. Returns the node when the press was a click rather than a drag.
	pub fn end_drag(&mut self) -> Option<usize> {
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node?;
		if drag.moved {
			let id = self.nodes[idx].id.clone();
			self.layout.pin_node(&id, None);
			None
		} else {
			Some(idx)
		}
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node.is_some()
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom by one wheel notch around a screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn on_tick(&mut self, callback: TickCallback) {
		self.layout.on_tick(callback);
	}

	pub fn tick(&mut self, dt: f32) {
		self.layout.step(dt);
		self.flow_time += dt as f64;
		self.highlight.tick(dt as f64);
	}

	pub fn stop(&mut self) {
		self.layout.stop();
	}

	pub fn is_running(&self) -> bool {
		self.layout.is_running()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::theme::Theme;
	use crate::graph::{FlowRow, rows_to_graph};

	/// Layout that never moves anything, so hit tests are exact.
	#[derive(Default)]
	struct FixedLayout {
		positions: HashMap<String, (f32, f32)>,
		pinned: HashSet<String>,
		stopped: bool,
	}

	impl ForceLayout for FixedLayout {
		fn add_node(&mut self, id: &str, _kind: NodeKind, x: f32, y: f32) {
			self.positions.insert(id.to_string(), (x, y));
		}
		fn add_link(&mut self, source: &str, target: &str) -> bool {
			self.positions.contains_key(source) && self.positions.contains_key(target)
		}
		fn set_forces(&mut self, _forces: ForceConfig) {}
		fn on_tick(&mut self, _callback: TickCallback) {}
		fn step(&mut self, _dt: f32) {}
		fn pin_node(&mut self, id: &str, pos: Option<(f32, f32)>) {
			match pos {
				Some(p) => {
					self.pinned.insert(id.to_string());
					self.positions.insert(id.to_string(), p);
				}
				None => {
					self.pinned.remove(id);
				}
			}
		}
		fn position(&self, id: &str) -> Option<(f32, f32)> {
			self.positions.get(id).copied()
		}
		fn stop(&mut self) {
			self.stopped = true;
		}
		fn is_running(&self) -> bool {
			!self.stopped
		}
	}

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

	fn state() -> ForceGraphState {
		let graph = graph();
		let colors = Theme::default().process_colors(&graph);
		ForceGraphState::with_layout(&graph, &colors, Box::<FixedLayout>::default(), 800.0, 600.0)
	}

	fn screen_pos(state: &ForceGraphState, idx: usize) -> (f64, f64) {
		let (x, y) = state.position(idx).unwrap();
		(
			x * state.transform.k + state.transform.x,
			y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn shared_flow_gets_one_segment_per_process() {
		let s = state();
		let x = s.index_of("flow:X").unwrap();
		let y = s.index_of("flow:Y").unwrap();
		assert_eq!(s.nodes[x].segments.len(), 2);
		assert_eq!(s.nodes[y].segments.len(), 1);
		assert_eq!(s.edges.len(), 3);
	}

	#[test]
	fn hit_test_finds_node_under_pointer() {
		let s = state();
		let a = s.index_of("process:A").unwrap();
		let (sx, sy) = screen_pos(&s, a);
		let config = ScaleConfig::default();
		assert_eq!(s.node_at_position(sx + 2.0, sy, &config), Some(a));
		assert_eq!(s.node_at_position(sx + 400.0, sy + 400.0, &config), None);
	}

	#[test]
	fn short_press_is_a_click() {
		let mut s = state();
		let a = s.index_of("process:A").unwrap();
		let (sx, sy) = screen_pos(&s, a);
		s.begin_drag(a, sx, sy);
		s.drag_to(sx + 1.0, sy + 1.0);
		assert_eq!(s.end_drag(), Some(a));
		assert!(!s.is_dragging());
	}

	#[test]
	fn drag_moves_node_and_is_not_a_click() {
		let mut s = state();
		let a = s.index_of("process:A").unwrap();
		let before = s.position(a).unwrap();
		let (sx, sy) = screen_pos(&s, a);
		s.begin_drag(a, sx, sy);
		s.drag_to(sx + 50.0, sy);
		let after = s.position(a).unwrap();
		assert!((after.0 - before.0 - 50.0).abs() < 1e-3);
		assert_eq!(s.end_drag(), None);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom_at(400.0, 300.0, -1.0);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..100 {
			s.zoom_at(400.0, 300.0, 1.0);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	#[test]
	fn pan_follows_pointer() {
		let mut s = state();
		s.begin_pan(10.0, 10.0);
		s.pan_to(30.0, 5.0);
		s.end_pan();
		s.pan_to(100.0, 100.0);
		assert_eq!(s.transform.x, 420.0);
		assert_eq!(s.transform.y, 295.0);
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut s = state();
		let a = s.index_of("process:A").unwrap();
		let b = s.index_of("process:B").unwrap();
		let x = s.index_of("flow:X").unwrap();
		s.set_hover(Some(a));
		for _ in 0..30 {
			s.tick(0.016);
		}
		assert!(s.highlight.node_intensity(a) > 0.9);
		assert!(s.highlight.node_intensity(x) > 0.9);
		assert_eq!(s.highlight.node_intensity(b), 0.0);

		s.set_hover(None);
		for _ in 0..200 {
			s.tick(0.016);
		}
		assert_eq!(s.highlight.max_intensity(), 0.0);
	}

	#[test]
	fn selection_and_stop() {
		let mut s = state();
		s.set_selected(Some("flow:Y"));
		assert_eq!(s.selected, s.index_of("flow:Y"));
		s.set_selected(Some("flow:missing"));
		assert_eq!(s.selected, None);

		assert!(s.is_running());
		s.stop();
		assert!(!s.is_running());
	}
}
