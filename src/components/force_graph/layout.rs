//! Force layout behind a small capability trait.
//!
//! [`ForceLayout`] is everything the view needs from a physics engine:
//! add nodes and links, configure forces, step, pin, read positions, stop.
//! [`ForceGraphLayout`] implements it on top of the `force_graph` crate, which
//! provides charge repulsion and spring attraction. Centring, link target
//! distance and per-kind collision are applied here after each engine step.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use serde::{Deserialize, Serialize};

use crate::graph::{NodeId, NodeKind};

/// Force parameters. Every field has a default, so partial JSON overrides work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
	/// Per-node repulsion.
	pub charge: f32,
	/// Per-link spring attraction.
	pub spring: f32,
	/// Upper bound on any single force.
	pub max_force: f32,
	pub node_speed: f32,
	/// Velocity retained per step, 0..1.
	pub damping: f32,
	/// Target length of a link in world units.
	pub link_distance: f32,
	/// How strongly links are pulled toward `link_distance`, 0..1 per step.
	pub link_strength: f32,
	/// How strongly the node mass centre is pulled to the layout centre, 0..1 per step.
	pub center_strength: f32,
	/// Collision radius of process nodes.
	pub process_radius: f32,
	/// Collision radius of flow nodes.
	pub flow_radius: f32,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			link_distance: 100.0,
			link_strength: 0.1,
			center_strength: 0.05,
			process_radius: 28.0,
			flow_radius: 22.0,
		}
	}
}

impl ForceConfig {
	pub fn collision_radius(&self, kind: NodeKind) -> f32 {
		match kind {
			NodeKind::Process => self.process_radius,
			NodeKind::Flow => self.flow_radius,
		}
	}

	fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge,
			force_spring: self.spring,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}

/// Reported to tick callbacks after every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInfo {
	/// Steps taken so far, starting at 1.
	pub tick: u64,
	/// Sum of squared node displacement during this step.
	pub energy: f64,
}

pub type TickCallback = Box<dyn FnMut(&TickInfo)>;

/// Capability interface of a force-directed layout engine.
pub trait ForceLayout {
	/// Add a node at `(x, y)`. Re-adding an id is ignored.
	fn add_node(&mut self, id: &str, kind: NodeKind, x: f32, y: f32);
	/// Add a link. Returns false when an endpoint is unknown.
	fn add_link(&mut self, source: &str, target: &str) -> bool;
	fn set_forces(&mut self, forces: ForceConfig);
	/// Register a callback run after every step.
	fn on_tick(&mut self, callback: TickCallback);
	/// Advance by `dt` seconds. No-op once stopped.
	fn step(&mut self, dt: f32);
	/// Pin a node at a position, or release it with `None`.
	fn pin_node(&mut self, id: &str, pos: Option<(f32, f32)>);
	fn position(&self, id: &str) -> Option<(f32, f32)>;
	/// Stop for good. Positions stay readable.
	fn stop(&mut self);
	fn is_running(&self) -> bool;
}

#[derive(Clone, Copy, Debug)]
struct LayoutNode {
	idx: DefaultNodeIdx,
	kind: NodeKind,
}

#[derive(Clone, Copy, Debug)]
struct Body {
	x: f32,
	y: f32,
	radius: f32,
	pinned: bool,
}

/// [`ForceLayout`] over `force_graph::ForceGraph`.
pub struct ForceGraphLayout {
	engine: ForceGraph<NodeId, ()>,
	forces: ForceConfig,
	center: (f32, f32),
	nodes: HashMap<NodeId, LayoutNode>,
	/// Insertion order, so rebuilds are deterministic.
	order: Vec<NodeId>,
	links: Vec<(NodeId, NodeId)>,
	pinned: HashSet<NodeId>,
	positions: HashMap<NodeId, (f32, f32)>,
	callbacks: Vec<TickCallback>,
	tick: u64,
	running: bool,
}

impl ForceGraphLayout {
	pub fn new(forces: ForceConfig, center: (f32, f32)) -> Self {
		Self {
			engine: ForceGraph::new(forces.simulation_parameters()),
			forces,
			center,
			nodes: HashMap::new(),
			order: Vec::new(),
			links: Vec::new(),
			pinned: HashSet::new(),
			positions: HashMap::new(),
			callbacks: Vec::new(),
			tick: 0,
			running: true,
		}
	}

	pub fn forces(&self) -> &ForceConfig {
		&self.forces
	}

	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	fn insert_engine_node(&mut self, id: &str, x: f32, y: f32, pinned: bool) -> DefaultNodeIdx {
		self.engine.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor: pinned,
			user_data: id.to_string(),
		})
	}

	/// Recreate the engine with the current forces, keeping positions, pins and links.
	fn rebuild_engine(&mut self) {
		self.engine = ForceGraph::new(self.forces.simulation_parameters());
		for id in self.order.clone() {
			let (x, y) = self.positions.get(&id).copied().unwrap_or(self.center);
			let pinned = self.pinned.contains(&id);
			let idx = self.insert_engine_node(&id, x, y, pinned);
			if let Some(node) = self.nodes.get_mut(&id) {
				node.idx = idx;
			}
		}
		for (source, target) in &self.links {
			if let (Some(s), Some(t)) = (self.nodes.get(source), self.nodes.get(target)) {
				self.engine.add_edge(s.idx, t.idx, EdgeData::default());
			}
		}
	}

	/// Centring, link distance and collision as position corrections.
	fn apply_constraints(&mut self) {
		let mut bodies: HashMap<DefaultNodeIdx, Body> = HashMap::with_capacity(self.nodes.len());
		let (nodes, forces) = (&self.nodes, &self.forces);
		self.engine.visit_nodes(|node| {
			let kind = nodes
				.get(&node.data.user_data)
				.map(|n| n.kind)
				.unwrap_or(NodeKind::Flow);
			bodies.insert(
				node.index(),
				Body {
					x: node.x(),
					y: node.y(),
					radius: forces.collision_radius(kind),
					pinned: node.data.is_anchor,
				},
			);
		});
		if bodies.is_empty() {
			return;
		}

		let mut shifts: HashMap<DefaultNodeIdx, (f32, f32)> = HashMap::new();
		let mut push = |idx: DefaultNodeIdx, dx: f32, dy: f32| {
			let entry = shifts.entry(idx).or_insert((0.0, 0.0));
			entry.0 += dx;
			entry.1 += dy;
		};

		let free: Vec<(DefaultNodeIdx, Body)> = bodies
			.iter()
			.filter(|(_, b)| !b.pinned)
			.map(|(i, b)| (*i, *b))
			.collect();
		if !free.is_empty() && self.forces.center_strength > 0.0 {
			let n = free.len() as f32;
			let (mx, my) = free
				.iter()
				.fold((0.0, 0.0), |(sx, sy), (_, b)| (sx + b.x, sy + b.y));
			let (cx, cy) = (
				(self.center.0 - mx / n) * self.forces.center_strength,
				(self.center.1 - my / n) * self.forces.center_strength,
			);
			for (idx, _) in &free {
				push(*idx, cx, cy);
			}
		}

		for (source, target) in &self.links {
			let (Some(s), Some(t)) = (self.nodes.get(source), self.nodes.get(target)) else {
				continue;
			};
			let (Some(a), Some(b)) = (bodies.get(&s.idx), bodies.get(&t.idx)) else {
				continue;
			};
			let (dx, dy) = (b.x - a.x, b.y - a.y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < 1e-3 {
				continue;
			}
			let k = (dist - self.forces.link_distance) / dist * self.forces.link_strength * 0.5;
			if !a.pinned {
				push(s.idx, dx * k, dy * k);
			}
			if !b.pinned {
				push(t.idx, -dx * k, -dy * k);
			}
		}

		let all: Vec<(DefaultNodeIdx, Body)> = bodies.into_iter().collect();
		for (i, (ia, a)) in all.iter().enumerate() {
			for (ib, b) in &all[i + 1..] {
				let min = a.radius + b.radius;
				let (mut dx, mut dy) = (b.x - a.x, b.y - a.y);
				let mut dist = (dx * dx + dy * dy).sqrt();
				if dist >= min {
					continue;
				}
				if dist < 1e-3 {
					(dx, dy, dist) = (1.0, 0.0, 1.0);
				}
				let overlap = (min - dist) / dist;
				let share = match (a.pinned, b.pinned) {
					(true, true) => continue,
					(false, false) => 0.5,
					_ => 1.0,
				};
				if !a.pinned {
					push(*ia, -dx * overlap * share, -dy * overlap * share);
				}
				if !b.pinned {
					push(*ib, dx * overlap * share, dy * overlap * share);
				}
			}
		}

		self.engine.visit_nodes_mut(|node| {
			if let Some((dx, dy)) = shifts.get(&node.index()) {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}

	/// Refresh the position snapshot and return the step's energy.
	fn snapshot(&mut self) -> f64 {
		let mut energy = 0.0;
		let positions = &mut self.positions;
		self.engine.visit_nodes(|node| {
			let pos = (node.x(), node.y());
			if let Some(prev) = positions.insert(node.data.user_data.clone(), pos) {
				let (dx, dy) = ((pos.0 - prev.0) as f64, (pos.1 - prev.1) as f64);
				energy += dx * dx + dy * dy;
			}
		});
		energy
	}
}

impl ForceLayout for ForceGraphLayout {
	fn add_node(&mut self, id: &str, kind: NodeKind, x: f32, y: f32) {
		if self.nodes.contains_key(id) {
			return;
		}
		let idx = self.insert_engine_node(id, x, y, false);
		self.nodes.insert(id.to_string(), LayoutNode { idx, kind });
		self.order.push(id.to_string());
		self.positions.insert(id.to_string(), (x, y));
	}

	fn add_link(&mut self, source: &str, target: &str) -> bool {
		let (Some(s), Some(t)) = (self.nodes.get(source), self.nodes.get(target)) else {
			return false;
		};
		let duplicate = self
			.links
			.iter()
			.any(|(a, b)| a == source && b == target);
		if source != target && !duplicate {
			self.engine.add_edge(s.idx, t.idx, EdgeData::default());
			self.links.push((source.to_string(), target.to_string()));
		}
		true
	}

	fn set_forces(&mut self, forces: ForceConfig) {
		if forces != self.forces {
			self.forces = forces;
			self.rebuild_engine();
		}
	}

	fn on_tick(&mut self, callback: TickCallback) {
		self.callbacks.push(callback);
	}

	fn step(&mut self, dt: f32) {
		if !self.running {
			return;
		}
		self.engine.update(dt);
		self.apply_constraints();
		let energy = self.snapshot();
		self.tick += 1;
		let info = TickInfo {
			tick: self.tick,
			energy,
		};
		for callback in &mut self.callbacks {
			callback(&info);
		}
	}

	fn pin_node(&mut self, id: &str, pos: Option<(f32, f32)>) {
		let Some(node) = self.nodes.get(id).copied() else {
			return;
		};
		match pos {
			Some((x, y)) => {
				self.pinned.insert(id.to_string());
				self.positions.insert(id.to_string(), (x, y));
			}
			None => {
				self.pinned.remove(id);
			}
		}
		self.engine.visit_nodes_mut(|n| {
			if n.index() == node.idx {
				n.data.is_anchor = pos.is_some();
				if let Some((x, y)) = pos {
					n.data.x = x;
					n.data.y = y;
				}
			}
		});
	}

	fn position(&self, id: &str) -> Option<(f32, f32)> {
		self.positions.get(id).copied()
	}

	fn stop(&mut self) {
		self.running = false;
		self.callbacks.clear();
	}

	fn is_running(&self) -> bool {
		self.running
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	fn still() -> ForceConfig {
		ForceConfig {
			charge: 0.0,
			spring: 0.0,
			center_strength: 0.0,
			link_strength: 0.0,
			..ForceConfig::default()
		}
	}

	fn distance(layout: &ForceGraphLayout, a: &str, b: &str) -> f32 {
		let (pa, pb) = (layout.position(a).unwrap(), layout.position(b).unwrap());
		((pb.0 - pa.0).powi(2) + (pb.1 - pa.1).powi(2)).sqrt()
	}

	#[test]
	fn tick_callbacks_run_until_stopped() {
		let mut layout = ForceGraphLayout::new(ForceConfig::default(), (0.0, 0.0));
		layout.add_node("process:A", NodeKind::Process, -50.0, 0.0);
		layout.add_node("flow:X", NodeKind::Flow, 50.0, 0.0);
		assert!(layout.add_link("process:A", "flow:X"));

		let ticks = Rc::new(RefCell::new(Vec::new()));
		let sink = ticks.clone();
		layout.on_tick(Box::new(move |info| sink.borrow_mut().push(info.tick)));

		layout.step(0.016);
		layout.step(0.016);
		layout.stop();
		layout.step(0.016);

		assert_eq!(*ticks.borrow(), vec![1, 2]);
		assert!(!layout.is_running());
		assert!(layout.position("flow:X").is_some());
	}

	#[test]
	fn links_need_known_endpoints_and_are_deduplicated() {
		let mut layout = ForceGraphLayout::new(ForceConfig::default(), (0.0, 0.0));
		layout.add_node("process:A", NodeKind::Process, 0.0, 0.0);
		layout.add_node("flow:X", NodeKind::Flow, 10.0, 0.0);
		assert!(!layout.add_link("process:A", "flow:missing"));
		assert!(layout.add_link("process:A", "flow:X"));
		assert!(layout.add_link("process:A", "flow:X"));
		assert_eq!(layout.link_count(), 1);
	}

	#[test]
	fn collision_separates_overlapping_nodes() {
		let mut layout = ForceGraphLayout::new(still(), (0.0, 0.0));
		layout.add_node("process:A", NodeKind::Process, 0.0, 0.0);
		layout.add_node("flow:X", NodeKind::Flow, 1.0, 0.0);
		layout.step(0.016);
		let min = still().process_radius + still().flow_radius;
		assert!(distance(&layout, "process:A", "flow:X") >= min - 1e-3);
	}

	#[test]
	fn links_relax_toward_target_distance() {
		let forces = ForceConfig {
			link_strength: 1.0,
			..still()
		};
		let mut layout = ForceGraphLayout::new(forces, (0.0, 0.0));
		layout.add_node("process:A", NodeKind::Process, 0.0, 0.0);
		layout.add_node("flow:X", NodeKind::Flow, 500.0, 0.0);
		layout.add_link("process:A", "flow:X");
		layout.step(0.016);
		assert!((distance(&layout, "process:A", "flow:X") - 100.0).abs() < 0.01);
	}

	#[test]
	fn pinned_node_holds_position_until_released() {
		let mut layout = ForceGraphLayout::new(ForceConfig::default(), (0.0, 0.0));
		layout.add_node("process:A", NodeKind::Process, 0.0, 0.0);
		layout.add_node("flow:X", NodeKind::Flow, 5.0, 0.0);
		layout.add_link("process:A", "flow:X");

		layout.pin_node("flow:X", Some((200.0, 40.0)));
		for _ in 0..20 {
			layout.step(0.016);
		}
		assert_eq!(layout.position("flow:X"), Some((200.0, 40.0)));

		layout.pin_node("flow:X", None);
		for _ in 0..20 {
			layout.step(0.016);
		}
		assert_ne!(layout.position("flow:X"), Some((200.0, 40.0)));
	}

	#[test]
	fn set_forces_keeps_positions_and_links() {
		let mut layout = ForceGraphLayout::new(ForceConfig::default(), (0.0, 0.0));
		layout.add_node("process:A", NodeKind::Process, -30.0, 0.0);
		layout.add_node("flow:X", NodeKind::Flow, 30.0, 0.0);
		layout.add_link("process:A", "flow:X");
		layout.pin_node("process:A", Some((-30.0, 0.0)));

		let forces = ForceConfig {
			link_distance: 180.0,
			..ForceConfig::default()
		};
		layout.set_forces(forces.clone());
		assert_eq!(layout.forces(), &forces);
		assert_eq!(layout.position("flow:X"), Some((30.0, 0.0)));
		assert_eq!(layout.link_count(), 1);

		layout.step(0.016);
		assert_eq!(layout.position("process:A"), Some((-30.0, 0.0)));
	}
}
