//! Visual theming for the explorer.
//!
//! Provides colours, the process palette and the per-process colour
//! assignment shared by the force and swimlane views.

use std::collections::HashMap;

use crate::graph::{FlowNode, Graph, Node, connected_processes};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let mix = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: mix(self.r),
			g: mix(self.g),
			b: mix(self.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Ordered colours handed out to processes, cycling when exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Saturated palette that reads well on a light background (default).
	pub fn vivid() -> Self {
		Self {
			colors: vec![
				Color::rgb(59, 130, 246),  // blue
				Color::rgb(239, 68, 68),   // red
				Color::rgb(16, 185, 129),  // emerald
				Color::rgb(245, 158, 11),  // amber
				Color::rgb(139, 92, 246),  // violet
				Color::rgb(6, 182, 212),   // cyan
				Color::rgb(132, 204, 22),  // lime
				Color::rgb(249, 115, 22),  // orange
				Color::rgb(236, 72, 153),  // pink
				Color::rgb(99, 102, 241),  // indigo
			],
		}
	}

	/// Colour for the `index`-th process; `None` for an empty palette.
	pub fn get(&self, index: usize) -> Option<Color> {
		let slot = index.checked_rem(self.colors.len())?;
		self.colors.get(slot).copied()
	}
}

/// Colour per process name, assigned in first-seen order of the canonical graph.
///
/// Built from the unfiltered graph so colours stay put while filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessColors {
	colors: HashMap<String, Color>,
	fallback: Color,
}

impl ProcessColors {
	/// Hand out palette colours to the processes of `graph` in node order.
	pub fn assign(graph: &Graph, palette: &NodePalette, fallback: Color) -> Self {
		let mut colors = HashMap::new();
		for process in graph.processes() {
			if !colors.contains_key(&process.name) {
				let color = palette.get(colors.len()).unwrap_or(fallback);
				colors.insert(process.name.clone(), color);
			}
		}
		Self { colors, fallback }
	}

	/// Colour of a process; unknown names get the fallback colour.
	pub fn get(&self, process: &str) -> Color {
		self.colors.get(process).copied().unwrap_or(self.fallback)
	}

	/// Pie segments for a flow: one colour per connected process in `graph`.
	/// A flow with no visible process gets a single fallback segment.
	pub fn segments(&self, graph: &Graph, flow: &FlowNode) -> Vec<Color> {
		let node = Node::Flow(flow.clone());
		let segments: Vec<Color> = connected_processes(graph, &node)
			.iter()
			.map(|p| self.get(&p.name))
			.collect();
		if segments.is_empty() {
			vec![self.fallback]
		} else {
			segments
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Dot grid colour; fully transparent disables the grid.
	pub grid_color: Color,
	pub grid_spacing: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Colour of links touching the hovered node.
	pub highlight_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Border drawn around every node.
	pub border_color: Color,
	pub border_width: f64,
	/// Ring drawn around the selected node.
	pub selection_color: Color,
	pub label_color: Color,
	/// Fill for flows with no visible process and unknown processes.
	pub fallback_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Light theme matching the surrounding page (default).
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				grid_color: Color::rgba(148, 163, 184, 0.25),
				grid_spacing: 24.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(170, 170, 170, 0.8),
				highlight_color: Color::rgb(245, 158, 11),
			},
			node: NodeStyle {
				border_color: Color::rgb(255, 255, 255),
				border_width: 2.0,
				selection_color: Color::rgb(30, 41, 59),
				label_color: Color::rgb(30, 41, 59),
				fallback_color: Color::rgb(107, 114, 128),
			},
			palette: NodePalette::vivid(),
		}
	}

	/// Colour assignment for `graph` under this theme.
	pub fn process_colors(&self, graph: &Graph) -> ProcessColors {
		ProcessColors::assign(graph, &self.palette, self.node.fallback_color)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
