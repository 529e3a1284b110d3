//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Sizes are either world-space (they grow when zooming in) or screen-space
//! (fixed pixel size whatever the zoom level `k`). [`ScaledValues`] resolves
//! a [`ScaleConfig`] for one zoom level, ready to use after the canvas
//! transform is applied.

use crate::graph::NodeKind;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Alpha follows zoom, clamped to [0, 1].
	ScaleWithZoom,
	/// Fully visible from `full_alpha_k`, invisible at or below `zero_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::ScaleWithZoom => k.clamp(0.0, 1.0),
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Node sizing. Process nodes are drawn larger than flow nodes.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	pub process_radius: f64,
	pub flow_radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Extra hit-test margin around the drawn radius.
	pub hit_padding: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Zoom below which the label font stops shrinking.
	pub label_min_k: f64,
	pub label_alpha_behavior: AlphaBehavior,
}

/// Edge sizing and the animated dash that runs process to flow.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// Dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	/// Dash travel speed in world units per second.
	pub flow_speed: f64,
	/// Dashes fade to solid lines when zoomed out.
	pub dash_alpha_behavior: AlphaBehavior,
}

#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	pub size: f64,
	pub size_behavior: ScaleBehavior,
	pub alpha_behavior: AlphaBehavior,
	/// Arrows fainter than this are skipped.
	pub cull_alpha: f64,
}

/// Hover and selection rings, in screen pixels.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	pub width: f64,
	pub offset: f64,
	pub behavior: ScaleBehavior,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub arrow: ArrowScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				process_radius: 16.0,
				flow_radius: 11.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: f64::INFINITY,
				},
				hit_padding: 4.0,
				hit_behavior: ScaleBehavior::World,
				label_size: 12.0,
				label_min_k: 0.6,
				label_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.35,
					full_alpha_k: 0.7,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				dash_pattern: (8.0, 4.0),
				flow_speed: 12.0,
				dash_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.4,
					full_alpha_k: 0.9,
				},
			},
			arrow: ArrowScaleConfig {
				size: 6.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 16.0,
				},
				alpha_behavior: AlphaBehavior::ScaleWithZoom,
				cull_alpha: 0.05,
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 3.0,
				behavior: ScaleBehavior::Screen,
			},
		}
	}
}

/// Scale values resolved for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub process_radius: f64,
	pub flow_radius: f64,
	pub hit_padding: f64,
	/// Label font string (e.g., "12px sans-serif").
	pub label_font: String,
	pub label_size: f64,
	pub label_alpha: f64,
	pub edge_line_width: f64,
	pub dash_pattern: (f64, f64),
	/// Dash visibility [0, 1]. At 0, edges are solid lines.
	pub dash_alpha: f64,
	pub arrow_size: f64,
	pub arrow_alpha: f64,
	pub cull_arrows: bool,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node = &config.node;
		let label_size = node.label_size / k.max(node.label_min_k);
		let arrow_alpha = config.arrow.alpha_behavior.apply(k);

		Self {
			k,
			process_radius: node.radius_behavior.apply(node.process_radius, k),
			flow_radius: node.radius_behavior.apply(node.flow_radius, k),
			hit_padding: node.hit_behavior.apply(node.hit_padding, k),
			label_font: format!("{}px sans-serif", label_size),
			label_size,
			label_alpha: node.label_alpha_behavior.apply(k),
			edge_line_width: config.edge.line_width / k,
			dash_pattern: config.edge.dash_pattern,
			dash_alpha: config.edge.dash_alpha_behavior.apply(k),
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow.cull_alpha,
			ring_width: config.ring.behavior.apply(config.ring.width, k),
			ring_offset: config.ring.behavior.apply(config.ring.offset, k),
		}
	}

	pub fn radius(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Process => self.process_radius,
			NodeKind::Flow => self.flow_radius,
		}
	}

	/// Dash offset for the flow animation at `flow_time` seconds.
	pub fn dash_offset(&self, flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_radius_keeps_minimum_screen_size() {
		let config = ScaleConfig::default();
		let zoomed_out = ScaledValues::new(&config, 0.1);
		// 11 world units at k=0.1 is 1.1px, below the 4px floor.
		assert!((zoomed_out.flow_radius * 0.1 - 4.0).abs() < 1e-9);
		let normal = ScaledValues::new(&config, 1.0);
		assert_eq!(normal.flow_radius, 11.0);
		assert!(normal.process_radius > normal.flow_radius);
	}

	#[test]
	fn labels_fade_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 1.0).label_alpha, 1.0);
		assert_eq!(ScaledValues::new(&config, 0.3).label_alpha, 0.0);
	}

	#[test]
	fn screen_rings_counter_zoom() {
		let config = ScaleConfig::default();
		let scaled = ScaledValues::new(&config, 2.0);
		assert_eq!(scaled.ring_width, 1.0);
	}
}
