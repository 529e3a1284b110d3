//! Canvas rendering for the force view.
//!
//! Drawing order:
//! 1. Background and dot grid (screen space)
//! 2. Links with animated dashes and arrowheads (world space)
//! 3. Nodes: dimmed ones first, highlighted ones on top, then rings and labels

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::theme::{Color, Theme};

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Equal pie slices as (start, end) angles, starting at twelve o'clock.
pub fn pie_slices(count: usize) -> Vec<(f64, f64)> {
	let step = 2.0 * PI / count.max(1) as f64;
	(0..count)
		.map(|i| {
			let start = -PI / 2.0 + step * i as f64;
			(start, start + step)
		})
		.collect()
}

pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, config, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bg = &theme.background;
	ctx.set_fill_style_str(&bg.color.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	if bg.grid_color.a <= 0.0 || bg.grid_spacing <= 0.0 {
		return;
	}
	let spacing = bg.grid_spacing * state.transform.k;
	if spacing < 6.0 {
		return;
	}
	ctx.set_fill_style_str(&bg.grid_color.to_css());
	let mut x = state.transform.x.rem_euclid(spacing);
	while x < state.width {
		let mut y = state.transform.y.rem_euclid(spacing);
		while y < state.height {
			ctx.fill_rect(x - 0.75, y - 0.75, 1.5, 1.5);
			y += spacing;
		}
		x += spacing;
	}
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let dash_offset = scale.dash_offset(state.flow_time, config.edge.flow_speed);
	let max_t = smooth_step(state.highlight.max_intensity());

	for &(source, target) in &state.edges {
		let (Some((x1, y1)), Some((x2, y2))) = (state.position(source), state.position(target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let r1 = scale.radius(state.nodes[source].kind);
		let r2 = scale.radius(state.nodes[target].kind);

		let edge_t = smooth_step(state.highlight.edge_intensity(source, target));
		let (color, alpha, width) = if edge_t > 0.01 {
			(
				theme.edge.highlight_color,
				0.7 + 0.3 * edge_t,
				scale.edge_line_width * (1.0 + 0.6 * edge_t),
			)
		} else {
			(
				theme.edge.color,
				1.0 - 0.7 * max_t,
				scale.edge_line_width,
			)
		};
		let stroke = color.with_alpha(color.a * alpha);
		ctx.set_stroke_style_str(&stroke.to_css());
		ctx.set_line_width(width);

		let gap = scale.dash_pattern.1 * scale.dash_alpha;
		if gap > 0.1 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(scale.dash_pattern.0),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(
			x2 - ux * (r2 + scale.arrow_size),
			y2 - uy * (r2 + scale.arrow_size),
		);
		ctx.stroke();

		let arrow_alpha = alpha * scale.arrow_alpha;
		if !scale.cull_arrows && arrow_alpha > 0.0 {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
			ctx.set_fill_style_str(&color.with_alpha(color.a * arrow_alpha).to_css());
			let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
			let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
			let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let dim = 1.0 - 0.7 * max_t;

	let (lit, unlit): (Vec<usize>, Vec<usize>) = (0..state.nodes.len())
		.partition(|&idx| state.highlight.node_intensity(idx) > 0.001);

	for idx in unlit {
		draw_node(state, ctx, scale, theme, idx, dim, 1.0);
	}
	for idx in lit {
		let t = smooth_step(state.highlight.node_intensity(idx));
		let alpha = dim + (1.0 - dim) * t;
		let grow = if state.highlight.hovered() == Some(idx) {
			0.3
		} else {
			0.15
		};
		draw_node(state, ctx, scale, theme, idx, alpha, 1.0 + grow * t);
	}

	if let Some(idx) = state.selected {
		draw_ring(state, ctx, scale, idx, theme.node.selection_color, 1.0);
	}
	if let Some(idx) = state.highlight.hovered() {
		let t = smooth_step(state.highlight.node_intensity(idx));
		draw_ring(state, ctx, scale, idx, theme.edge.highlight_color, t);
	}

	if scale.label_alpha > 0.01 {
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		for (idx, info) in state.nodes.iter().enumerate() {
			let Some((x, y)) = state.position(idx) else {
				continue;
			};
			let t = smooth_step(state.highlight.node_intensity(idx));
			let alpha = scale.label_alpha * (dim + (1.0 - dim) * t);
			let label = theme.node.label_color;
			ctx.set_fill_style_str(&label.with_alpha(label.a * alpha).to_css());
			let _ = ctx.fill_text(&info.label, x, y + scale.radius(info.kind) + 4.0 / scale.k);
		}
	}
}

/// One filled circle, or a pie with one slice per connected process.
fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	idx: usize,
	alpha: f64,
	radius_mult: f64,
) {
	let Some((x, y)) = state.position(idx) else {
		return;
	};
	let info = &state.nodes[idx];
	let radius = scale.radius(info.kind) * radius_mult;

	ctx.set_global_alpha(alpha);
	match info.segments.as_slice() {
		[] => fill_circle(ctx, x, y, radius, theme.node.fallback_color),
		[only] => fill_circle(ctx, x, y, radius, *only),
		segments => {
			for (color, (start, end)) in segments.iter().zip(pie_slices(segments.len())) {
				ctx.begin_path();
				ctx.move_to(x, y);
				let _ = ctx.arc(x, y, radius, start, end);
				ctx.close_path();
				ctx.set_fill_style_str(&color.to_css());
				ctx.fill();
			}
		}
	}

	if theme.node.border_width > 0.0 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: Color) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();
}

fn draw_ring(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	idx: usize,
	color: Color,
	alpha: f64,
) {
	if alpha < 0.01 {
		return;
	}
	let Some((x, y)) = state.position(idx) else {
		return;
	};
	let radius = scale.radius(state.nodes[idx].kind) + scale.ring_offset;
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.with_alpha(color.a * alpha).to_css());
	ctx.set_line_width(scale.ring_width);
	ctx.stroke();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pie_slices_cover_the_circle() {
		let slices = pie_slices(3);
		assert_eq!(slices.len(), 3);
		assert!((slices[0].0 + PI / 2.0).abs() < 1e-12);
		for pair in slices.windows(2) {
			assert!((pair[0].1 - pair[1].0).abs() < 1e-12);
		}
		let (first, last) = (slices[0].0, slices[2].1);
		assert!((last - first - 2.0 * PI).abs() < 1e-12);
	}

	#[test]
	fn single_slice_is_full_circle() {
		let slices = pie_slices(1);
		assert!((slices[0].1 - slices[0].0 - 2.0 * PI).abs() < 1e-12);
		assert!(pie_slices(0).is_empty());
	}
}
