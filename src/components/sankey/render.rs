use web_sys::CanvasRenderingContext2d;

use super::state::SankeyState;
use crate::model::Rgb;

const BACKGROUND: &str = "#1a1a2e";
const DIM_LINK: Rgb = Rgb::new(50, 50, 50);
const DIM_LINK_ALPHA: f64 = 0.1;
const LINK_ALPHA: f64 = 0.85;
/// Links not touching the hovered node are drawn slightly translucent.
const LINK_OPACITY: f64 = 0.9;
const LINK_BRIGHTEN: f64 = 30.0;
const LABEL_FONT: &str = "500 12px sans-serif";

pub fn render(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
	draw_tooltip(state, ctx);
}

fn draw_links(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	// Overlapping ribbons lighten each other on the dark background.
	let _ = ctx.set_global_composite_operation("lighten");

	for link in &state.layout.links {
		let strength = state.link_strength(&link.key);
		let opacity = match state.hover.node {
			Some(id) if link.source == id || link.target == id => 1.0,
			_ => LINK_OPACITY,
		};
		let xm = (link.x0 + link.x1) / 2.0;
		ctx.set_line_width(link.width.max(1.0));
		ctx.begin_path();
		ctx.move_to(link.x0, link.y0);
		ctx.bezier_curve_to(xm, link.y0, xm, link.y1, link.x1, link.y1);

		if strength > 0.0 {
			let color = link.color.brighten(LINK_BRIGHTEN).rgba(LINK_ALPHA);
			ctx.set_global_alpha(strength * opacity);
			ctx.set_stroke_style_str(&color);
			ctx.stroke();
		}
		if strength < 1.0 {
			ctx.set_global_alpha((1.0 - strength) * opacity);
			ctx.set_stroke_style_str(&DIM_LINK.rgba(DIM_LINK_ALPHA));
			ctx.stroke();
		}
	}

	ctx.set_global_alpha(1.0);
	let _ = ctx.set_global_composite_operation("source-over");
}

fn draw_nodes(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	for node in &state.layout.nodes {
		ctx.set_fill_style_str(&node.color.rgba(state.node_alpha(node.id)));
		ctx.fill_rect(node.x0, node.y0, node.x1 - node.x0, node.y1 - node.y0);
	}

	if let Some(node) = state.hover.node.and_then(|id| state.layout.node(id)) {
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
		ctx.set_line_width(1.5);
		ctx.stroke_rect(
			node.x0 - 1.0,
			node.y0 - 1.0,
			node.x1 - node.x0 + 2.0,
			node.y1 - node.y0 + 2.0,
		);
	}
}

fn draw_labels(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	ctx.set_text_baseline("middle");

	for node in &state.layout.nodes {
		let (x, y, align) = node.label_anchor();
		let label = node.id.kind.name().to_uppercase();
		let alpha = state.node_alpha(node.id);
		ctx.set_text_align(align);
		ctx.set_fill_style_str(&node.color.brighten(100.0).rgba(alpha));
		let _ = ctx.fill_text(&label, x, y);
	}
}

fn draw_tooltip(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let Some(id) = state.hover.node else {
		return;
	};
	let title = format!("{}: {}", id.kind, id);
	let hint = "Click to see all connected paths";

	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	ctx.set_font("bold 12px sans-serif");
	let title_w = ctx.measure_text(&title).map(|m| m.width()).unwrap_or(120.0);
	ctx.set_font("11px sans-serif");
	let hint_w = ctx.measure_text(hint).map(|m| m.width()).unwrap_or(180.0);

	let (pad, w, h) = (8.0, title_w.max(hint_w) + 24.0, 44.0);
	let x = (state.hover.x + 14.0).min(state.width - w - 4.0).max(4.0);
	let y = (state.hover.y + 14.0).min(state.height - h - 4.0).max(4.0);

	ctx.set_fill_style_str("#333");
	ctx.fill_rect(x, y, w, h);
	ctx.set_fill_style_str("#fff");
	ctx.set_font("bold 12px sans-serif");
	let _ = ctx.fill_text(&title, x + 12.0, y + pad);
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text(hint, x + 12.0, y + pad + 18.0);
}
