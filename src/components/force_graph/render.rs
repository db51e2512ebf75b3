//! Draws the graph onto a [`Surface`].
//!
//! Drawing order gives the correct z-ordering: links, then nodes, then the legend.

use super::state::ForceGraphState;
use crate::components::surface::{Stroke, Surface, SvgWriter, TextStyle};
use crate::components::theme::GraphStyle;

/// Renders the complete graph into an SVG document.
pub fn render_svg(state: &ForceGraphState, style: &GraphStyle) -> String {
	let mut svg = SvgWriter::new(&state.frame);
	render(state, &mut svg, style);
	svg.finish()
}

/// Renders the graph onto any surface, in inner (margin-relative) coordinates.
pub fn render(state: &ForceGraphState, surface: &mut impl Surface, style: &GraphStyle) {
	draw_links(state, surface, style);
	draw_nodes(state, surface, style);
	draw_legend(state, surface, style);
}

fn draw_links(state: &ForceGraphState, surface: &mut impl Surface, style: &GraphStyle) {
	surface.push_group(0.0, 0.0);
	for edge in &state.edges {
		surface.line(
			state.position(edge.source),
			state.position(edge.target),
			Stroke {
				color: style.edge.color,
				width: state.scales.width(edge),
			},
		);
	}
	surface.pop_group();
}

fn draw_nodes(state: &ForceGraphState, surface: &mut impl Surface, style: &GraphStyle) {
	let border = Stroke {
		color: style.node.border_color,
		width: style.node.border_width,
	};
	surface.push_group(0.0, 0.0);
	for (i, node) in state.nodes.iter().enumerate() {
		surface.circle(
			state.position(i),
			state.radius(i),
			state.scales.color(node),
			Some(border),
		);
	}
	surface.pop_group();
}

fn draw_legend(state: &ForceGraphState, surface: &mut impl Surface, style: &GraphStyle) {
	let legend = &style.legend;
	let text = TextStyle {
		font_size: legend.font_size,
		bold: false,
		fill: legend.text_color,
		dy_em: 0.32,
	};
	surface.push_group(0.0, 0.0);
	for (i, (name, color)) in state.scales.node_color.domain().enumerate() {
		surface.push_group(legend.offset.0, i as f64 * legend.row_height + legend.offset.1);
		surface.rect(
			(0.0, 0.0),
			(legend.swatch_size, legend.swatch_size),
			color,
			None,
		);
		surface.text((legend.label_x, legend.label_y), name, text);
		surface.pop_group();
	}
	surface.pop_group();
}
