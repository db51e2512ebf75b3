//! Draws a [`TreemapState`] onto a [`Surface`], one translated group per cell.

use super::label::CellLabel;
use super::state::TreemapState;
use crate::components::surface::{Stroke, Surface, SvgWriter, TextStyle};
use crate::components::theme::TreemapStyle;

/// Per-render interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Highlight<'a> {
	/// Name of the selected cell; gets the heavy border.
	pub selected: Option<&'a str>,
	/// Index of the cell under the pointer; gets the hover fill.
	pub hovered: Option<usize>,
}

/// Renders the whole treemap as an SVG document.
pub fn render_svg(state: &TreemapState, highlight: Highlight<'_>, style: &TreemapStyle) -> String {
	let mut svg = SvgWriter::new(&state.frame);
	render(state, highlight, &mut svg, style);
	svg.finish()
}

/// Draws every cell in hierarchy order so children paint over their parents.
pub fn render(state: &TreemapState, highlight: Highlight<'_>, surface: &mut impl Surface, style: &TreemapStyle) {
	for (i, node) in state.cells() {
		let r = node.rect;
		let (w, h) = (r.width(), r.height());
		let fill = if highlight.hovered == Some(i) {
			style.hover_fill
		} else {
			state.fill(i)
		};
		let border = if highlight.selected == Some(node.name.as_str()) {
			Stroke {
				color: style.selected_border_color,
				width: style.selected_border_width,
			}
		} else {
			Stroke {
				color: style.border_color,
				width: style.border_width,
			}
		};

		surface.push_group(r.x0, r.y0);
		surface.rect((0.0, 0.0), (w, h), fill, Some(border));
		if let Some(label) = CellLabel::fit(w, h, &node.name, &state.share(i), &style.label) {
			let (x, y) = style.label.inset;
			surface.text(
				(x, y),
				&label.name,
				TextStyle {
					font_size: label.font_size,
					bold: true,
					fill: style.label.color,
					dy_em: 0.0,
				},
			);
			if !label.share.is_empty() {
				surface.text(
					(x, y + label.line_gap()),
					&label.share,
					TextStyle {
						font_size: label.share_font_size(),
						bold: false,
						fill: style.label.color,
						dy_em: 0.0,
					},
				);
			}
		}
		surface.pop_group();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::surface::recorder::{Recorder, Shape};
	use crate::components::treemap::types::TreeNode;
	use crate::components::viewport::{Frame, Margin};
	use pretty_assertions::assert_eq;

	fn two_leaves() -> TreemapState {
		let tree = TreeNode::branch("root", vec![TreeNode::leaf("a", 70.0), TreeNode::leaf("b", 30.0)]);
		TreemapState::new(
			&tree,
			Frame::new(Margin::uniform(0.0), 1000.0, 600.0),
			&TreemapStyle::default(),
		)
	}

	fn borders(rec: &Recorder) -> Vec<f64> {
		rec.rects()
			.into_iter()
			.map(|s| match s {
				Shape::Rect { stroke: Some(s), .. } => s.width,
				_ => unreachable!(),
			})
			.collect()
	}

	fn draw(state: &TreemapState, highlight: Highlight<'_>) -> Recorder {
		let mut rec = Recorder::default();
		render(state, highlight, &mut rec, &TreemapStyle::default());
		rec
	}

	#[test]
	fn one_rect_per_node_in_breadth_first_order() {
		let rec = draw(&two_leaves(), Highlight::default());
		assert_eq!(rec.rects().len(), 3);
		assert!(rec.is_balanced());
		assert_eq!(rec.texts(), vec!["root", "100.0%", "a", "70.0%", "b", "30.0%"]);
	}

	#[test]
	fn selection_changes_only_the_selected_border() {
		let state = two_leaves();
		let plain = borders(&draw(&state, Highlight::default()));
		let selected = borders(&draw(
			&state,
			Highlight {
				selected: Some("a"),
				hovered: None,
			},
		));
		assert_eq!(plain, vec![1.0, 1.0, 1.0]);
		assert_eq!(selected, vec![1.0, 3.0, 1.0]);
	}

	#[test]
	fn hover_overrides_fill() {
		let state = two_leaves();
		let style = TreemapStyle::default();
		let rec = draw(
			&state,
			Highlight {
				selected: None,
				hovered: Some(2),
			},
		);
		let fills: Vec<_> = rec
			.rects()
			.into_iter()
			.map(|s| match s {
				Shape::Rect { fill, .. } => *fill,
				_ => unreachable!(),
			})
			.collect();
		assert_eq!(fills[2], style.hover_fill);
		assert_eq!(fills[1], state.fill(1));
	}

	#[test]
	fn labels_are_placed_inside_their_cell() {
		let state = two_leaves();
		let rec = draw(&state, Highlight::default());
		let b = state.hierarchy.nodes[2].rect;
		let at = rec
			.shapes
			.iter()
			.find_map(|s| match s {
				Shape::Text { at, content, .. } if content == "b" => Some(*at),
				_ => None,
			})
			.unwrap();
		assert_eq!(at, (b.x0 + 4.0, b.y0 + 14.0));
	}

	#[test]
	fn zero_total_renders_without_share_lines() {
		let tree = TreeNode::branch("root", vec![TreeNode::leaf("a", 0.0)]);
		let state = TreemapState::new(&tree, Frame::default(), &TreemapStyle::default());
		let svg = render_svg(&state, Highlight::default(), &TreemapStyle::default());
		assert!(!svg.contains("%</text>"));
		assert!(!svg.contains("NaN"));
		assert_eq!(svg.matches("<rect").count(), 2);
	}
}
