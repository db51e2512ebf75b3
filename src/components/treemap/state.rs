//! Laid-out treemap: the packed hierarchy plus its group colors.

use log::info;

use super::hierarchy::{Hierarchy, HierarchyNode};
use super::layout::treemap;
use super::label::percent;
use super::types::TreeNode;
use crate::components::scale::OrdinalScale;
use crate::components::theme::{Color, TreemapStyle};
use crate::components::viewport::Frame;

/// A tree packed into a frame, ready to draw and hit-test.
#[derive(Clone, Debug, PartialEq)]
pub struct TreemapState {
	/// Drawing frame; cell rects are in its inner coordinates.
	pub frame: Frame,
	/// Laid-out nodes, parents before children.
	pub hierarchy: Hierarchy,
	/// Group name to fill color.
	pub colors: OrdinalScale,
}

impl TreemapState {
	/// Sums, sorts and packs `tree` into the inner area of `frame`.
	pub fn new(tree: &TreeNode, frame: Frame, style: &TreemapStyle) -> Self {
		let mut hierarchy = Hierarchy::new(tree);
		treemap(
			&mut hierarchy,
			frame.inner_width(),
			frame.inner_height(),
			style.padding,
			&style.tile,
		);
		let colors = OrdinalScale::new(
			(0..hierarchy.nodes.len()).filter_map(|i| hierarchy.group_name(i)),
			&style.palette,
		);
		info!(
			"treemap: laid out {} cells, total value {}",
			hierarchy.nodes.len(),
			hierarchy.root().map_or(0.0, |r| r.value)
		);
		Self {
			frame,
			hierarchy,
			colors,
		}
	}

	/// Every node with its index, in draw order.
	pub fn cells(&self) -> impl Iterator<Item = (usize, &HierarchyNode)> {
		self.hierarchy.nodes.iter().enumerate()
	}

	/// Group color of cell `index`.
	pub fn fill(&self, index: usize) -> Color {
		self.colors.color(self.hierarchy.group_name(index).unwrap_or_default())
	}

	/// Percentage label of a cell relative to the root.
	pub fn share(&self, index: usize) -> String {
		let total = self.hierarchy.root().map_or(0.0, |r| r.value);
		self.hierarchy
			.nodes
			.get(index)
			.map(|n| percent(n.value, total))
			.unwrap_or_default()
	}

	/// Last-drawn cell containing the inner-space point `(x, y)`.
	pub fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
		self.hierarchy.nodes.iter().rposition(|n| n.rect.contains(x, y))
	}

	/// Name of cell `index`.
	pub fn name(&self, index: usize) -> Option<&str> {
		self.hierarchy.nodes.get(index).map(|n| n.name.as_str())
	}
}
