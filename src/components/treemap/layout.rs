//! Rectangle packing for a [`Hierarchy`].
//!
//! Each node is inset by half the inner padding, and a node's children are tiled into
//! its rectangle after an additional outer-padding inset. Siblings therefore end up
//! `padding` apart and `padding` away from their parent's edge.

use super::hierarchy::Hierarchy;

/// An axis-aligned rectangle given by its corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x0: f64,
	/// Top edge.
	pub y0: f64,
	/// Right edge.
	pub x1: f64,
	/// Bottom edge.
	pub y1: f64,
}

impl Rect {
	/// Rectangle from its top-left and bottom-right corners.
	pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
		Self { x0, y0, x1, y1 }
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.x1 - self.x0
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.y1 - self.y0
	}

	#[cfg(test)]
	pub fn area(&self) -> f64 {
		self.width() * self.height()
	}

	/// Whether `(x, y)` lies inside. Empty rectangles contain nothing.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		self.width() > 0.0
			&& self.height() > 0.0
			&& (self.x0..=self.x1).contains(&x)
			&& (self.y0..=self.y1).contains(&y)
	}

	/// Shrinks every side by `p`; a side pair that would cross collapses to its
	/// midpoint instead.
	fn inset(self, p: f64) -> Self {
		let (mut x0, mut y0, mut x1, mut y1) = (self.x0 + p, self.y0 + p, self.x1 - p, self.y1 - p);
		if x1 < x0 {
			x0 = (x0 + x1) / 2.0;
			x1 = x0;
		}
		if y1 < y0 {
			y0 = (y0 + y1) / 2.0;
			y1 = y0;
		}
		Self { x0, y0, x1, y1 }
	}
}

/// Tiling method used to split a parent among its children.
#[derive(Clone, Debug, PartialEq)]
pub enum Tile {
	/// Rows chosen greedily to keep cell aspect ratios near `ratio`.
	Squarify {
		/// Target aspect ratio, the golden ratio by default.
		ratio: f64,
	},
	/// Alternates horizontal and vertical splits by depth.
	SliceDice,
}

impl Default for Tile {
	fn default() -> Self {
		Tile::Squarify {
			ratio: (1.0 + 5f64.sqrt()) / 2.0,
		}
	}
}

impl Tile {
	/// Splits `area` among children with `values` (summing to `total`). `depth` is the
	/// parent's depth.
	pub fn apply(&self, depth: usize, values: &[f64], total: f64, area: Rect) -> Vec<Rect> {
		let mut out = vec![Rect::default(); values.len()];
		match self {
			Tile::Squarify { ratio } => squarify(*ratio, values, total, area, &mut out),
			Tile::SliceDice if depth % 2 == 1 => slice(values, total, area, &mut out),
			Tile::SliceDice => dice(values, total, area, &mut out),
		}
		out
	}
}

/// Lays children left to right across the full height of `area`.
fn dice(values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
	let k = if total > 0.0 { area.width() / total } else { 0.0 };
	let mut x = area.x0;
	for (v, r) in values.iter().zip(out.iter_mut()) {
		let next = x + v * k;
		*r = Rect::new(x, area.y0, next, area.y1);
		x = next;
	}
}

/// Stacks children top to bottom across the full width of `area`.
fn slice(values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
	let k = if total > 0.0 { area.height() / total } else { 0.0 };
	let mut y = area.y0;
	for (v, r) in values.iter().zip(out.iter_mut()) {
		let next = y + v * k;
		*r = Rect::new(area.x0, y, area.x1, next);
		y = next;
	}
}

fn squarify(ratio: f64, values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
	if total <= 0.0 {
		dice(values, 0.0, area, out);
		return;
	}
	let Rect { mut x0, mut y0, x1, y1 } = area;
	let mut remaining = total;
	let n = values.len();
	let (mut i0, mut i1) = (0, 0);

	while i0 < n {
		let (dx, dy) = (x1 - x0, y1 - y0);

		// Seed the row with the next non-empty value.
		let mut sum;
		loop {
			sum = values[i1];
			i1 += 1;
			if sum != 0.0 || i1 >= n {
				break;
			}
		}
		let (mut min, mut max) = (sum, sum);
		let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
		let mut beta = sum * sum * alpha;
		let mut min_ratio = (max / beta).max(beta / min);

		// Grow the row while the worst aspect ratio does not get worse.
		while i1 < n {
			let v = values[i1];
			sum += v;
			min = min.min(v);
			max = max.max(v);
			beta = sum * sum * alpha;
			let new_ratio = (max / beta).max(beta / min);
			if new_ratio > min_ratio {
				sum -= v;
				break;
			}
			min_ratio = new_ratio;
			i1 += 1;
		}

		let row = i0..i1;
		if dx < dy {
			// Trailing zero-valued siblings take the rest of the strip once the
			// positive values have used up `remaining`.
			let y = if remaining > 0.0 { y0 + dy * sum / remaining } else { y1 };
			dice(&values[row.clone()], sum, Rect::new(x0, y0, x1, y), &mut out[row]);
			y0 = y;
		} else {
			let x = if remaining > 0.0 { x0 + dx * sum / remaining } else { x1 };
			slice(&values[row.clone()], sum, Rect::new(x0, y0, x, y1), &mut out[row]);
			x0 = x;
		}
		remaining -= sum;
		i0 = i1;
	}
}

/// Assigns [`HierarchyNode::rect`](super::hierarchy::HierarchyNode::rect) for every
/// node, packing the root into `width` × `height`.
pub fn treemap(hierarchy: &mut Hierarchy, width: f64, height: f64, padding: f64, tile: &Tile) {
	let Some(root) = hierarchy.nodes.first_mut() else {
		return;
	};
	root.rect = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
	let half = padding / 2.0;

	for i in 0..hierarchy.nodes.len() {
		let node = &mut hierarchy.nodes[i];
		let own = if node.depth == 0 { 0.0 } else { half };
		node.rect = node.rect.inset(own);
		if node.children.is_empty() {
			continue;
		}

		let area = node.rect.inset(padding - half);
		let (depth, total) = (node.depth, node.value);
		let children = node.children.clone();
		let values: Vec<f64> = children.iter().map(|&c| hierarchy.nodes[c].value).collect();
		for (c, rect) in children.into_iter().zip(tile.apply(depth, &values, total, area)) {
			hierarchy.nodes[c].rect = rect;
		}
	}
}
