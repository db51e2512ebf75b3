//! Bucketed quadtree over weighted points.
//!
//! The many-body force reads the summed weight (charge) and centroid of each cell for
//! Barnes–Hut approximation; collision reads the largest weight (radius) of each cell
//! to prune far-away cells.

const LEAF_CAPACITY: usize = 12;
const MAX_DEPTH: usize = 10;

/// Axis-aligned square cell.
#[derive(Clone, Copy, Debug)]
pub(super) struct Bounds {
	pub(super) cx: f64,
	pub(super) cy: f64,
	pub(super) half: f64,
}

impl Bounds {
	fn from_points(points: &[(f64, f64)]) -> Option<Self> {
		let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
		let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for &(x, y) in points {
			x0 = x0.min(x);
			y0 = y0.min(y);
			x1 = x1.max(x);
			y1 = y1.max(y);
		}
		if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
			return None;
		}
		let span = (x1 - x0).max(y1 - y0).max(1.0);
		Some(Self {
			cx: (x0 + x1) / 2.0,
			cy: (y0 + y1) / 2.0,
			half: span / 2.0 + 1.0,
		})
	}

	pub(super) fn contains(self, x: f64, y: f64) -> bool {
		(x - self.cx).abs() <= self.half && (y - self.cy).abs() <= self.half
	}

	pub(super) fn side(self) -> f64 {
		self.half * 2.0
	}

	fn quadrant_for(self, x: f64, y: f64) -> usize {
		match (x >= self.cx, y >= self.cy) {
			(false, false) => 0,
			(true, false) => 1,
			(false, true) => 2,
			(true, true) => 3,
		}
	}

	fn child(self, quadrant: usize) -> Self {
		let q = self.half / 2.0;
		let (dx, dy) = match quadrant {
			0 => (-q, -q),
			1 => (q, -q),
			2 => (-q, q),
			_ => (q, q),
		};
		Self {
			cx: self.cx + dx,
			cy: self.cy + dy,
			half: q,
		}
	}
}

/// A quadtree cell aggregating the charge of the points beneath it.
pub(super) struct QuadNode {
	pub(super) bounds: Bounds,
	/// Charge-weighted centroid.
	pub(super) cx: f64,
	pub(super) cy: f64,
	/// Summed (signed) charge.
	pub(super) charge: f64,
	/// Largest single weight beneath this cell.
	pub(super) max_weight: f64,
	/// Point indices; only populated on leaves.
	pub(super) indices: Vec<usize>,
	pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
	/// Builds a tree over `points` with per-point `charges`. `None` for no finite points.
	pub(super) fn build(points: &[(f64, f64)], charges: &[f64]) -> Option<Self> {
		let bounds = Bounds::from_points(points)?;
		let indices = (0..points.len()).collect();
		Some(Self::build_node(bounds, indices, points, charges, 0))
	}

	fn build_node(
		bounds: Bounds,
		indices: Vec<usize>,
		points: &[(f64, f64)],
		charges: &[f64],
		depth: usize,
	) -> Self {
		let (mut sx, mut sy, mut weight, mut charge) = (0.0, 0.0, 0.0, 0.0);
		let mut max_weight = f64::NEG_INFINITY;
		for &i in &indices {
			let c = charges[i];
			let w = c.abs();
			sx += points[i].0 * w;
			sy += points[i].1 * w;
			weight += w;
			charge += c;
			max_weight = max_weight.max(c);
		}
		let (cx, cy) = if weight > 0.0 {
			(sx / weight, sy / weight)
		} else {
			(bounds.cx, bounds.cy)
		};

		let mut node = Self {
			bounds,
			cx,
			cy,
			charge,
			max_weight,
			indices,
			children: std::array::from_fn(|_| None),
		};

		if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
			return node;
		}

		let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
		for &i in &node.indices {
			buckets[bounds.quadrant_for(points[i].0, points[i].1)].push(i);
		}
		if buckets.iter().filter(|b| !b.is_empty()).count() <= 1 {
			return node;
		}

		for (quadrant, bucket) in buckets.into_iter().enumerate() {
			if bucket.is_empty() {
				continue;
			}
			node.children[quadrant] = Some(Box::new(Self::build_node(
				bounds.child(quadrant),
				bucket,
				points,
				charges,
				depth + 1,
			)));
		}
		node.indices.clear();
		node
	}

	pub(super) fn is_leaf(&self) -> bool {
		self.children.iter().all(Option::is_none)
	}

	/// Collects the indices of every leaf whose cell lies within `reach` plus the
	/// cell's largest weight of `(x, y)`.
	pub(super) fn near(&self, x: f64, y: f64, reach: f64, out: &mut Vec<usize>) {
		let gap_x = ((x - self.bounds.cx).abs() - self.bounds.half).max(0.0);
		let gap_y = ((y - self.bounds.cy).abs() - self.bounds.half).max(0.0);
		let r = reach + self.max_weight;
		if gap_x * gap_x + gap_y * gap_y > r * r {
			return;
		}
		if self.is_leaf() {
			out.extend_from_slice(&self.indices);
			return;
		}
		for child in self.children.iter().flatten() {
			child.near(x, y, reach, out);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn root_aggregates_all_charge() {
		let points: Vec<(f64, f64)> = (0..100).map(|i| ((i % 10) as f64, (i / 10) as f64)).collect();
		let charges = vec![-30.0; points.len()];
		let tree = QuadNode::build(&points, &charges).unwrap();
		assert!((tree.charge + 3000.0).abs() < 1e-9);
		assert!((tree.cx - 4.5).abs() < 1e-9);
		assert!((tree.cy - 4.5).abs() < 1e-9);
		assert!(!tree.is_leaf());
		for &(x, y) in &points {
			assert!(tree.bounds.contains(x, y));
		}
	}

	#[test]
	fn small_sets_stay_in_one_leaf() {
		let points = [(0.0, 0.0), (5.0, 5.0)];
		let tree = QuadNode::build(&points, &[-1.0, -1.0]).unwrap();
		assert!(tree.is_leaf());
		assert_eq!(tree.indices, vec![0, 1]);
	}

	#[test]
	fn near_prunes_cells_beyond_reach() {
		let points: Vec<(f64, f64)> = (0..64).map(|i| (i as f64 * 100.0, 0.0)).collect();
		let radii = vec![5.0; points.len()];
		let tree = QuadNode::build(&points, &radii).unwrap();
		assert_eq!(tree.max_weight, 5.0);

		let mut found = Vec::new();
		tree.near(0.0, 0.0, 5.0, &mut found);
		assert!(found.contains(&0));
		assert!(found.len() < points.len() / 2, "found {}", found.len());
		// Every point that could touch the query circle is reported.
		found.clear();
		tree.near(3150.0, 0.0, 60.0, &mut found);
		assert!(found.contains(&31) && found.contains(&32));
	}

	#[test]
	fn non_finite_points_yield_no_tree() {
		assert!(QuadNode::build(&[], &[]).is_none());
		assert!(QuadNode::build(&[(f64::NAN, 0.0)], &[-1.0]).is_none());
	}
}
