//! Flattened, value-summed view of a [`TreeNode`] tree.
//!
//! Nodes live in one arena in breadth-first order (root first), children sorted by
//! descending value. Parents always precede their children, so top-down passes such as
//! layout are a single forward iteration.

use std::collections::VecDeque;

use super::layout::Rect;
use super::types::TreeNode;

#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
	pub name: String,
	/// Sum of the leaf values below (or the node's own value for a leaf).
	pub value: f64,
	pub depth: usize,
	pub children: Vec<usize>,
	/// Index of the top-level ancestor: the depth-1 node on the path from the root,
	/// the node itself at depth 1, and the root for the root.
	pub group: usize,
	/// Position assigned by layout; zero-sized until then.
	pub rect: Rect,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hierarchy {
	pub nodes: Vec<HierarchyNode>,
}

/// Intermediate owned tree with sums computed and children sorted.
struct Summed {
	name: String,
	value: f64,
	children: Vec<Summed>,
}

fn summed(node: &TreeNode) -> Summed {
	if node.is_leaf() {
		return Summed {
			name: node.name.clone(),
			value: node.leaf_value(),
			children: Vec::new(),
		};
	}
	let mut children: Vec<Summed> = node.children.iter().map(summed).collect();
	// Stable: equal values keep input order.
	children.sort_by(|a, b| b.value.total_cmp(&a.value));
	Summed {
		name: node.name.clone(),
		value: children.iter().map(|c| c.value).sum(),
		children,
	}
}

impl Hierarchy {
	pub fn new(tree: &TreeNode) -> Self {
		let mut nodes: Vec<HierarchyNode> = Vec::new();
		let mut queue: VecDeque<(Summed, Option<usize>, usize)> = VecDeque::new();
		queue.push_back((summed(tree), None, 0));

		while let Some((node, parent, depth)) = queue.pop_front() {
			let index = nodes.len();
			let group = match (parent, depth) {
				(Some(p), d) if d > 1 => nodes[p].group,
				_ => index,
			};
			if let Some(p) = parent {
				nodes[p].children.push(index);
			}
			nodes.push(HierarchyNode {
				name: node.name,
				value: node.value,
				depth,
				children: Vec::new(),
				group,
				rect: Rect::default(),
			});
			for child in node.children {
				queue.push_back((child, Some(index), depth + 1));
			}
		}
		Self { nodes }
	}

	pub fn root(&self) -> Option<&HierarchyNode> {
		self.nodes.first()
	}

	/// Name of the group node colors are keyed by.
	pub fn group_name(&self, index: usize) -> Option<&str> {
		let node = self.nodes.get(index)?;
		self.nodes.get(node.group).map(|g| g.name.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn sample() -> TreeNode {
		TreeNode::branch(
			"root",
			vec![
				TreeNode::branch("small", vec![TreeNode::leaf("s1", 1.0), TreeNode::leaf("s2", 2.0)]),
				TreeNode::branch(
					"big",
					vec![
						TreeNode::leaf("b1", 5.0),
						TreeNode::branch("deep", vec![TreeNode::leaf("d1", 10.0)]),
					],
				),
				TreeNode::leaf("tie", 3.0),
			],
		)
	}

	#[test]
	fn nodes_are_breadth_first_with_sorted_children() {
		let h = Hierarchy::new(&sample());
		let names: Vec<&str> = h.nodes.iter().map(|n| n.name.as_str()).collect();
		assert_eq!(names, vec!["root", "big", "small", "tie", "deep", "b1", "s2", "s1", "d1"]);
	}

	#[test]
	fn values_sum_leaves_only() {
		let mut tree = sample();
		tree.value = Some(1000.0);
		let h = Hierarchy::new(&tree);
		assert_eq!(h.root().map(|r| r.value), Some(21.0));
		let big = &h.nodes[1];
		assert_eq!(big.value, 15.0);
		assert_eq!(big.children.len(), 2);
		for &c in &big.children {
			assert_eq!(h.nodes[c].depth, 2);
		}
	}

	#[test]
	fn ties_keep_input_order() {
		let tree = TreeNode::branch(
			"r",
			vec![TreeNode::leaf("x", 1.0), TreeNode::leaf("y", 1.0), TreeNode::leaf("z", 1.0)],
		);
		let h = Hierarchy::new(&tree);
		let names: Vec<&str> = h.nodes[1..].iter().map(|n| n.name.as_str()).collect();
		assert_eq!(names, vec!["x", "y", "z"]);
	}

	#[test]
	fn groups_follow_the_top_level_ancestor() {
		let h = Hierarchy::new(&sample());
		let group = |name: &str| {
			let i = h.nodes.iter().position(|n| n.name == name).unwrap();
			h.group_name(i).unwrap().to_string()
		};
		assert_eq!(group("root"), "root");
		assert_eq!(group("big"), "big");
		assert_eq!(group("d1"), "big");
		assert_eq!(group("s1"), "small");
		assert_eq!(group("tie"), "tie");
	}

	#[test]
	fn childless_root_is_a_single_node() {
		let h = Hierarchy::new(&TreeNode::leaf("only", 4.0));
		assert_eq!(h.nodes.len(), 1);
		assert_eq!(h.nodes[0].value, 4.0);
		assert_eq!(h.nodes[0].group, 0);
	}
}
