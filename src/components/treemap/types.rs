//! Nested tree payload for the treemap.

use serde::{Deserialize, Serialize};

/// One node of the nested input tree.
///
/// Leaves carry a `value`; on inner nodes it is ignored, since an inner node's value
/// is always the sum of its leaves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
	/// Label, and the selection key passed to `on_select`.
	pub name: String,
	/// Leaf magnitude.
	#[serde(default)]
	pub value: Option<f64>,
	/// Nested nodes; empty for a leaf.
	#[serde(default)]
	pub children: Vec<TreeNode>,
}

impl TreeNode {
	/// Childless node with a value.
	pub fn leaf(name: impl Into<String>, value: f64) -> Self {
		Self {
			name: name.into(),
			value: Some(value),
			children: Vec::new(),
		}
	}

	/// Inner node over `children`.
	pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
		Self {
			name: name.into(),
			value: None,
			children,
		}
	}

	/// Whether the node has no children.
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	/// Own value used when summing: finite and non-negative, otherwise zero.
	pub(super) fn leaf_value(&self) -> f64 {
		match self.value {
			Some(v) if v.is_finite() && v > 0.0 => v,
			_ => 0.0,
		}
	}
}
