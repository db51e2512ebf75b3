//! Treemap visualization component.
//!
//! Packs a nested, value-weighted tree into nested rectangles with area proportional
//! to value:
//! - Leaf values summed up the tree, siblings sorted by descending value
//! - Squarified (or slice-and-dice) tiling with uniform padding
//! - Cells colored by top-level group, labeled with name and share of the total
//! - Click-to-select and hover highlighting
//!
//! # Example
//!
//! ```ignore
//! use graph_treemap::{TreeNode, TreemapView};
//!
//! let tree = TreeNode::branch("root", vec![TreeNode::leaf("a", 70.0), TreeNode::leaf("b", 30.0)]);
//! let selected = RwSignal::new(None::<String>);
//!
//! view! {
//!     <TreemapView
//!         tree=Signal::stored(tree)
//!         selected_cell=selected
//!         on_select=move |name| selected.set(Some(name))
//!     />
//! }
//! ```

mod component;
mod hierarchy;
mod label;
mod layout;
mod render;
mod state;
mod types;

pub use component::TreemapView;
pub use layout::Tile;
pub use types::TreeNode;
