//! Force-directed graph visualization component.
//!
//! Renders an interactive node-link graph as SVG with:
//! - Physics-based node positioning (link, many-body, centering, vertical and
//!   collision forces) laid out before first paint
//! - Node dragging that pins the node and reheats the layout
//! - Hover tooltips and a color legend
//! - Value-driven node radii and edge widths
//!
//! # Example
//!
//! ```ignore
//! use graph_treemap::{ForceGraphView, RawGraph, RawLink, RawNode};
//!
//! let data = RawGraph {
//!     nodes: vec![
//!         RawNode { name: "a".into(), value: Some(3.0) },
//!         RawNode { name: "b".into(), value: Some(1.0) },
//!     ],
//!     links: vec![RawLink { source: "a".into(), target: "b".into(), value: 2.0 }],
//! };
//!
//! view! { <ForceGraphView data=Signal::stored(data) /> }
//! ```

mod component;
mod drag;
mod forces;
mod quadtree;
mod render;
mod simulation;
mod state;
mod types;

pub use component::ForceGraphView;
pub use simulation::SimulationConfig;
pub use types::{RawGraph, RawLink, RawNode};
