//! UI components and the drawing primitives they share.

pub mod force_graph;
pub mod overlay;
pub mod scale;
pub mod surface;
pub mod theme;
pub mod treemap;
pub mod viewport;
