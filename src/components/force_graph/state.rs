//! Graph view state: derived data, visual scales, and the owned layout simulation.
//!
//! Created once per dataset, laid out synchronously before first paint, then mutated
//! by the animation loop and pointer handlers while the view is mounted.

use log::info;

use super::drag::DragBehavior;
use super::forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce, YForce};
use super::simulation::{Simulation, SimulationConfig};
use super::types::{Edge, Node, RawGraph, get_links, get_nodes};
use crate::components::scale::{LinearScale, OrdinalScale};
use crate::components::theme::{Color, GraphStyle};
use crate::components::viewport::Frame;

/// Value-derived encodings, rebuilt whenever the data changes.
#[derive(Clone, Debug)]
pub struct GraphScales {
	/// Link value to stroke width.
	pub edge_width: LinearScale,
	/// Node value to circle radius. Also sizes collision.
	pub node_radius: LinearScale,
	/// Node name to fill color, in legend order.
	pub node_color: OrdinalScale,
}

impl GraphScales {
	/// Fits every scale to the current nodes and edges.
	pub fn new(nodes: &[Node], edges: &[Edge], style: &GraphStyle) -> Self {
		Self {
			edge_width: LinearScale::from_values(edges.iter().map(|e| e.value), style.edge.width_range),
			node_radius: LinearScale::from_values(
				nodes.iter().filter_map(|n| n.value),
				style.node.radius_range,
			),
			node_color: OrdinalScale::new(nodes.iter().map(|n| n.name.as_str()), &style.palette),
		}
	}

	/// Radius for a node; a missing value falls back to the smallest radius.
	pub fn radius(&self, node: &Node) -> f64 {
		match node.value {
			Some(v) => self.node_radius.apply(v),
			None => self.node_radius.range().0,
		}
	}

	/// Stroke width for an edge.
	pub fn width(&self, edge: &Edge) -> f64 {
		self.edge_width.apply(edge.value)
	}

	/// Fill for a node.
	pub fn color(&self, node: &Node) -> Color {
		self.node_color.color(&node.name)
	}
}

/// Core graph state combining the simulation with interaction tracking.
///
/// Node `i` in `nodes` is particle `i` in `simulation`; edges refer to nodes by the
/// same index. Positions are in inner coordinates, so rendering only needs the
/// frame's margin translation.
pub struct ForceGraphState {
	/// Drawing frame the layout is centered in.
	pub frame: Frame,
	/// Derived nodes, in draw order.
	pub nodes: Vec<Node>,
	/// Derived edges, by node index.
	pub edges: Vec<Edge>,
	/// Encodings fitted to this dataset.
	pub scales: GraphScales,
	/// Owned layout.
	pub simulation: Simulation,
	/// Pointer drag in progress, if any.
	pub drag: DragBehavior,
	/// Node under the pointer while not dragging.
	pub hovered: Option<usize>,
	/// Cached `scales.radius` per node.
	radii: Vec<f64>,
}

impl ForceGraphState {
	/// Derives nodes and edges from `data`, builds the scales and forces, and runs
	/// the initial layout budget.
	pub fn new(data: &RawGraph, frame: Frame, config: &SimulationConfig, style: &GraphStyle) -> Self {
		let nodes = get_nodes(data);
		let edges = get_links(data);
		let scales = GraphScales::new(&nodes, &edges, style);
		let radii: Vec<f64> = nodes.iter().map(|n| scales.radius(n)).collect();

		let (w, h) = (frame.inner_width(), frame.inner_height());
		let count = nodes.len();
		let mut simulation = Simulation::new(count, config)
			.with_force(Force::Link(LinkForce::new(
				count,
				edges
					.iter()
					.map(|e| (e.source, e.target, config.link_rest_distance(e.value))),
			)))
			.with_force(Force::ManyBody(ManyBodyForce {
				strength: config.charge_strength,
				theta: config.theta,
				distance_min: config.charge_distance_min,
			}))
			.with_force(Force::Center(CenterForce {
				x: w / 2.0,
				y: h / 2.0,
				strength: 1.0,
			}))
			.with_force(Force::Y(YForce {
				y: h / 2.0,
				strength: config.y_strength,
			}))
			.with_force(Force::Collide(CollideForce {
				radii: radii.iter().map(|r| r + config.collide_padding).collect(),
				strength: config.collide_strength,
			}));
		simulation.tick_n(config.initial_ticks);
		info!(
			"graph: laid out {} nodes, {} links in {} ticks",
			nodes.len(),
			edges.len(),
			config.initial_ticks
		);

		Self {
			frame,
			nodes,
			edges,
			scales,
			simulation,
			drag: DragBehavior::new(config.drag_alpha_target),
			hovered: None,
			radii,
		}
	}

	/// Drawn radius of node `index`.
	pub fn radius(&self, index: usize) -> f64 {
		self.radii.get(index).copied().unwrap_or(self.scales.node_radius.range().0)
	}

	/// Current center of node `index`; the origin for an unknown index.
	pub fn position(&self, index: usize) -> (f64, f64) {
		self.simulation
			.particles
			.get(index)
			.map(|p| (p.x, p.y))
			.unwrap_or_default()
	}

	/// Topmost node whose circle contains the inner-space point `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		(0..self.nodes.len()).rev().find(|&i| {
			let (nx, ny) = self.position(i);
			(nx - x).hypot(ny - y) <= self.radius(i)
		})
	}

	/// Advances the live layout by one frame. Returns whether positions changed.
	pub fn tick(&mut self) -> bool {
		self.simulation.step()
	}

	/// Starts dragging the node under `point`, if any.
	pub fn pointer_down(&mut self, point: (f64, f64)) -> bool {
		let Some(idx) = self.node_at(point.0, point.1) else {
			return false;
		};
		self.drag.start(&mut self.simulation, idx, point);
		true
	}

	/// Moves an active drag, or updates the hovered node. Returns whether the
	/// hovered node changed.
	pub fn pointer_move(&mut self, point: (f64, f64)) -> bool {
		if self.drag.active_node().is_some() {
			self.drag.drag(&mut self.simulation, point);
			return false;
		}
		let hovered = self.node_at(point.0, point.1);
		let changed = hovered != self.hovered;
		self.hovered = hovered;
		changed
	}

	/// Ends a drag and lets the layout cool again.
	pub fn pointer_up(&mut self) {
		self.drag.end(&mut self.simulation);
	}

	/// Ends a drag and clears the hover when the pointer exits the view.
	pub fn pointer_leave(&mut self) {
		self.drag.end(&mut self.simulation);
		self.hovered = None;
	}

	/// Name of the hovered node, for the tooltip.
	pub fn hovered_name(&self) -> Option<&str> {
		self.hovered
			.and_then(|i| self.nodes.get(i))
			.map(|n| n.name.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{RawLink, RawNode};
	use crate::components::viewport::Margin;

	fn star() -> RawGraph {
		let names = ["hub", "a", "b", "c", "d"];
		RawGraph {
			nodes: names
				.iter()
				.enumerate()
				.map(|(i, n)| RawNode {
					name: n.to_string(),
					value: Some(1.0 + i as f64),
				})
				.collect(),
			links: names[1..]
				.iter()
				.enumerate()
				.map(|(i, n)| RawLink {
					source: "hub".into(),
					target: n.to_string(),
					value: 1.0 + i as f64,
				})
				.collect(),
		}
	}

	fn frame() -> Frame {
		Frame::new(Margin::uniform(20.0), 840.0, 640.0)
	}

	fn state(data: &RawGraph) -> ForceGraphState {
		ForceGraphState::new(data, frame(), &SimulationConfig::default(), &GraphStyle::default())
	}

	#[test]
	fn layout_settles_near_center_without_overlap() {
		let s = state(&star());
		assert!(!s.simulation.is_running());
		let n = s.nodes.len() as f64;
		let mean_x = (0..s.nodes.len()).map(|i| s.position(i).0).sum::<f64>() / n;
		let mean_y = (0..s.nodes.len()).map(|i| s.position(i).1).sum::<f64>() / n;
		assert!((mean_x - 400.0).abs() < 1.0);
		assert!((mean_y - 300.0).abs() < 1.0);
		for i in 0..s.nodes.len() {
			for j in (i + 1)..s.nodes.len() {
				let (a, b) = (s.position(i), s.position(j));
				let d = (a.0 - b.0).hypot(a.1 - b.1);
				assert!(d > s.radius(i) + s.radius(j), "nodes {i} and {j} overlap");
			}
		}
	}

	#[test]
	fn missing_value_falls_back_to_minimum_radius() {
		let mut data = star();
		data.nodes[2].value = None;
		data.links.push(RawLink {
			source: "a".into(),
			target: "ghost".into(),
			value: 1.0,
		});
		let s = state(&data);
		assert_eq!(s.radius(2), 10.0);
		assert_eq!(s.radius(5), 10.0);
		assert!(s.simulation.particles.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
	}

	#[test]
	fn empty_graph_is_valid() {
		let s = state(&RawGraph::default());
		assert!(s.nodes.is_empty());
		assert!(s.edges.is_empty());
		assert_eq!(s.node_at(0.0, 0.0), None);
	}

	#[test]
	fn drag_pins_only_while_held_and_reheats() {
		let mut s = state(&star());
		let (hx, hy) = s.position(0);
		assert!(s.pointer_down((hx, hy)));
		let target = (hx + 150.0, hy - 80.0);
		s.pointer_move(target);

		let before: Vec<(f64, f64)> = (1..s.nodes.len()).map(|i| s.position(i)).collect();
		for _ in 0..30 {
			assert!(s.tick());
		}
		let (px, py) = s.position(0);
		assert!((px - target.0).abs() < 1e-9 && (py - target.1).abs() < 1e-9);
		let after: Vec<(f64, f64)> = (1..s.nodes.len()).map(|i| s.position(i)).collect();
		assert!(before.iter().zip(&after).any(|(a, b)| a != b));

		s.pointer_up();
		assert_eq!(s.simulation.particles[0].fx, None);
		assert!(s.simulation.is_running());
		let released = s.position(0);
		for _ in 0..30 {
			s.tick();
		}
		assert_ne!(s.position(0), released);
	}

	#[test]
	fn hover_tracks_node_under_pointer() {
		let mut s = state(&star());
		let (x, y) = s.position(3);
		assert!(s.pointer_move((x, y)));
		assert_eq!(s.hovered_name(), Some("c"));
		assert!(!s.pointer_move((x + 0.5, y)));
		assert!(s.pointer_move((-1000.0, -1000.0)));
		assert_eq!(s.hovered_name(), None);
	}
}
