//! Node dragging: pins the grabbed node under the pointer and reheats the layout.

use log::debug;

use super::simulation::Simulation;

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
struct ActiveDrag {
	node: usize,
	start_x: f64,
	start_y: f64,
	node_start_x: f64,
	node_start_y: f64,
}

/// Pointer handlers bound to one simulation.
///
/// `start` pins the node where it is and raises `alpha_target` so the rest of the
/// graph resettles; `drag` moves the pin with the pointer; `end` clears the pin and
/// lets the simulation cool down again.
#[derive(Clone, Debug)]
pub struct DragBehavior {
	alpha_target: f64,
	active: Option<ActiveDrag>,
}

impl DragBehavior {
	pub fn new(alpha_target: f64) -> Self {
		Self {
			alpha_target,
			active: None,
		}
	}

	/// Index of the node being dragged, if any.
	pub fn active_node(&self) -> Option<usize> {
		self.active.as_ref().map(|d| d.node)
	}

	pub fn start(&mut self, sim: &mut Simulation, node: usize, pointer: (f64, f64)) {
		let Some(p) = sim.particles.get(node) else {
			return;
		};
		let (x, y) = (p.x, p.y);
		if self.active.is_none() {
			sim.set_alpha_target(self.alpha_target);
			sim.restart();
		}
		sim.pin(node, x, y);
		self.active = Some(ActiveDrag {
			node,
			start_x: pointer.0,
			start_y: pointer.1,
			node_start_x: x,
			node_start_y: y,
		});
		debug!("graph: drag started on node {node}");
	}

	pub fn drag(&mut self, sim: &mut Simulation, pointer: (f64, f64)) {
		if let Some(d) = &self.active {
			let (nx, ny) = (
				d.node_start_x + (pointer.0 - d.start_x),
				d.node_start_y + (pointer.1 - d.start_y),
			);
			sim.pin(d.node, nx, ny);
		}
	}

	pub fn end(&mut self, sim: &mut Simulation) {
		if let Some(d) = self.active.take() {
			sim.set_alpha_target(0.0);
			sim.unpin(d.node);
			debug!("graph: drag ended on node {}", d.node);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::simulation::SimulationConfig;

	#[test]
	fn drag_moves_pin_by_pointer_delta() {
		let config = SimulationConfig::default();
		let mut sim = Simulation::new(3, &config);
		sim.tick_n(config.initial_ticks);
		let origin = (sim.particles[2].x, sim.particles[2].y);

		let mut drag = DragBehavior::new(config.drag_alpha_target);
		drag.start(&mut sim, 2, (100.0, 100.0));
		assert_eq!(drag.active_node(), Some(2));
		assert!(sim.is_running());
		assert_eq!(sim.alpha_target(), 0.3);

		drag.drag(&mut sim, (110.0, 95.0));
		assert_eq!(sim.particles[2].fx, Some(origin.0 + 10.0));
		assert_eq!(sim.particles[2].fy, Some(origin.1 - 5.0));

		drag.end(&mut sim);
		assert_eq!(drag.active_node(), None);
		assert_eq!(sim.particles[2].fx, None);
		assert_eq!(sim.alpha_target(), 0.0);
	}

	#[test]
	fn out_of_range_node_is_ignored() {
		let config = SimulationConfig::default();
		let mut sim = Simulation::new(1, &config);
		sim.tick_n(config.initial_ticks);
		let mut drag = DragBehavior::new(0.3);
		drag.start(&mut sim, 7, (0.0, 0.0));
		assert_eq!(drag.active_node(), None);
		assert!(!sim.is_running());
		drag.end(&mut sim);
	}
}
