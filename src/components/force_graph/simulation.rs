//! Velocity-Verlet style force simulation with simulated-annealing cooling.
//!
//! Each tick, `alpha` moves toward `alpha_target` by `alpha_decay`, every force
//! accumulates into particle velocities scaled by `alpha`, then velocities are damped
//! and integrated into positions. Pinned particles (`fx`/`fy`) hold their position.
//!
//! The simulation can be advanced two ways:
//! - [`Simulation::tick_n`] runs a fixed budget synchronously, used for the initial
//!   layout before first paint.
//! - [`Simulation::step`] is the per-frame entry point; it only ticks while the
//!   simulation is running and stops once `alpha` drops below `alpha_min`.

use std::f64::consts::PI;

use super::forces::Force;

/// Tuning knobs for the graph layout.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	/// Ticks run synchronously before the first render.
	pub initial_ticks: usize,
	/// Below this `alpha` a running simulation stops.
	pub alpha_min: f64,
	/// Per-tick fraction by which `alpha` approaches its target.
	pub alpha_decay: f64,
	/// Fraction of velocity removed each tick.
	pub velocity_decay: f64,
	/// `alpha_target` while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Rest distance of a link is `link_distance / link.value`.
	pub link_distance: f64,
	/// Rest distance for links whose value is zero, negative, or non-finite.
	pub fallback_link_distance: f64,
	/// Many-body strength per node; negative repels.
	pub charge_strength: f64,
	/// Barnes–Hut accuracy: a cell is approximated when its width over distance is below this.
	pub theta: f64,
	/// Distances below this are clamped in the many-body force.
	pub charge_distance_min: f64,
	/// Pull toward the vertical center.
	pub y_strength: f64,
	/// Extra clearance added to each node's radius for collision.
	pub collide_padding: f64,
	/// Fraction of an overlap resolved per tick.
	pub collide_strength: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			initial_ticks: 3000,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			link_distance: 20.0,
			fallback_link_distance: 30.0,
			charge_strength: -30.0,
			theta: 0.9,
			charge_distance_min: 1.0,
			y_strength: 0.02,
			collide_padding: 20.0,
			collide_strength: 1.0,
		}
	}
}

impl SimulationConfig {
	/// Rest distance for a link of weight `value`.
	pub fn link_rest_distance(&self, value: f64) -> f64 {
		if value.is_finite() && value > 0.0 {
			self.link_distance / value
		} else {
			self.fallback_link_distance
		}
	}
}

/// Position, velocity, and optional pin of one simulated node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned x; the particle stays here and its x velocity is zeroed.
	pub fx: Option<f64>,
	/// Pinned y.
	pub fy: Option<f64>,
}

/// Deterministic linear congruential generator for symmetry-breaking jitter.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: u64,
}

impl Default for Lcg {
	fn default() -> Self {
		Self { state: 1 }
	}
}

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = (Self::A * self.state + Self::C) % Self::M;
		self.state as f64 / Self::M as f64
	}

	/// A tiny random offset used to separate coincident points.
	pub fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

/// An owned force simulation over `particles`.
#[derive(Clone, Debug)]
pub struct Simulation {
	pub particles: Vec<Particle>,
	forces: Vec<Force>,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	running: bool,
	rng: Lcg,
}

impl Simulation {
	/// Creates `count` particles in a phyllotaxis spiral around the origin.
	pub fn new(count: usize, config: &SimulationConfig) -> Self {
		const INITIAL_RADIUS: f64 = 10.0;
		let initial_angle = PI * (3.0 - 5f64.sqrt());
		let particles = (0..count)
			.map(|i| {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				Particle {
					x: radius * angle.cos(),
					y: radius * angle.sin(),
					..Particle::default()
				}
			})
			.collect();
		Self {
			particles,
			forces: Vec::new(),
			alpha: 1.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			alpha_target: 0.0,
			velocity_decay: config.velocity_decay,
			running: true,
			rng: Lcg::default(),
		}
	}

	/// Appends a force; forces apply in insertion order.
	pub fn with_force(mut self, force: Force) -> Self {
		self.forces.push(force);
		self
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	#[cfg(test)]
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Re-arms a stopped simulation so [`Simulation::step`] ticks again.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Advances one iteration regardless of the running state.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		for force in &self.forces {
			force.apply(&mut self.particles, self.alpha, &mut self.rng);
		}

		let keep = 1.0 - self.velocity_decay;
		for p in &mut self.particles {
			match p.fx {
				Some(fx) => {
					p.x = fx;
					p.vx = 0.0;
				}
				None => {
					p.vx *= keep;
					p.x += p.vx;
				}
			}
			match p.fy {
				Some(fy) => {
					p.y = fy;
					p.vy = 0.0;
				}
				None => {
					p.vy *= keep;
					p.y += p.vy;
				}
			}
		}
	}

	/// Runs a fixed iteration budget, then stops if cooled.
	pub fn tick_n(&mut self, iterations: usize) {
		for _ in 0..iterations {
			self.tick();
		}
		if self.alpha < self.alpha_min {
			self.running = false;
		}
	}

	/// Per-frame advance. Returns whether a tick happened.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		true
	}

	/// Fixes particle `index` at `(x, y)` until [`Simulation::unpin`].
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(p) = self.particles.get_mut(index) {
			p.fx = Some(x);
			p.fy = Some(y);
		}
	}

	pub fn unpin(&mut self, index: usize) {
		if let Some(p) = self.particles.get_mut(index) {
			p.fx = None;
			p.fy = None;
		}
	}
}
