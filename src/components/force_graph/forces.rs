//! Individual forces of the layout simulation.
//!
//! Each force reads particle positions and accumulates into velocities (or, for
//! centering, shifts positions directly). Forces are applied in the order they were
//! added to the [`Simulation`](super::simulation::Simulation).

use super::quadtree::QuadNode;
use super::simulation::{Lcg, Particle};

/// One composable force.
#[derive(Clone, Debug)]
pub enum Force {
	Link(LinkForce),
	ManyBody(ManyBodyForce),
	Center(CenterForce),
	Y(YForce),
	Collide(CollideForce),
}

impl Force {
	pub(super) fn apply(&self, particles: &mut [Particle], alpha: f64, rng: &mut Lcg) {
		match self {
			Force::Link(f) => f.apply(particles, alpha, rng),
			Force::ManyBody(f) => f.apply(particles, alpha, rng),
			Force::Center(f) => f.apply(particles),
			Force::Y(f) => f.apply(particles, alpha),
			Force::Collide(f) => f.apply(particles, rng),
		}
	}
}

#[derive(Clone, Debug)]
struct Spring {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	/// Share of the correction applied to the target; the rest goes to the source.
	bias: f64,
}

/// Spring force pulling linked particles toward a per-link rest distance.
///
/// Strength defaults to `1 / min(degree(source), degree(target))` so hubs are not
/// yanked around by their many neighbors.
#[derive(Clone, Debug)]
pub struct LinkForce {
	springs: Vec<Spring>,
}

impl LinkForce {
	/// `links` are `(source, target, rest_distance)`; indices outside `0..count` are skipped.
	pub fn new(count: usize, links: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
		let links: Vec<_> = links
			.into_iter()
			.filter(|&(s, t, _)| s < count && t < count)
			.collect();
		let mut degree = vec![0usize; count];
		for &(s, t, _) in &links {
			degree[s] += 1;
			degree[t] += 1;
		}
		let springs = links
			.into_iter()
			.map(|(source, target, distance)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Spring {
					source,
					target,
					distance,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();
		Self { springs }
	}

	#[cfg(test)]
	fn len(&self) -> usize {
		self.springs.len()
	}

	fn apply(&self, p: &mut [Particle], alpha: f64, rng: &mut Lcg) {
		for s in &self.springs {
			let (src, tgt) = (&p[s.source], &p[s.target]);
			let mut x = tgt.x + tgt.vx - src.x - src.vx;
			let mut y = tgt.y + tgt.vy - src.y - src.vy;
			if x == 0.0 {
				x = rng.jiggle();
			}
			if y == 0.0 {
				y = rng.jiggle();
			}
			let l = (x * x + y * y).sqrt();
			let k = (l - s.distance) / l * alpha * s.strength;
			x *= k;
			y *= k;
			p[s.target].vx -= x * s.bias;
			p[s.target].vy -= y * s.bias;
			p[s.source].vx += x * (1.0 - s.bias);
			p[s.source].vy += y * (1.0 - s.bias);
		}
	}
}

/// Pairwise charge between all particles, approximated with a quadtree.
#[derive(Clone, Debug)]
pub struct ManyBodyForce {
	/// Negative repels, positive attracts.
	pub strength: f64,
	/// Barnes–Hut accuracy: cells with `side / distance < theta` are treated as one body.
	pub theta: f64,
	/// Distances below this are clamped to avoid blow-ups at close range.
	pub distance_min: f64,
}

impl ManyBodyForce {
	fn apply(&self, p: &mut [Particle], alpha: f64, rng: &mut Lcg) {
		if p.len() < 2 {
			return;
		}
		let points: Vec<(f64, f64)> = p.iter().map(|q| (q.x, q.y)).collect();
		let charges = vec![self.strength; p.len()];
		let Some(tree) = QuadNode::build(&points, &charges) else {
			return;
		};
		let params = Charge {
			points: &points,
			charges: &charges,
			theta2: self.theta * self.theta,
			distance_min2: self.distance_min * self.distance_min,
			alpha,
		};
		for (i, particle) in p.iter_mut().enumerate() {
			let (dvx, dvy) = params.accumulate(&tree, i, rng);
			particle.vx += dvx;
			particle.vy += dvy;
		}
	}
}

struct Charge<'a> {
	points: &'a [(f64, f64)],
	charges: &'a [f64],
	theta2: f64,
	distance_min2: f64,
	alpha: f64,
}

impl Charge<'_> {
	fn accumulate(&self, node: &QuadNode, i: usize, rng: &mut Lcg) -> (f64, f64) {
		if node.charge == 0.0 {
			return (0.0, 0.0);
		}
		let (px, py) = self.points[i];

		if node.is_leaf() {
			let mut acc = (0.0, 0.0);
			for &j in &node.indices {
				if j == i {
					continue;
				}
				let (x, y) = (self.points[j].0 - px, self.points[j].1 - py);
				let (dx, dy) = self.pull(x, y, self.charges[j], rng);
				acc.0 += dx;
				acc.1 += dy;
			}
			return acc;
		}

		let (x, y) = (node.cx - px, node.cy - py);
		let side = node.bounds.side();
		if !node.bounds.contains(px, py) && side * side / self.theta2 < x * x + y * y {
			return self.pull(x, y, node.charge, rng);
		}

		let mut acc = (0.0, 0.0);
		for child in node.children.iter().flatten() {
			let (dx, dy) = self.accumulate(child, i, rng);
			acc.0 += dx;
			acc.1 += dy;
		}
		acc
	}

	/// Velocity change from a body of `charge` at offset `(x, y)`.
	fn pull(&self, mut x: f64, mut y: f64, charge: f64, rng: &mut Lcg) -> (f64, f64) {
		let mut l = x * x + y * y;
		if x == 0.0 {
			x = rng.jiggle();
			l += x * x;
		}
		if y == 0.0 {
			y = rng.jiggle();
			l += y * y;
		}
		if l < self.distance_min2 {
			l = (self.distance_min2 * l).sqrt();
		}
		let w = charge * self.alpha / l;
		(x * w, y * w)
	}
}

/// Translates all particles so their mean sits on `(x, y)`.
#[derive(Clone, Debug)]
pub struct CenterForce {
	pub x: f64,
	pub y: f64,
	pub strength: f64,
}

impl CenterForce {
	fn apply(&self, p: &mut [Particle]) {
		if p.is_empty() {
			return;
		}
		let n = p.len() as f64;
		let (sx, sy) = p.iter().fold((0.0, 0.0), |(sx, sy), q| (sx + q.x, sy + q.y));
		let dx = (sx / n - self.x) * self.strength;
		let dy = (sy / n - self.y) * self.strength;
		for q in p {
			q.x -= dx;
			q.y -= dy;
		}
	}
}

/// Weak spring toward a horizontal line at `y`.
#[derive(Clone, Debug)]
pub struct YForce {
	pub y: f64,
	pub strength: f64,
}

impl YForce {
	fn apply(&self, p: &mut [Particle], alpha: f64) {
		for q in p {
			q.vy += (self.y - q.y) * self.strength * alpha;
		}
	}
}

/// Keeps circles of the given radii from overlapping.
///
/// Candidate pairs come from a quadtree over the particles' next positions, so each
/// particle only visits cells within its radius plus the largest radius in the cell.
#[derive(Clone, Debug)]
pub struct CollideForce {
	pub radii: Vec<f64>,
	pub strength: f64,
}

impl CollideForce {
	fn apply(&self, p: &mut [Particle], rng: &mut Lcg) {
		let n = p.len().min(self.radii.len());
		if n < 2 {
			return;
		}
		let points: Vec<(f64, f64)> = p[..n].iter().map(|q| (q.x + q.vx, q.y + q.vy)).collect();
		let Some(tree) = QuadNode::build(&points, &self.radii[..n]) else {
			return;
		};
		let mut candidates = Vec::new();
		for i in 0..n {
			let (xi, yi) = points[i];
			candidates.clear();
			tree.near(xi, yi, self.radii[i], &mut candidates);
			for &j in &candidates {
				// Each pair once, from its lower index.
				if j > i {
					self.separate(p, i, j, (xi, yi), rng);
				}
			}
		}
	}

	fn separate(&self, p: &mut [Particle], i: usize, j: usize, (xi, yi): (f64, f64), rng: &mut Lcg) {
		let (ri, rj) = (self.radii[i], self.radii[j]);
		let r = ri + rj;
		let mut x = xi - (p[j].x + p[j].vx);
		let mut y = yi - (p[j].y + p[j].vy);
		let mut l = x * x + y * y;
		if l >= r * r {
			return;
		}
		if x == 0.0 {
			x = rng.jiggle();
			l += x * x;
		}
		if y == 0.0 {
			y = rng.jiggle();
			l += y * y;
		}
		let d = l.sqrt();
		let k = (r - d) / d * self.strength;
		x *= k;
		y *= k;
		let (ri2, rj2) = (ri * ri, rj * rj);
		let share = if ri2 + rj2 > 0.0 { rj2 / (ri2 + rj2) } else { 0.5 };
		p[i].vx += x * share;
		p[i].vy += y * share;
		p[j].vx -= x * (1.0 - share);
		p[j].vy -= y * (1.0 - share);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			..Particle::default()
		}
	}

	#[test]
	fn link_pulls_distant_pair_together() {
		let mut p = vec![at(0.0, 0.0), at(100.0, 0.0)];
		let force = LinkForce::new(2, [(0, 1, 10.0)]);
		force.apply(&mut p, 1.0, &mut Lcg::default());
		assert!(p[0].vx > 0.0);
		assert!(p[1].vx < 0.0);
		// Equal degrees split the correction evenly.
		assert!((p[0].vx + p[1].vx).abs() < 1e-9);
	}

	#[test]
	fn link_strength_follows_lower_degree() {
		let force = LinkForce::new(4, [(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0), (9, 0, 1.0)]);
		assert_eq!(force.len(), 3);
		assert!(force.springs.iter().all(|s| s.strength == 1.0));
		assert!(force.springs.iter().all(|s| (s.bias - 0.75).abs() < 1e-12));
	}

	#[test]
	fn many_body_repels() {
		let mut p = vec![at(0.0, 0.0), at(10.0, 0.0)];
		let force = ManyBodyForce {
			strength: -30.0,
			theta: 0.9,
			distance_min: 1.0,
		};
		force.apply(&mut p, 1.0, &mut Lcg::default());
		assert!((p[0].vx - (-3.0)).abs() < 1e-9);
		assert!((p[1].vx - 3.0).abs() < 1e-9);
	}

	#[test]
	fn many_body_separates_coincident_points() {
		let mut p = vec![at(5.0, 5.0), at(5.0, 5.0)];
		let force = ManyBodyForce {
			strength: -30.0,
			theta: 0.9,
			distance_min: 1.0,
		};
		force.apply(&mut p, 1.0, &mut Lcg::default());
		assert!(p.iter().all(|q| q.vx.is_finite() && q.vy.is_finite()));
		assert!(p[0].vx != 0.0 || p[0].vy != 0.0);
	}

	#[test]
	fn center_moves_mean_onto_target() {
		let mut p = vec![at(0.0, 0.0), at(10.0, 20.0)];
		CenterForce {
			x: 100.0,
			y: 50.0,
			strength: 1.0,
		}
		.apply(&mut p);
		let mean_x = (p[0].x + p[1].x) / 2.0;
		let mean_y = (p[0].y + p[1].y) / 2.0;
		assert!((mean_x - 100.0).abs() < 1e-9);
		assert!((mean_y - 50.0).abs() < 1e-9);
	}

	#[test]
	fn y_force_nudges_toward_line() {
		let mut p = vec![at(0.0, 0.0), at(0.0, 200.0)];
		YForce {
			y: 100.0,
			strength: 0.02,
		}
		.apply(&mut p, 1.0);
		assert_eq!(p[0].vy, 2.0);
		assert_eq!(p[1].vy, -2.0);
	}

	#[test]
	fn collide_pushes_overlapping_circles_apart() {
		let mut p = vec![at(0.0, 0.0), at(10.0, 0.0), at(500.0, 0.0)];
		CollideForce {
			radii: vec![10.0, 10.0, 10.0],
			strength: 1.0,
		}
		.apply(&mut p, &mut Lcg::default());
		assert!(p[0].vx < 0.0);
		assert!(p[1].vx > 0.0);
		assert_eq!(p[2].vx, 0.0);
	}

	#[test]
	fn collide_finds_overlaps_across_a_large_spread() {
		// Enough particles to split the tree several levels deep.
		let mut p: Vec<Particle> = (0..200).map(|i| at(i as f64 * 100.0, (i % 7) as f64 * 50.0)).collect();
		p.push(at(19_905.0, (199 % 7) as f64 * 50.0));
		p.push(at(5.0, 0.0));
		let radii = vec![10.0; p.len()];
		CollideForce { radii, strength: 1.0 }.apply(&mut p, &mut Lcg::default());

		let moved: Vec<usize> = (0..p.len()).filter(|&i| p[i].vx != 0.0 || p[i].vy != 0.0).collect();
		assert_eq!(moved, vec![0, 199, 200, 201]);
		assert!(p[0].vx < 0.0 && p[201].vx > 0.0);
		assert!(p[199].vx < 0.0 && p[200].vx > 0.0);
	}

	#[test]
	fn collide_settles_a_dense_cluster() {
		let mut p: Vec<Particle> = (0..150)
			.map(|i| at((i % 15) as f64 * 3.0, (i / 15) as f64 * 3.0))
			.collect();
		let force = CollideForce {
			radii: vec![4.0; p.len()],
			strength: 1.0,
		};
		let mut rng = Lcg::default();
		for _ in 0..300 {
			force.apply(&mut p, &mut rng);
			for q in &mut p {
				q.x += q.vx;
				q.y += q.vy;
				q.vx *= 0.6;
				q.vy *= 0.6;
			}
		}
		let mut worst: f64 = 0.0;
		for i in 0..p.len() {
			for j in (i + 1)..p.len() {
				let d = (p[i].x - p[j].x).hypot(p[i].y - p[j].y);
				worst = worst.max(8.0 - d);
			}
		}
		assert!(worst < 1.0, "deepest overlap {worst}");
	}
}
