//! Data-to-visual scales.
//!
//! Two kinds of mapping drive every visual encoding in this crate:
//!
//! - [`LinearScale`]: continuous interpolation from a value domain onto an output
//!   range, used for edge widths and node radii.
//! - [`OrdinalScale`]: discrete assignment of palette colors to string keys, used for
//!   node colors, legend swatches, and treemap groups.
//!
//! Both are rebuilt whenever the underlying dataset changes.

use std::collections::BTreeMap;

use super::theme::{Color, Palette};

/// Linear mapping from `domain` onto `range`.
///
/// A degenerate domain (`min == max`), or an empty one, maps every input to the
/// midpoint of the range so callers never see NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
	domain: Option<(f64, f64)>,
	range: (f64, f64),
}

impl LinearScale {
	/// Scale over an explicit domain.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			domain: Some(domain),
			range,
		}
	}

	/// Builds a scale whose domain is the extent of the finite values in `values`.
	pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
		Self {
			domain: extent(values),
			range,
		}
	}

	/// Input extent, `None` when built from no finite values.
	pub fn domain(&self) -> Option<(f64, f64)> {
		self.domain
	}

	/// Output extent.
	pub fn range(&self) -> (f64, f64) {
		self.range
	}

	/// Maps `value` through the scale. Non-finite input yields the range midpoint.
	pub fn apply(&self, value: f64) -> f64 {
		let (r0, r1) = self.range;
		let t = match self.domain {
			Some((d0, d1)) if d1 != d0 && value.is_finite() => (value - d0) / (d1 - d0),
			_ => 0.5,
		};
		r0 + (r1 - r0) * t
	}
}

/// Minimum and maximum of the finite values, or `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
	values
		.into_iter()
		.filter(|v| v.is_finite())
		.fold(None, |acc, v| match acc {
			None => Some((v, v)),
			Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
		})
}

/// Categorical mapping from keys to palette colors.
///
/// Colors are assigned once over the sorted, de-duplicated key set, so assignment
/// does not depend on input order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
	assignments: BTreeMap<String, Color>,
	fallback: Color,
}

impl OrdinalScale {
	/// Assigns `palette` colors to the distinct `keys` in sorted order.
	pub fn new<I, S>(keys: I, palette: &Palette) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let keys: std::collections::BTreeSet<String> = keys.into_iter().map(Into::into).collect();
		let assignments = keys
			.into_iter()
			.enumerate()
			.map(|(i, key)| (key, palette.get(i)))
			.collect();
		Self {
			assignments,
			fallback: palette.get(0),
		}
	}

	/// Color for `key`; unknown keys get the first palette color.
	pub fn color(&self, key: &str) -> Color {
		self.assignments.get(key).copied().unwrap_or(self.fallback)
	}

	/// The sorted key set with assigned colors, in legend order.
	pub fn domain(&self) -> impl Iterator<Item = (&str, Color)> {
		self.assignments.iter().map(|(k, c)| (k.as_str(), *c))
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.assignments.len()
	}

	/// Whether no keys were given.
	pub fn is_empty(&self) -> bool {
		self.assignments.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	#[test]
	fn endpoints_map_to_range_endpoints() {
		let radius = LinearScale::from_values([3.0, 9.0, 5.0], (10.0, 50.0));
		assert_eq!(radius.apply(3.0), 10.0);
		assert_eq!(radius.apply(9.0), 50.0);

		let width = LinearScale::from_values([1.0, 4.0], (2.0, 6.0));
		assert_eq!(width.apply(1.0), 2.0);
		assert_eq!(width.apply(4.0), 6.0);
	}

	#[test]
	fn degenerate_domain_yields_constant_midpoint() {
		let scale = LinearScale::from_values([7.0, 7.0, 7.0], (10.0, 50.0));
		assert_eq!(scale.domain(), Some((7.0, 7.0)));
		assert_eq!(scale.apply(7.0), 30.0);
		assert_eq!(scale.apply(1000.0), 30.0);
	}

	#[test]
	fn empty_and_non_finite_inputs_stay_finite() {
		let scale = LinearScale::from_values([], (2.0, 6.0));
		assert_eq!(scale.domain(), None);
		assert_eq!(scale.apply(1.0), 4.0);

		let scale = LinearScale::from_values([f64::NAN, 2.0, 4.0], (2.0, 6.0));
		assert_eq!(scale.domain(), Some((2.0, 4.0)));
		assert_eq!(scale.apply(f64::NAN), 4.0);
	}

	#[test]
	fn ordinal_assignment_ignores_input_order() {
		let palette = Palette::category10();
		let a = OrdinalScale::new(["zeta", "alpha", "mid", "alpha"], &palette);
		let b = OrdinalScale::new(["mid", "zeta", "alpha"], &palette);
		assert_eq!(a, b);
		assert_eq!(a.len(), 3);
		let keys: Vec<&str> = a.domain().map(|(k, _)| k).collect();
		assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
		assert_eq!(a.color("alpha"), palette.get(0));
		assert_eq!(a.color("zeta"), palette.get(2));
	}

	proptest! {
		#[test]
		fn linear_output_is_finite_and_within_range(
			values in prop::collection::vec(-1e6f64..1e6, 0..20),
			input in -1e6f64..1e6,
		) {
			let scale = LinearScale::from_values(values.iter().copied(), (10.0, 50.0));
			let out = scale.apply(input);
			prop_assert!(out.is_finite());
			for v in values {
				let y = scale.apply(v);
				prop_assert!((10.0 - 1e-9..=50.0 + 1e-9).contains(&y));
			}
		}
	}
}
