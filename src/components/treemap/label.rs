//! Cell label fitting: font size from cell height, truncation from cell width.

use crate::components::theme::LabelStyle;

/// Font size for a cell of the given height, bounded by the style's limits.
pub fn font_size(height: f64, style: &LabelStyle) -> f64 {
	style.font_min.max(style.font_max.min(height / 4.0))
}

/// How many characters fit across `width` at `font_size`.
pub fn max_chars(width: f64, font_size: f64, style: &LabelStyle) -> usize {
	let n = (width / (font_size * style.char_width)).floor();
	if n.is_finite() && n > 0.0 { n as usize } else { 0 }
}

/// Shortens `text` to at most `max` characters, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
	out.push('…');
	out
}

/// Share of `total` as a one-decimal percentage, or empty when either is zero.
pub fn percent(value: f64, total: f64) -> String {
	if value > 0.0 && total > 0.0 {
		format!("{:.1}%", value / total * 100.0)
	} else {
		String::new()
	}
}

/// The two label lines of a cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLabel {
	pub name: String,
	pub share: String,
	pub font_size: f64,
}

impl CellLabel {
	/// Fits a label into a `width` × `height` cell, or `None` when the cell is too
	/// small to carry one.
	pub fn fit(width: f64, height: f64, name: &str, share: &str, style: &LabelStyle) -> Option<Self> {
		if !(width > style.min_width && height > style.min_height) {
			return None;
		}
		let font_size = font_size(height, style);
		let max = max_chars(width, font_size, style);
		Some(Self {
			name: truncate(name, max),
			share: truncate(share, max),
			font_size,
		})
	}

	/// Vertical offset of the second line below the first.
	pub fn line_gap(&self) -> f64 {
		self.font_size + 2.0
	}

	pub fn share_font_size(&self) -> f64 {
		self.font_size - 2.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::theme::TreemapStyle;
	use pretty_assertions::assert_eq;

	fn style() -> LabelStyle {
		TreemapStyle::default().label
	}

	#[test]
	fn font_size_is_clamped() {
		let s = style();
		assert_eq!(font_size(20.0, &s), 10.0);
		assert_eq!(font_size(48.0, &s), 12.0);
		assert_eq!(font_size(400.0, &s), 14.0);
	}

	#[test]
	fn truncation_keeps_short_names_and_marks_cuts() {
		assert_eq!(truncate("short", 5), "short");
		assert_eq!(truncate("longer-name", 5), "long…");
		assert_eq!(truncate("héllo wörld", 4), "hél…");
	}

	#[test]
	fn percent_formats_one_decimal() {
		assert_eq!(percent(30.0, 100.0), "30.0%");
		assert_eq!(percent(1.0, 3.0), "33.3%");
		assert_eq!(percent(0.0, 100.0), "");
		assert_eq!(percent(5.0, 0.0), "");
	}

	#[test]
	fn small_cells_get_no_label() {
		let s = style();
		assert_eq!(CellLabel::fit(30.0, 100.0, "a", "", &s), None);
		assert_eq!(CellLabel::fit(100.0, 20.0, "a", "", &s), None);
	}

	#[test]
	fn fitted_label_truncates_both_lines() {
		// 60 wide at font 10 fits floor(60 / 6) = 10 characters.
		let label = CellLabel::fit(60.0, 30.0, "a-very-long-package", "12.5%", &style()).unwrap();
		assert_eq!(label.font_size, 10.0);
		assert_eq!(label.name, "a-very-lo…");
		assert_eq!(label.share, "12.5%");
		assert_eq!(label.line_gap(), 12.0);
		assert_eq!(label.share_font_size(), 8.0);
	}
}
