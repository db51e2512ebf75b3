//! Backend-neutral drawing surface and its SVG implementation.
//!
//! Views describe what to draw through [`Surface`]; [`SvgWriter`] turns those calls
//! into a standalone SVG document scaled with `preserveAspectRatio="xMidYMid meet"`.

use std::fmt::Write;

use super::theme::Color;
use super::viewport::Frame;

/// Outline style for lines and shape borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	/// Stroke paint.
	pub color: Color,
	/// Stroke width in user units.
	pub width: f64,
}

/// Text appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
	/// Font size in pixels.
	pub font_size: f64,
	/// Bold weight when set.
	pub bold: bool,
	/// Glyph paint.
	pub fill: Color,
	/// Vertical shift in `em` units (SVG `dy`), 0 for none.
	pub dy_em: f64,
}

/// Minimal set of drawing primitives the views need.
pub trait Surface {
	/// Starts a group translated by `(dx, dy)`. Must be balanced with [`Surface::pop_group`].
	fn push_group(&mut self, dx: f64, dy: f64);
	/// Closes the innermost open group.
	fn pop_group(&mut self);
	/// Straight segment between two points.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke);
	/// Filled circle with an optional outline.
	fn circle(&mut self, center: (f64, f64), radius: f64, fill: Color, stroke: Option<Stroke>);
	/// Axis-aligned rectangle from its top-left corner.
	fn rect(&mut self, origin: (f64, f64), size: (f64, f64), fill: Color, stroke: Option<Stroke>);
	/// Escaped text anchored at its start and baseline.
	fn text(&mut self, at: (f64, f64), content: &str, style: TextStyle);
}

/// Writes SVG markup for a [`Frame`]: root `<svg>` plus a margin-translated group.
pub struct SvgWriter {
	out: String,
	depth: usize,
}

impl SvgWriter {
	/// Opens the document and the margin group for `frame`.
	pub fn new(frame: &Frame) -> Self {
		let mut out = String::with_capacity(4096);
		let _ = write!(
			out,
			r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet" style="width: 100%; height: 100%; display: block;">"#,
			num(frame.svg_width),
			num(frame.svg_height)
		);
		let mut writer = Self { out, depth: 0 };
		writer.push_group(frame.margin.left, frame.margin.top);
		writer
	}

	/// Closes any open groups and returns the document.
	pub fn finish(mut self) -> String {
		while self.depth > 0 {
			self.pop_group();
		}
		self.out.push_str("</svg>");
		self.out
	}

	fn paint(&mut self, attr: &str, color: Color) {
		let _ = write!(self.out, r#" {attr}="{}""#, color.to_css_rgb());
		if !color.is_opaque() {
			let _ = write!(self.out, r#" {attr}-opacity="{}""#, num(color.a));
		}
	}

	fn outline(&mut self, stroke: Option<Stroke>) {
		if let Some(s) = stroke {
			self.paint("stroke", s.color);
			let _ = write!(self.out, r#" stroke-width="{}""#, num(s.width));
		}
	}
}

impl Surface for SvgWriter {
	fn push_group(&mut self, dx: f64, dy: f64) {
		self.depth += 1;
		if dx == 0.0 && dy == 0.0 {
			self.out.push_str("<g>");
		} else {
			let _ = write!(self.out, r#"<g transform="translate({},{})">"#, num(dx), num(dy));
		}
	}

	fn pop_group(&mut self) {
		if self.depth > 0 {
			self.depth -= 1;
			self.out.push_str("</g>");
		}
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
		let _ = write!(
			self.out,
			r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
			num(from.0),
			num(from.1),
			num(to.0),
			num(to.1)
		);
		self.outline(Some(stroke));
		self.out.push_str("/>");
	}

	fn circle(&mut self, center: (f64, f64), radius: f64, fill: Color, stroke: Option<Stroke>) {
		let _ = write!(
			self.out,
			r#"<circle cx="{}" cy="{}" r="{}""#,
			num(center.0),
			num(center.1),
			num(radius.max(0.0))
		);
		self.paint("fill", fill);
		self.outline(stroke);
		self.out.push_str("/>");
	}

	fn rect(&mut self, origin: (f64, f64), size: (f64, f64), fill: Color, stroke: Option<Stroke>) {
		let _ = write!(
			self.out,
			r#"<rect x="{}" y="{}" width="{}" height="{}""#,
			num(origin.0),
			num(origin.1),
			num(size.0.max(0.0)),
			num(size.1.max(0.0))
		);
		self.paint("fill", fill);
		self.outline(stroke);
		self.out.push_str("/>");
	}

	fn text(&mut self, at: (f64, f64), content: &str, style: TextStyle) {
		let _ = write!(
			self.out,
			r#"<text x="{}" y="{}" font-size="{}""#,
			num(at.0),
			num(at.1),
			num(style.font_size)
		);
		if style.dy_em != 0.0 {
			let _ = write!(self.out, r#" dy="{}em""#, num(style.dy_em));
		}
		if style.bold {
			self.out.push_str(r#" font-weight="bold""#);
		}
		self.paint("fill", style.fill);
		self.out.push_str(r#" pointer-events="none">"#);
		escape_into(&mut self.out, content);
		self.out.push_str("</text>");
	}
}

/// Formats a coordinate compactly. Non-finite values are written as 0 so a bad
/// number never produces unparsable markup.
fn num(v: f64) -> String {
	if !v.is_finite() {
		return "0".to_string();
	}
	let s = format!("{:.2}", v);
	let s = s.trim_end_matches('0').trim_end_matches('.');
	if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_into(out: &mut String, text: &str) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
}
