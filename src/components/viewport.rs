//! Drawing frame geometry: margins, inner area, and viewBox coordinate mapping.

use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

/// Space reserved around the inner drawing area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
	/// Above the inner area.
	pub top: f64,
	/// Right of the inner area.
	pub right: f64,
	/// Below the inner area.
	pub bottom: f64,
	/// Left of the inner area.
	pub left: f64,
}

impl Margin {
	/// The same margin on every side.
	pub const fn uniform(v: f64) -> Self {
		Self {
			top: v,
			right: v,
			bottom: v,
			left: v,
		}
	}
}

/// Outer SVG dimensions plus margins. The SVG's viewBox is `0 0 svg_width svg_height`
/// and all content is drawn inside a group translated by the left/top margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
	/// Space around the inner area.
	pub margin: Margin,
	/// Outer width, the viewBox width.
	pub svg_width: f64,
	/// Outer height, the viewBox height.
	pub svg_height: f64,
}

impl Frame {
	/// Frame with the given margins and outer size.
	pub fn new(margin: Margin, svg_width: f64, svg_height: f64) -> Self {
		Self {
			margin,
			svg_width,
			svg_height,
		}
	}

	/// Width available for content. Never negative.
	pub fn inner_width(&self) -> f64 {
		(self.svg_width - self.margin.left - self.margin.right).max(0.0)
	}

	/// Height available for content. Never negative.
	pub fn inner_height(&self) -> f64 {
		(self.svg_height - self.margin.top - self.margin.bottom).max(0.0)
	}

	/// ViewBox spanning the whole outer size.
	pub fn view_box(&self) -> ViewBox {
		ViewBox {
			width: self.svg_width,
			height: self.svg_height,
		}
	}

	/// Converts a client-space pointer position into inner (margin-relative)
	/// coordinates, given the bounding rect of the element hosting the SVG.
	pub fn client_to_inner(&self, client: (f64, f64), host: HostRect) -> Option<(f64, f64)> {
		let (vx, vy) = self.view_box().client_to_view(client, host)?;
		Some((vx - self.margin.left, vy - self.margin.top))
	}

	/// Inner coordinates of a mouse event, measured against the element the handler
	/// is attached to.
	pub fn event_to_inner(&self, ev: &MouseEvent) -> Option<(f64, f64)> {
		let host: Element = ev.current_target()?.dyn_into().ok()?;
		let rect = host.get_bounding_client_rect();
		self.client_to_inner(
			(ev.client_x() as f64, ev.client_y() as f64),
			HostRect {
				left: rect.left(),
				top: rect.top(),
				width: rect.width(),
				height: rect.height(),
			},
		)
	}
}

impl Default for Frame {
	fn default() -> Self {
		Self::new(Margin::uniform(20.0), 960.0, 600.0)
	}
}

/// On-screen rectangle of the element the SVG is scaled into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostRect {
	/// Client-space x of the left edge.
	pub left: f64,
	/// Client-space y of the top edge.
	pub top: f64,
	/// Rendered width.
	pub width: f64,
	/// Rendered height.
	pub height: f64,
}

/// A `0 0 width height` viewBox rendered with `preserveAspectRatio="xMidYMid meet"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	/// User-space width.
	pub width: f64,
	/// User-space height.
	pub height: f64,
}

impl ViewBox {
	/// Uniform scale and centering offset that `meet` applies inside `host`.
	fn fit(&self, host: HostRect) -> Option<(f64, f64, f64)> {
		if self.width <= 0.0 || self.height <= 0.0 || host.width <= 0.0 || host.height <= 0.0 {
			return None;
		}
		let k = (host.width / self.width).min(host.height / self.height);
		let ox = (host.width - self.width * k) / 2.0;
		let oy = (host.height - self.height * k) / 2.0;
		Some((k, ox, oy))
	}

	/// Maps a client-space point into viewBox coordinates.
	pub fn client_to_view(&self, client: (f64, f64), host: HostRect) -> Option<(f64, f64)> {
		let (k, ox, oy) = self.fit(host)?;
		Some((
			(client.0 - host.left - ox) / k,
			(client.1 - host.top - oy) / k,
		))
	}
}
