//! Scoped overlay elements (tooltips) living outside the SVG.
//!
//! A [`Tooltip`] creates its element lazily on the first `show` and removes it when
//! disposed or dropped, so a view that owns one never leaks elements across
//! mount/unmount cycles.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Pixel offset of the tooltip from the pointer's page position.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -20.0);

/// Backend that owns the actual overlay elements.
pub trait OverlayHost {
	/// Element reference handed back on every call.
	type Handle;

	/// Creates a hidden element. `None` when no host document is available.
	fn create(&mut self) -> Option<Self::Handle>;
	/// Sets the text, places the element at page `(left, top)` and makes it visible.
	fn show(&mut self, handle: &Self::Handle, text: &str, left: f64, top: f64);
	/// Places the element at page `(left, top)`.
	fn move_to(&mut self, handle: &Self::Handle, left: f64, top: f64);
	/// Makes the element invisible without removing it.
	fn hide(&mut self, handle: &Self::Handle);
	/// Detaches the element from the document.
	fn remove(&mut self, handle: Self::Handle);
}

/// A floating label that follows the pointer.
pub struct Tooltip<H: OverlayHost> {
	host: H,
	handle: Option<H::Handle>,
}

impl<H: OverlayHost> Tooltip<H> {
	/// Tooltip that creates nothing until first shown.
	pub fn new(host: H) -> Self {
		Self { host, handle: None }
	}

	/// Whether the element exists.
	pub fn is_created(&self) -> bool {
		self.handle.is_some()
	}

	/// Shows `text` near the page position `(page_x, page_y)`, creating the element
	/// on first use.
	pub fn show(&mut self, text: &str, page_x: f64, page_y: f64) {
		if self.handle.is_none() {
			self.handle = self.host.create();
			if self.handle.is_some() {
				debug!("tooltip: element created");
			}
		}
		if let Some(handle) = &self.handle {
			let (left, top) = offset(page_x, page_y);
			self.host.show(handle, text, left, top);
		}
	}

	/// Follows the pointer; no-op before the first `show`.
	pub fn move_to(&mut self, page_x: f64, page_y: f64) {
		if let Some(handle) = &self.handle {
			let (left, top) = offset(page_x, page_y);
			self.host.move_to(handle, left, top);
		}
	}

	/// Hides the element but keeps it for reuse.
	pub fn hide(&mut self) {
		if let Some(handle) = &self.handle {
			self.host.hide(handle);
		}
	}

	/// Removes the element, if one was created.
	pub fn dispose(&mut self) {
		if let Some(handle) = self.handle.take() {
			self.host.remove(handle);
			debug!("tooltip: element removed");
		}
	}
}

impl<H: OverlayHost> Drop for Tooltip<H> {
	fn drop(&mut self) {
		self.dispose();
	}
}

fn offset(page_x: f64, page_y: f64) -> (f64, f64) {
	(page_x + TOOLTIP_OFFSET.0, page_y + TOOLTIP_OFFSET.1)
}

/// Overlay host backed by absolutely positioned `div`s appended to `<body>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomOverlayHost;

impl OverlayHost for DomOverlayHost {
	type Handle = HtmlElement;

	fn create(&mut self) -> Option<HtmlElement> {
		let document = web_sys::window()?.document()?;
		let body = document.body()?;
		let div: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
		div.set_class_name("tooltip");
		let style = div.style();
		for (prop, value) in [
			("position", "absolute"),
			("background", "white"),
			("border", "1px solid black"),
			("padding", "5px"),
			("border-radius", "5px"),
			("pointer-events", "none"),
			("opacity", "0"),
		] {
			let _ = style.set_property(prop, value);
		}
		body.append_child(&div).ok()?;
		Some(div)
	}

	fn show(&mut self, handle: &HtmlElement, text: &str, left: f64, top: f64) {
		handle.set_text_content(Some(text));
		let _ = handle.style().set_property("opacity", "1");
		self.move_to(handle, left, top);
	}

	fn move_to(&mut self, handle: &HtmlElement, left: f64, top: f64) {
		let style = handle.style();
		let _ = style.set_property("left", &format!("{left}px"));
		let _ = style.set_property("top", &format!("{top}px"));
	}

	fn hide(&mut self, handle: &HtmlElement) {
		let _ = handle.style().set_property("opacity", "0");
	}

	fn remove(&mut self, handle: HtmlElement) {
		handle.remove();
	}
}


#[cfg(test)]
mod tests {
	use super::fake::FakeHost;
	use super::*;

	#[test]
	fn element_is_created_lazily_and_only_once() {
		let host = FakeHost::default();
		let mut tooltip = Tooltip::new(host.clone());
		assert!(!tooltip.is_created());
		assert_eq!(host.0.borrow().created, 0);

		tooltip.show("a", 100.0, 50.0);
		tooltip.hide();
		tooltip.show("b", 0.0, 0.0);
		assert_eq!(host.0.borrow().created, 1);
		assert_eq!(host.0.borrow().last, Some(("b".to_string(), 10.0, -20.0, true)));

		tooltip.move_to(5.0, 25.0);
		tooltip.hide();
		assert_eq!(host.0.borrow().last, Some(("b".to_string(), 15.0, 5.0, false)));
	}

	#[test]
	fn drop_removes_element_across_mount_cycles() {
		let host = FakeHost::default();
		for _ in 0..5 {
			let mut tooltip = Tooltip::new(host.clone());
			tooltip.show("node", 1.0, 1.0);
			tooltip.show("node", 2.0, 2.0);
			assert_eq!(host.0.borrow().live.len(), 1);
		}
		assert!(host.0.borrow().live.is_empty());
		assert_eq!(host.0.borrow().created, 5);
	}

	#[test]
	fn unused_tooltip_never_touches_the_host() {
		let host = FakeHost::default();
		let mut tooltip = Tooltip::new(host.clone());
		tooltip.move_to(1.0, 1.0);
		tooltip.hide();
		tooltip.dispose();
		drop(tooltip);
		assert_eq!(host.0.borrow().created, 0);
	}
}
