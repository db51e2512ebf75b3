//! Leptos component wrapping the force-directed graph.
//!
//! The component renders the graph as an SVG document inside a container `div` and
//! wires up mouse handlers for hover tooltips and node dragging. The initial layout
//! runs synchronously before the first paint; afterwards an animation loop driven by
//! `requestAnimationFrame` advances the simulation only while it is running (after a
//! drag reheats it) and re-renders on each tick.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::render;
use super::simulation::SimulationConfig;
use super::state::ForceGraphState;
use super::types::RawGraph;
use crate::components::overlay::{DomOverlayHost, Tooltip};
use crate::components::theme::GraphStyle;
use crate::components::viewport::Frame;

/// Bundles the graph state with the tooltip it owns. Dropping the context (when the
/// component unmounts) removes the tooltip element.
struct GraphContext {
	state: ForceGraphState,
	tooltip: Tooltip<DomOverlayHost>,
}

type Context = StoredValue<Option<GraphContext>, LocalStorage>;

/// Empties the frame callback slot once the view is gone, which breaks the cycle
/// between the callback and the slot it reschedules itself from. Returns `alive`.
fn keep_scheduling<T>(slot: &RefCell<Option<T>>, alive: bool) -> bool {
	if !alive {
		let _ = slot.borrow_mut().take();
	}
	alive
}

fn with_context<R>(context: Context, f: impl FnOnce(&mut GraphContext) -> R) -> Option<R> {
	context.try_update_value(|c| c.as_mut().map(f)).flatten()
}

/// Renders an interactive force-directed graph as SVG.
///
/// Pass graph data via the reactive `data` signal; the layout is recomputed whenever
/// it changes. The drawing scales to fit its container while preserving the aspect
/// ratio of `frame`.
#[component]
pub fn ForceGraphView(
	/// Nodes and links to lay out.
	#[prop(into)]
	data: Signal<RawGraph>,
	/// Outer size and margins of the drawing.
	#[prop(default = Frame::default())]
	frame: Frame,
	/// Layout tuning.
	#[prop(optional)]
	config: SimulationConfig,
	/// Colors and sizes.
	#[prop(optional)]
	style: GraphStyle,
) -> impl IntoView {
	let markup = RwSignal::new(String::new());
	let context: Context = StoredValue::new_local(None);
	let style = Rc::new(style);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (style_init, animate_init) = (style.clone(), animate.clone());
	Effect::new(move |_| {
		let state = ForceGraphState::new(&data.get(), frame, &config, &style_init);
		markup.set(render::render_svg(&state, &style_init));
		context.update_value(|c| match c {
			Some(c) => {
				c.state = state;
			}
			None => {
				*c = Some(GraphContext {
					state,
					tooltip: Tooltip::new(DomOverlayHost),
				});
			}
		});

		if animate_init.borrow().is_some() {
			return;
		}
		let (style_anim, animate_inner) = (style_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let rendered = context
				.try_update_value(|c| {
					let c = c.as_mut()?;
					c.state
						.tick()
						.then(|| render::render_svg(&c.state, &style_anim))
				});
			// Context disposed: the view is gone, stop scheduling frames.
			if !keep_scheduling(&animate_inner, rendered.is_some()) {
				return;
			}
			if let Some(Some(svg)) = rendered {
				markup.set(svg);
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = frame.event_to_inner(&ev) else {
			return;
		};
		with_context(context, |c| c.state.pointer_down(p));
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = frame.event_to_inner(&ev) else {
			return;
		};
		let (page_x, page_y) = (ev.page_x() as f64, ev.page_y() as f64);
		with_context(context, |c| {
			let changed = c.state.pointer_move(p);
			match (c.state.hovered_name(), changed) {
				(Some(name), true) => c.tooltip.show(name, page_x, page_y),
				(Some(_), false) => c.tooltip.move_to(page_x, page_y),
				(None, true) => c.tooltip.hide(),
				(None, false) => {}
			}
		});
	};

	let on_mouseup = move |_: MouseEvent| {
		with_context(context, |c| c.state.pointer_up());
	};

	let on_mouseleave = move |_: MouseEvent| {
		with_context(context, |c| {
			c.state.pointer_leave();
			c.tooltip.hide();
		});
	};

	view! {
		<div
			class="force-graph"
			style="width: 100%; height: 100%; cursor: grab;"
			inner_html=move || markup.get()
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	type Slot = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

	fn self_scheduling_slot() -> Slot {
		let slot: Slot = Rc::new(RefCell::new(None));
		let inner = slot.clone();
		*slot.borrow_mut() = Some(Box::new(move || {
			let _ = inner.borrow().is_some();
		}));
		slot
	}

	#[test]
	fn live_view_keeps_its_frame_callback() {
		let slot = self_scheduling_slot();
		assert!(keep_scheduling(&slot, true));
		assert!(slot.borrow().is_some());
		assert_eq!(Rc::strong_count(&slot), 2);
	}

	#[test]
	fn disposed_view_releases_its_frame_callback() {
		let slot = self_scheduling_slot();
		assert!(!keep_scheduling(&slot, false));
		assert!(slot.borrow().is_none());
		// Only the local handle is left once the callback's captured clone is dropped.
		assert_eq!(Rc::strong_count(&slot), 1);
		// Releasing again is a no-op.
		assert!(!keep_scheduling(&slot, false));
	}
}
