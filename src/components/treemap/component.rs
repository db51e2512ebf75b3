//! Leptos component wrapping the treemap.
//!
//! Layout is memoized on the tree; selection and hover only re-render the markup.

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::render::{self, Highlight};
use super::state::TreemapState;
use super::types::TreeNode;
use crate::components::theme::TreemapStyle;
use crate::components::viewport::Frame;

/// Renders a clickable treemap as SVG.
///
/// The selected cell (matched by name) is owned by the caller through
/// `selected_cell`; clicking a cell reports its name to `on_select`.
#[component]
pub fn TreemapView(
	/// Tree to pack.
	#[prop(into)]
	tree: Signal<TreeNode>,
	/// Name of the cell drawn with the selection border.
	#[prop(into)]
	selected_cell: Signal<Option<String>>,
	/// Called with the clicked cell's name.
	#[prop(into)]
	on_select: Callback<String>,
	/// Outer size and margins of the drawing.
	#[prop(default = Frame::default())]
	frame: Frame,
	/// Colors, padding and labels.
	#[prop(optional)]
	style: TreemapStyle,
) -> impl IntoView {
	let style = StoredValue::new(style);
	let state = Memo::new(move |_| style.with_value(|s| TreemapState::new(&tree.get(), frame, s)));
	let hovered = RwSignal::new(None::<usize>);

	let markup = move || {
		let selected = selected_cell.get();
		let highlight = Highlight {
			selected: selected.as_deref(),
			hovered: hovered.get(),
		};
		state.with(|st| style.with_value(|s| render::render_svg(st, highlight, s)))
	};

	let cell_under = move |ev: &MouseEvent| {
		let (x, y) = frame.event_to_inner(ev)?;
		state.with_untracked(|s| s.cell_at(x, y))
	};

	let on_mousemove = move |ev: MouseEvent| {
		let cell = cell_under(&ev);
		if hovered.get_untracked() != cell {
			hovered.set(cell);
		}
	};

	let on_click = move |ev: MouseEvent| {
		let name = cell_under(&ev).and_then(|i| state.with_untracked(|s| s.name(i).map(str::to_string)));
		if let Some(name) = name {
			on_select.run(name);
		}
	};

	view! {
		<div
			class="treemap"
			style="width: 100%; height: 100%; cursor: pointer;"
			inner_html=markup
			on:mousemove=on_mousemove
			on:mouseleave=move |_| hovered.set(None)
			on:click=on_click
		/>
	}
}
