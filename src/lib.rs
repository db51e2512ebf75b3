//! graph-treemap: SVG force-directed graph and treemap views for Leptos.
//!
//! This crate provides two WASM-rendered visualizations: a node-link graph with a
//! physics-based layout, dragging, and tooltips, and a value-weighted treemap with
//! click-to-select highlighting. All layout and drawing logic is plain Rust and runs
//! natively under test.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{ForceGraphView, RawGraph, RawLink, RawNode, SimulationConfig};
pub use components::theme::Theme;
pub use components::treemap::{Tile, TreeNode, TreemapView};
pub use components::viewport::{Frame, Margin};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-treemap: logging initialized");
}

/// Load a JSON payload from the `<script>` element with the given id.
fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(data) => {
			info!("graph-treemap: loaded #{id}");
			Some(data)
		}
		Err(e) => {
			warn!("graph-treemap: failed to parse #{id}: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph and tree data from the DOM and renders both views side by side.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data: RawGraph = load_json_script("graph-data").unwrap_or_default();
	let tree_data: TreeNode = load_json_script("tree-data").unwrap_or_default();
	info!(
		"graph-treemap: {} nodes, {} links, tree root {:?}",
		graph_data.nodes.len(),
		graph_data.links.len(),
		tree_data.name
	);

	let theme = Theme::default();
	let selected = RwSignal::new(None::<String>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Graph and Treemap" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="views">
			<section class="view graph-view">
				<ForceGraphView data=Signal::stored(graph_data) style=theme.graph />
			</section>
			<section class="view treemap-view">
				<TreemapView
					tree=Signal::stored(tree_data)
					selected_cell=selected
					on_select=move |name: String| selected.set(Some(name))
					style=theme.treemap
				/>
				<p class="selection">
					{move || selected.get().map_or_else(|| "Click a cell to select it.".to_string(), |name| format!("Selected: {name}"))}
				</p>
			</section>
		</main>
	}
}
