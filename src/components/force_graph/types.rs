//! Graph data structures: the raw input payload and the derived node/edge lists.

use std::collections::HashSet;

use serde::Deserialize;

/// A node as it appears in the input payload.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawNode {
	/// Unique identifier, also the node's display and color key.
	pub name: String,
	/// Magnitude driving radius and collision size.
	#[serde(default)]
	pub value: Option<f64>,
}

/// A link as it appears in the input payload.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawLink {
	/// Source node name.
	pub source: String,
	/// Target node name.
	pub target: String,
	/// Link weight. Heavier links are drawn thicker and pull closer.
	pub value: f64,
}

/// Complete graph payload: nodes and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawGraph {
	/// Declared nodes. Duplicate names keep the first entry.
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	/// Links by node name; unknown endpoints become value-less nodes.
	#[serde(default)]
	pub links: Vec<RawLink>,
}

/// A renderable node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub name: String,
	pub value: Option<f64>,
}

/// A renderable edge between two nodes, referenced by index into the node list.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: usize,
	pub target: usize,
	pub value: f64,
}

/// Derives the node list: declared nodes first (first occurrence wins), then any
/// name referenced only by a link, in link order, with no value.
pub fn get_nodes(raw: &RawGraph) -> Vec<Node> {
	let mut seen = HashSet::new();
	let mut nodes = Vec::with_capacity(raw.nodes.len());
	for node in &raw.nodes {
		if seen.insert(node.name.as_str()) {
			nodes.push(Node {
				name: node.name.clone(),
				value: node.value.filter(|v| v.is_finite()),
			});
		}
	}
	for link in &raw.links {
		for name in [&link.source, &link.target] {
			if seen.insert(name.as_str()) {
				nodes.push(Node {
					name: name.clone(),
					value: None,
				});
			}
		}
	}
	nodes
}

/// Derives the edge list, resolving names against `get_nodes(raw)`.
///
/// Every link resolves because [`get_nodes`] synthesizes missing endpoints, so the
/// edge count always equals the input link count.
pub fn get_links(raw: &RawGraph) -> Vec<Edge> {
	let nodes = get_nodes(raw);
	let index: std::collections::HashMap<&str, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.name.as_str(), i))
		.collect();
	raw.links
		.iter()
		.filter_map(|link| {
			Some(Edge {
				source: *index.get(link.source.as_str())?,
				target: *index.get(link.target.as_str())?,
				value: link.value,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn sample() -> RawGraph {
		serde_json::from_str(
			r#"{
				"nodes": [
					{"name": "a", "value": 4},
					{"name": "b"},
					{"name": "a", "value": 99}
				],
				"links": [
					{"source": "a", "target": "b", "value": 2},
					{"source": "b", "target": "c", "value": 1}
				]
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn nodes_are_deduplicated_and_link_endpoints_synthesized() {
		let nodes = get_nodes(&sample());
		assert_eq!(
			nodes,
			vec![
				Node {
					name: "a".into(),
					value: Some(4.0)
				},
				Node {
					name: "b".into(),
					value: None
				},
				Node {
					name: "c".into(),
					value: None
				},
			]
		);
	}

	#[test]
	fn every_link_resolves_to_node_indices() {
		let raw = sample();
		let edges = get_links(&raw);
		assert_eq!(edges.len(), raw.links.len());
		assert_eq!(
			edges,
			vec![
				Edge {
					source: 0,
					target: 1,
					value: 2.0
				},
				Edge {
					source: 1,
					target: 2,
					value: 1.0
				},
			]
		);
	}

	#[test]
	fn missing_sections_default_to_empty() {
		let raw: RawGraph = serde_json::from_str("{}").unwrap();
		assert!(get_nodes(&raw).is_empty());
		assert!(get_links(&raw).is_empty());
	}
}
