//! Click-driven highlight propagation over the three-tier graph.

use std::collections::HashSet;

use super::types::{Edge, NodeId, NodeKind};

/// Nodes and links to render at full emphasis for a selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
	selected: Option<NodeId>,
	nodes: HashSet<NodeId>,
	links: HashSet<String>,
}

impl Highlight {
	/// Resolve the highlight for `selected` against `edges`.
	///
	/// AVS selections expand two hops downstream, Operator selections two
	/// hops upstream, and Set selections one hop in each direction.
	pub fn resolve(selected: Option<NodeId>, edges: &[Edge]) -> Self {
		let Some(sel) = selected else {
			return Self::default();
		};

		let mut nodes = HashSet::from([sel]);
		match sel.kind {
			NodeKind::Avs => {
				for set in downstream(edges, sel) {
					nodes.insert(set);
					nodes.extend(downstream(edges, set));
				}
			}
			NodeKind::Operator => {
				for set in upstream(edges, sel) {
					nodes.insert(set);
					nodes.extend(upstream(edges, set));
				}
			}
			NodeKind::Set => {
				nodes.extend(upstream(edges, sel));
				nodes.extend(downstream(edges, sel));
			}
		}

		let links = if nodes.len() <= 1 {
			HashSet::new()
		} else {
			edges
				.iter()
				.filter(|e| {
					(nodes.contains(&e.source) && nodes.contains(&e.target)) || e.touches(sel)
				})
				.map(Edge::key)
				.collect()
		};

		Self {
			selected,
			nodes,
			links,
		}
	}

	/// The node the highlight was resolved for.
	pub fn selected(&self) -> Option<NodeId> {
		self.selected
	}

	/// Whether a selection is active at all.
	pub fn is_active(&self) -> bool {
		self.selected.is_some()
	}

	/// Highlighted node ids; empty when nothing is selected.
	pub fn nodes(&self) -> &HashSet<NodeId> {
		&self.nodes
	}

	/// Highlighted link keys; empty when nothing is selected.
	pub fn links(&self) -> &HashSet<String> {
		&self.links
	}

	/// Whether `id` renders at full emphasis. Always true without a selection.
	pub fn includes_node(&self, id: NodeId) -> bool {
		self.selected.is_none() || self.nodes.contains(&id)
	}

	/// Whether the link with `key` renders at full emphasis.
	pub fn includes_link(&self, key: &str) -> bool {
		self.selected.is_none() || self.links.contains(key)
	}
}

/// Next selection after clicking `clicked`: same node clears, other replaces.
pub fn toggle_selection(current: Option<NodeId>, clicked: NodeId) -> Option<NodeId> {
	if current == Some(clicked) {
		None
	} else {
		Some(clicked)
	}
}

fn downstream(edges: &[Edge], node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
	edges.iter().filter(move |e| e.source == node).map(|e| e.target)
}

fn upstream(edges: &[Edge], node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
	edges.iter().filter(move |e| e.target == node).map(|e| e.source)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::config::Config;
	use crate::model::generate::generate_with_rng;

	fn edge(source: NodeId, target: NodeId) -> Edge {
		Edge {
			source,
			target,
			weight: 1,
			id: None,
		}
	}

	/// avs-0 -> set-0, set-1; avs-1 -> set-2
	/// set-0 -> op-0, op-1; set-1 -> op-1; set-2 -> op-2
	fn fixture() -> Vec<Edge> {
		vec![
			edge(NodeId::avs(0), NodeId::set(0)),
			edge(NodeId::avs(0), NodeId::set(1)),
			edge(NodeId::avs(1), NodeId::set(2)),
			edge(NodeId::set(0), NodeId::operator(0)),
			edge(NodeId::set(0), NodeId::operator(1)),
			edge(NodeId::set(1), NodeId::operator(1)),
			edge(NodeId::set(2), NodeId::operator(2)),
		]
	}

	fn ids(h: &Highlight) -> Vec<String> {
		let mut v: Vec<String> = h.nodes().iter().map(ToString::to_string).collect();
		v.sort();
		v
	}

	fn keys(h: &Highlight) -> Vec<String> {
		let mut v: Vec<String> = h.links().iter().cloned().collect();
		v.sort();
		v
	}

	#[test]
	fn no_selection_highlights_everything() {
		let h = Highlight::resolve(None, &fixture());
		assert!(!h.is_active());
		assert!(h.nodes().is_empty());
		assert!(h.includes_node(NodeId::operator(2)));
		assert!(h.includes_link("anything"));
	}

	#[test]
	fn avs_expands_downstream_two_hops() {
		let h = Highlight::resolve(Some(NodeId::avs(0)), &fixture());
		assert_eq!(ids(&h), ["avs-0", "operator-0", "operator-1", "set-0", "set-1"]);
		assert_eq!(
			keys(&h),
			[
				"avs-0-set-0",
				"avs-0-set-1",
				"set-0-operator-0",
				"set-0-operator-1",
				"set-1-operator-1",
			]
		);
		assert!(!h.includes_node(NodeId::avs(1)));
		assert!(!h.includes_link("set-2-operator-2"));
	}

	#[test]
	fn operator_expands_upstream_two_hops() {
		let h = Highlight::resolve(Some(NodeId::operator(1)), &fixture());
		assert_eq!(ids(&h), ["avs-0", "operator-1", "set-0", "set-1"]);
		// set-0 -> operator-0 is excluded: operator-0 is not in the node set.
		assert_eq!(
			keys(&h),
			[
				"avs-0-set-0",
				"avs-0-set-1",
				"set-0-operator-1",
				"set-1-operator-1",
			]
		);
	}

	#[test]
	fn set_expands_one_hop_each_way() {
		let h = Highlight::resolve(Some(NodeId::set(0)), &fixture());
		assert_eq!(ids(&h), ["avs-0", "operator-0", "operator-1", "set-0"]);
		assert_eq!(
			keys(&h),
			["avs-0-set-0", "set-0-operator-0", "set-0-operator-1"]
		);
		assert!(!h.includes_node(NodeId::set(1)));
	}

	#[test]
	fn isolated_node_has_no_links() {
		let h = Highlight::resolve(Some(NodeId::operator(9)), &fixture());
		assert_eq!(ids(&h), ["operator-9"]);
		assert!(h.links().is_empty());
		assert!(h.includes_node(NodeId::operator(9)));
		assert!(!h.includes_link("set-2-operator-2"));
	}

	#[test]
	fn minimal_example_highlights_all() {
		let config = Config {
			avs_count: 1,
			sets_per_avs: 1,
			operators_count: 2,
			operator_connections_per_set: 2,
		};
		let data = generate_with_rng(&config, &mut StdRng::seed_from_u64(0));
		let h = Highlight::resolve(Some(NodeId::avs(0)), &data.links);
		assert_eq!(ids(&h), ["avs-0", "operator-0", "operator-1", "set-0"]);
		assert_eq!(h.links().len(), 3);
		assert!(data.links.iter().all(|l| h.includes_link(&l.key())));
	}

	#[test]
	fn connecting_set_is_shared() {
		let data = generate_with_rng(&Config::default(), &mut StdRng::seed_from_u64(42));
		for avs in 0..Config::default().avs_count {
			let from_avs = Highlight::resolve(Some(NodeId::avs(avs)), &data.links);
			for path in data.links.iter().filter(|l| l.source == NodeId::avs(avs)) {
				let set = path.target;
				for op in data.links.iter().filter(|l| l.source == set).map(|l| l.target) {
					let from_op = Highlight::resolve(Some(op), &data.links);
					assert!(from_avs.nodes().contains(&set));
					assert!(from_avs.nodes().contains(&op));
					assert!(from_op.nodes().contains(&set));
					assert!(from_op.nodes().contains(&NodeId::avs(avs)));
				}
			}
		}
	}

	#[test]
	fn toggle_twice_clears() {
		let once = toggle_selection(None, NodeId::set(3));
		assert_eq!(once, Some(NodeId::set(3)));
		assert_eq!(toggle_selection(once, NodeId::set(3)), None);
		assert_eq!(
			toggle_selection(once, NodeId::avs(0)),
			Some(NodeId::avs(0))
		);
	}

	#[test]
	fn resolve_is_repeatable() {
		let edges = fixture();
		let a = Highlight::resolve(Some(NodeId::avs(0)), &edges);
		let b = Highlight::resolve(Some(NodeId::avs(0)), &edges);
		assert_eq!(a, b);
	}
}
