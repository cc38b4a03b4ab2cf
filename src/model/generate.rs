//! Random three-tier graph generation.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::config::Config;
use super::types::{Edge, Node, NodeId, SankeyData};

/// Weight of every AVS→Set link.
pub const AVS_SET_WEIGHT: u32 = 5;
/// Weight of every Set→Operator link.
pub const SET_OPERATOR_WEIGHT: u32 = 3;

/// Generate a graph using the thread-local RNG.
pub fn generate(config: &Config) -> SankeyData {
	generate_with_rng(config, &mut rand::thread_rng())
}

/// Generate a graph drawing operator subsets from `rng`.
///
/// Sets are assigned to AVS nodes contiguously: Set `k` belongs to AVS
/// `k / sets_per_avs`. Each Set links to a uniformly random subset of
/// `min(operator_connections_per_set, operators_count)` distinct Operators.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> SankeyData {
	let total_sets = config.total_sets();
	let picks = config.connections_per_set();

	let nodes: Vec<Node> = (0..config.avs_count)
		.map(NodeId::avs)
		.chain((0..total_sets).map(NodeId::set))
		.chain((0..config.operators_count).map(NodeId::operator))
		.map(Node::new)
		.collect();

	let mut links = Vec::with_capacity(config.edge_count());

	for avs in 0..config.avs_count {
		for j in 0..config.sets_per_avs {
			let set = avs * config.sets_per_avs + j;
			links.push(Edge {
				source: NodeId::avs(avs),
				target: NodeId::set(set),
				weight: AVS_SET_WEIGHT,
				id: Some(format!("link-avs{avs}-set{set}")),
			});
		}
	}

	let mut operators: Vec<usize> = (0..config.operators_count).collect();
	for set in 0..total_sets {
		// Truncated Fisher-Yates: only the first `picks` slots get shuffled.
		let (chosen, _) = operators.partial_shuffle(rng, picks);
		for &op in chosen.iter() {
			links.push(Edge {
				source: NodeId::set(set),
				target: NodeId::operator(op),
				weight: SET_OPERATOR_WEIGHT,
				id: Some(format!("link-set{set}-op{op}")),
			});
		}
	}

	debug!(
		"generated {} nodes and {} links from {:?}",
		nodes.len(),
		links.len(),
		config
	);

	SankeyData { nodes, links }
}
