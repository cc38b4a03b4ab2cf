use std::collections::HashMap;

use crate::model::{NodeId, NodeKind, Rgb, SankeyData};

pub const MARGIN_TOP: f64 = 40.0;
pub const MARGIN_RIGHT: f64 = 160.0;
pub const MARGIN_BOTTOM: f64 = 40.0;
pub const MARGIN_LEFT: f64 = 50.0;
pub const NODE_THICKNESS: f64 = 18.0;
pub const NODE_SPACING: f64 = 24.0;
pub const LABEL_PADDING: f64 = 16.0;

/// Operators nobody links to still get a visible sliver.
const MIN_NODE_HEIGHT: f64 = 2.0;
const HIT_SLOP: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	pub id: NodeId,
	pub color: Rgb,
	pub x0: f64,
	pub x1: f64,
	pub y0: f64,
	pub y1: f64,
}

impl NodeBox {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x0 - HIT_SLOP
			&& x <= self.x1 + HIT_SLOP
			&& y >= self.y0 - HIT_SLOP
			&& y <= self.y1 + HIT_SLOP
	}

	/// Distance from the point to the box edge, 0 inside.
	pub fn distance(&self, x: f64, y: f64) -> f64 {
		let dx = (self.x0 - x).max(x - self.x1).max(0.0);
		let dy = (self.y0 - y).max(y - self.y1).max(0.0);
		(dx * dx + dy * dy).sqrt()
	}

	pub fn center_y(&self) -> f64 {
		(self.y0 + self.y1) / 2.0
	}

	/// Anchor point and canvas text alignment for the node's label.
	pub fn label_anchor(&self) -> (f64, f64, &'static str) {
		if self.id.kind == NodeKind::Avs {
			(self.x0 - LABEL_PADDING, self.center_y(), "right")
		} else {
			(self.x1 + LABEL_PADDING, self.center_y(), "left")
		}
	}
}

/// A link ribbon; `y0`/`y1` are the ribbon centerline at each end.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkRibbon {
	pub key: String,
	pub source: NodeId,
	pub target: NodeId,
	pub color: Rgb,
	pub width: f64,
	pub x0: f64,
	pub x1: f64,
	pub y0: f64,
	pub y1: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SankeyLayout {
	pub nodes: Vec<NodeBox>,
	pub links: Vec<LinkRibbon>,
}

impl SankeyLayout {
	/// Lay out `data` in three justified columns inside a `width` x `height` box.
	pub fn compute(data: &SankeyData, width: f64, height: f64) -> Self {
		let index: HashMap<NodeId, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id, i))
			.collect();

		// (incoming, outgoing) weight per node; dangling links are dropped.
		let mut flow = vec![(0.0_f64, 0.0_f64); data.nodes.len()];
		let links: Vec<(usize, usize, f64, String)> = data
			.links
			.iter()
			.filter_map(|l| {
				let (&s, &t) = (index.get(&l.source)?, index.get(&l.target)?);
				Some((s, t, l.weight as f64, l.key()))
			})
			.collect();
		for &(s, t, w, _) in &links {
			flow[s].1 += w;
			flow[t].0 += w;
		}
		let values: Vec<f64> = flow.iter().map(|&(i, o)| i.max(o)).collect();

		let inner_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(NODE_THICKNESS);
		let inner_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
		let column_step = (inner_w - NODE_THICKNESS) / 2.0;

		let columns: Vec<Vec<usize>> = NodeKind::ALL
			.iter()
			.map(|&kind| {
				(0..data.nodes.len())
					.filter(|&i| data.nodes[i].kind() == kind)
					.collect()
			})
			.collect();

		// Gaps shrink so the tallest column spends at most half its height on them.
		let longest = columns.iter().map(Vec::len).max().unwrap_or(0);
		let spacing = if longest > 1 {
			NODE_SPACING.min(inner_h / 2.0 / (longest - 1) as f64)
		} else {
			NODE_SPACING
		};

		let ky = columns
			.iter()
			.filter_map(|col| {
				let total: f64 = col.iter().map(|&i| values[i]).sum();
				(total > 0.0).then(|| {
					let gaps = col.len().saturating_sub(1) as f64 * spacing;
					(inner_h - gaps).max(1.0) / total
				})
			})
			.fold(f64::INFINITY, f64::min);
		let ky = if ky.is_finite() { ky } else { 1.0 };

		let mut nodes: Vec<Option<NodeBox>> = vec![None; data.nodes.len()];
		for (kind, col) in NodeKind::ALL.iter().zip(&columns) {
			let heights: Vec<f64> = col
				.iter()
				.map(|&i| (values[i] * ky).max(MIN_NODE_HEIGHT))
				.collect();
			let span = heights.iter().sum::<f64>()
				+ col.len().saturating_sub(1) as f64 * spacing;
			let x0 = MARGIN_LEFT + kind.column() as f64 * column_step;
			let mut y = MARGIN_TOP + (inner_h - span) / 2.0;
			for (&i, &h) in col.iter().zip(&heights) {
				let node = &data.nodes[i];
				nodes[i] = Some(NodeBox {
					id: node.id,
					color: node.color,
					x0,
					x1: x0 + NODE_THICKNESS,
					y0: y,
					y1: y + h,
				});
				y += h + spacing;
			}
		}
		let nodes: Vec<NodeBox> = nodes.into_iter().flatten().collect();

		// Stack ribbons inside each node ordered by the far end's position,
		// which keeps crossings down.
		let mut out_order: Vec<usize> = (0..links.len()).collect();
		out_order.sort_by(|&a, &b| {
			let (sa, ta) = (links[a].0, links[a].1);
			let (sb, tb) = (links[b].0, links[b].1);
			sa.cmp(&sb)
				.then(nodes[ta].center_y().total_cmp(&nodes[tb].center_y()))
		});
		let mut in_order: Vec<usize> = (0..links.len()).collect();
		in_order.sort_by(|&a, &b| {
			let (sa, ta) = (links[a].0, links[a].1);
			let (sb, tb) = (links[b].0, links[b].1);
			ta.cmp(&tb)
				.then(nodes[sa].center_y().total_cmp(&nodes[sb].center_y()))
		});

		let mut src_y = vec![0.0; links.len()];
		let mut offset: Vec<f64> = nodes.iter().map(|n| n.y0).collect();
		for &li in &out_order {
			let (s, _, w, _) = &links[li];
			let width = w * ky;
			src_y[li] = offset[*s] + width / 2.0;
			offset[*s] += width;
		}
		let mut tgt_y = vec![0.0; links.len()];
		let mut offset: Vec<f64> = nodes.iter().map(|n| n.y0).collect();
		for &li in &in_order {
			let (_, t, w, _) = &links[li];
			let width = w * ky;
			tgt_y[li] = offset[*t] + width / 2.0;
			offset[*t] += width;
		}

		let links = links
			.into_iter()
			.enumerate()
			.map(|(li, (s, t, w, key))| LinkRibbon {
				key,
				source: nodes[s].id,
				target: nodes[t].id,
				color: nodes[s].color,
				width: w * ky,
				x0: nodes[s].x1,
				x1: nodes[t].x0,
				y0: src_y[li],
				y1: tgt_y[li],
			})
			.collect();

		Self { nodes, links }
	}

	pub fn node(&self, id: NodeId) -> Option<&NodeBox> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Node under the point; slop boxes can overlap in crowded columns, so
	/// the closest box wins.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&NodeBox> {
		self.nodes
			.iter()
			.filter(|n| n.contains(x, y))
			.min_by(|a, b| a.distance(x, y).total_cmp(&b.distance(x, y)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Config, Edge, Node, generate_with_rng};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const EPS: f64 = 1e-9;

	fn minimal() -> SankeyData {
		let config = Config {
			avs_count: 1,
			sets_per_avs: 1,
			operators_count: 2,
			operator_connections_per_set: 2,
		};
		generate_with_rng(&config, &mut StdRng::seed_from_u64(0))
	}

	#[test]
	fn columns_follow_kind() {
		let layout = SankeyLayout::compute(&minimal(), 800.0, 600.0);
		let avs = layout.node(NodeId::avs(0)).unwrap();
		let set = layout.node(NodeId::set(0)).unwrap();
		let op = layout.node(NodeId::operator(1)).unwrap();
		assert!((avs.x0 - MARGIN_LEFT).abs() < EPS);
		assert!(avs.x1 < set.x0 && set.x1 < op.x0);
		assert!((op.x1 - (800.0 - MARGIN_RIGHT)).abs() < EPS);
		assert!((avs.x1 - avs.x0 - NODE_THICKNESS).abs() < EPS);
	}

	#[test]
	fn node_height_tracks_value() {
		let layout = SankeyLayout::compute(&minimal(), 800.0, 600.0);
		let set = layout.node(NodeId::set(0)).unwrap();
		let avs = layout.node(NodeId::avs(0)).unwrap();
		// Set carries max(in 5, out 6) = 6; its AVS carries 5.
		let ratio = (set.y1 - set.y0) / (avs.y1 - avs.y0);
		assert!((ratio - 6.0 / 5.0).abs() < 1e-6);
	}

	#[test]
	fn nodes_fit_inside_margins() {
		let data = generate_with_rng(&Config::default(), &mut StdRng::seed_from_u64(8));
		let layout = SankeyLayout::compute(&data, 900.0, 600.0);
		assert_eq!(layout.nodes.len(), data.nodes.len());
		assert_eq!(layout.links.len(), data.links.len());
		for n in &layout.nodes {
			assert!(n.y0 >= MARGIN_TOP - EPS, "{n:?}");
			assert!(n.y1 <= 600.0 - MARGIN_BOTTOM + EPS, "{n:?}");
		}
	}

	#[test]
	fn ribbons_stack_within_source() {
		let layout = SankeyLayout::compute(&minimal(), 800.0, 600.0);
		let set = layout.node(NodeId::set(0)).unwrap();
		let mut outgoing: Vec<&LinkRibbon> = layout
			.links
			.iter()
			.filter(|l| l.source == set.id)
			.collect();
		outgoing.sort_by(|a, b| a.y0.total_cmp(&b.y0));
		assert_eq!(outgoing.len(), 2);
		assert!((outgoing[0].y0 - outgoing[0].width / 2.0 - set.y0).abs() < EPS);
		let bottom = outgoing[1].y0 + outgoing[1].width / 2.0;
		assert!((bottom - set.y1).abs() < 1e-6);
		assert!((outgoing[0].x0 - set.x1).abs() < EPS);
	}

	#[test]
	fn crowded_column_shrinks_gaps() {
		let config = Config {
			avs_count: 10,
			sets_per_avs: 10,
			operators_count: 20,
			operator_connections_per_set: 10,
		};
		let data = generate_with_rng(&config, &mut StdRng::seed_from_u64(2));
		let layout = SankeyLayout::compute(&data, 1000.0, 600.0);
		let mut sets: Vec<&NodeBox> = layout
			.nodes
			.iter()
			.filter(|n| n.id.kind == NodeKind::Set)
			.collect();
		sets.sort_by(|a, b| a.y0.total_cmp(&b.y0));
		let first = sets.first().unwrap();
		let last = sets.last().unwrap();
		assert!(first.y0 >= MARGIN_TOP - 1e-6);
		assert!(last.y1 <= 600.0 - MARGIN_BOTTOM + 1e-6);
		assert!(first.y1 - first.y0 > 1.0);
	}

	#[test]
	fn crowded_click_picks_node_under_pointer() {
		let config = Config {
			avs_count: 10,
			sets_per_avs: 10,
			operators_count: 20,
			operator_connections_per_set: 10,
		};
		let data = generate_with_rng(&config, &mut StdRng::seed_from_u64(2));
		let layout = SankeyLayout::compute(&data, 1000.0, 600.0);
		for index in [0, 49, 50, 99] {
			let set = layout.node(NodeId::set(index)).unwrap();
			let x = (set.x0 + set.x1) / 2.0;
			for y in [set.y0 + 0.1, set.center_y(), set.y1 - 0.1] {
				let hit = layout.node_at(x, y).map(|n| n.id);
				assert_eq!(hit, Some(NodeId::set(index)), "y = {y}");
			}
		}
	}

	#[test]
	fn ribbon_uses_source_color() {
		let layout = SankeyLayout::compute(&minimal(), 800.0, 600.0);
		for link in &layout.links {
			assert_eq!(link.color, link.source.kind.color());
		}
	}

	#[test]
	fn hit_testing() {
		let layout = SankeyLayout::compute(&minimal(), 800.0, 600.0);
		let set = layout.node(NodeId::set(0)).unwrap();
		let hit = layout.node_at((set.x0 + set.x1) / 2.0, set.center_y());
		assert_eq!(hit.map(|n| n.id), Some(NodeId::set(0)));
		assert!(layout.node_at(1.0, 1.0).is_none());
	}

	#[test]
	fn unlinked_operator_stays_visible() {
		let data = SankeyData {
			nodes: vec![Node::new(NodeId::avs(0)), Node::new(NodeId::operator(0))],
			links: vec![Edge {
				source: NodeId::avs(0),
				target: NodeId::set(0),
				weight: 5,
				id: None,
			}],
		};
		let layout = SankeyLayout::compute(&data, 800.0, 600.0);
		// Link to a missing node is dropped.
		assert!(layout.links.is_empty());
		let op = layout.node(NodeId::operator(0)).unwrap();
		assert!(op.y1 - op.y0 >= MIN_NODE_HEIGHT - EPS);
	}

	#[test]
	fn labels_face_outward() {
		let layout = SankeyLayout::compute(&minimal(), 800.0, 600.0);
		let (x, _, align) = layout.node(NodeId::avs(0)).unwrap().label_anchor();
		assert_eq!(align, "right");
		assert!(x < MARGIN_LEFT);
		let (_, _, align) = layout.node(NodeId::operator(0)).unwrap().label_anchor();
		assert_eq!(align, "left");
	}
}
