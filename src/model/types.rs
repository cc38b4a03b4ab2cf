//! Node, edge and graph types shared by the generator, the highlight
//! resolver and the Sankey layout.

use std::fmt;
use std::str::FromStr;

use super::color::Rgb;
use super::error::{ModelResult, NodeIdError};

/// Which tier of the diagram a node lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
	/// Source tier, left column.
	Avs,
	/// Intermediate tier, middle column.
	Set,
	/// Sink tier, right column.
	Operator,
}

impl NodeKind {
	/// All kinds in column order.
	pub const ALL: [NodeKind; 3] = [NodeKind::Avs, NodeKind::Set, NodeKind::Operator];

	/// Prefix used in the string form of node ids.
	pub fn prefix(self) -> &'static str {
		match self {
			NodeKind::Avs => "avs",
			NodeKind::Set => "set",
			NodeKind::Operator => "operator",
		}
	}

	/// Human readable type name.
	pub fn name(self) -> &'static str {
		match self {
			NodeKind::Avs => "AVS",
			NodeKind::Set => "Set",
			NodeKind::Operator => "Operator",
		}
	}

	/// Column index in the diagram.
	pub fn column(self) -> usize {
		match self {
			NodeKind::Avs => 0,
			NodeKind::Set => 1,
			NodeKind::Operator => 2,
		}
	}

	/// Base fill color for nodes of this kind.
	pub fn color(self) -> Rgb {
		match self {
			NodeKind::Avs => Rgb::new(0x4d, 0xab, 0xf7),
			NodeKind::Set => Rgb::new(0x69, 0xdb, 0x7c),
			NodeKind::Operator => Rgb::new(0xff, 0x6b, 0x6b),
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Typed node identifier; renders as `avs-0`, `set-3`, `operator-7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
	/// Tier of the node.
	pub kind: NodeKind,
	/// Index within its tier.
	pub index: usize,
}

impl NodeId {
	/// AVS node `index`.
	pub const fn avs(index: usize) -> Self {
		Self {
			kind: NodeKind::Avs,
			index,
		}
	}

	/// Set node `index`.
	pub const fn set(index: usize) -> Self {
		Self {
			kind: NodeKind::Set,
			index,
		}
	}

	/// Operator node `index`.
	pub const fn operator(index: usize) -> Self {
		Self {
			kind: NodeKind::Operator,
			index,
		}
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.kind.prefix(), self.index)
	}
}

impl FromStr for NodeId {
	type Err = NodeIdError;

	fn from_str(s: &str) -> ModelResult<Self, Self::Err> {
		let (prefix, index) = s
			.split_once('-')
			.ok_or_else(|| NodeIdError::MissingSeparator(s.to_owned()))?;
		let kind = NodeKind::ALL
			.into_iter()
			.find(|k| k.prefix() == prefix)
			.ok_or_else(|| NodeIdError::UnknownKind(prefix.to_owned()))?;
		let index = index
			.parse()
			.map_err(|_| NodeIdError::InvalidIndex(index.to_owned()))?;
		Ok(Self { kind, index })
	}
}

/// A diagram node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	/// Identifier, which also carries the node's kind.
	pub id: NodeId,
	/// Fill color.
	pub color: Rgb,
}

impl Node {
	/// Node with its kind's default color.
	pub fn new(id: NodeId) -> Self {
		Self {
			id,
			color: id.kind.color(),
		}
	}

	/// Tier of this node.
	pub fn kind(&self) -> NodeKind {
		self.id.kind
	}
}

/// A weighted, directed link between two nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Upstream node.
	pub source: NodeId,
	/// Downstream node.
	pub target: NodeId,
	/// Flow value; drives ribbon width.
	pub weight: u32,
	/// Optional stable identifier.
	pub id: Option<String>,
}

impl Edge {
	/// Key used by highlight sets: the id when present, else `source-target`.
	pub fn key(&self) -> String {
		match &self.id {
			Some(id) => id.clone(),
			None => format!("{}-{}", self.source, self.target),
		}
	}

	/// Whether `node` is either endpoint.
	pub fn touches(&self, node: NodeId) -> bool {
		self.source == node || self.target == node
	}
}

/// Nodes and links ready for the Sankey chart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SankeyData {
	/// All nodes, AVS first, then Sets, then Operators.
	pub nodes: Vec<Node>,
	/// All links, AVS→Set first, then Set→Operator.
	pub links: Vec<Edge>,
}

impl SankeyData {
	/// Whether a node with this id exists.
	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Look up a node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_id_string_form() {
		assert_eq!(NodeId::avs(0).to_string(), "avs-0");
		assert_eq!(NodeId::set(12).to_string(), "set-12");
		assert_eq!(NodeId::operator(7).to_string(), "operator-7");
		assert_eq!("operator-7".parse::<NodeId>(), Ok(NodeId::operator(7)));
	}

	#[test]
	fn node_id_parse_errors() {
		assert_eq!(
			"avs".parse::<NodeId>(),
			Err(NodeIdError::MissingSeparator("avs".into()))
		);
		assert_eq!(
			"link-3".parse::<NodeId>(),
			Err(NodeIdError::UnknownKind("link".into()))
		);
		assert_eq!(
			"set-x".parse::<NodeId>(),
			Err(NodeIdError::InvalidIndex("x".into()))
		);
	}

	#[test]
	fn edge_key_falls_back_to_endpoints() {
		let mut edge = Edge {
			source: NodeId::set(1),
			target: NodeId::operator(2),
			weight: 3,
			id: None,
		};
		assert_eq!(edge.key(), "set-1-operator-2");
		edge.id = Some("link-set1-op2".into());
		assert_eq!(edge.key(), "link-set1-op2");
		assert!(edge.touches(NodeId::set(1)));
		assert!(!edge.touches(NodeId::avs(0)));
	}
}
