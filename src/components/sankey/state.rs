use log::info;

use super::layout::{NodeBox, SankeyLayout};
use crate::model::{Highlight, NodeId, SankeyData};

/// Alpha of nodes outside the highlight once fully faded.
pub const DIMMED_NODE_ALPHA: f64 = 0.2;

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub x: f64,
	pub y: f64,
}

/// Highlight bookkeeping with an eased transition.
///
/// `prev` keeps the last highlight alive while a cleared selection fades out.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
	pub current: Highlight,
	pub prev: Option<Highlight>,
	pub highlight_t: f64,
}

impl SelectionState {
	/// The highlight being drawn: the live one, or the one fading out.
	pub fn visible(&self) -> &Highlight {
		match (&self.prev, self.current.is_active()) {
			(Some(prev), false) => prev,
			_ => &self.current,
		}
	}
}

pub struct SankeyState {
	pub data: SankeyData,
	pub layout: SankeyLayout,
	pub selection: SelectionState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl SankeyState {
	pub fn new(data: SankeyData, selected: Option<NodeId>, width: f64, height: f64) -> Self {
		let layout = SankeyLayout::compute(&data, width, height);
		let current = Highlight::resolve(selected, &data.links);
		let highlight_t = if current.is_active() { 1.0 } else { 0.0 };
		Self {
			data,
			layout,
			selection: SelectionState {
				current,
				prev: None,
				highlight_t,
			},
			hover: HoverState::default(),
			width,
			height,
		}
	}

	/// Swap in new graph data and/or selection, re-laying out only when the
	/// graph changed.
	pub fn update(&mut self, data: SankeyData, selected: Option<NodeId>) {
		if data != self.data {
			self.layout = SankeyLayout::compute(&data, self.width, self.height);
			self.data = data;
			self.hover.node = self.hover.node.filter(|&id| self.data.contains(id));
			// Links changed underneath the current selection.
			self.selection.current =
				Highlight::resolve(self.selection.current.selected(), &self.data.links);
			self.selection.prev = None;
		}
		self.set_selection(selected);
	}

	pub fn set_selection(&mut self, selected: Option<NodeId>) {
		let was = self.selection.current.selected();
		if was == selected {
			return;
		}
		info!(
			"selection: {} -> {}",
			was.map_or_else(|| "none".to_owned(), |id| id.to_string()),
			selected.map_or_else(|| "none".to_owned(), |id| id.to_string())
		);

		let next = Highlight::resolve(selected, &self.data.links);
		if was.is_some() && selected.is_none() {
			self.selection.prev = Some(std::mem::replace(&mut self.selection.current, next));
		} else {
			self.selection.prev = None;
			self.selection.current = next;
		}
	}

	pub fn set_hover(&mut self, x: f64, y: f64) -> Option<NodeId> {
		self.hover.x = x;
		self.hover.y = y;
		self.hover.node = self.layout.node_at(x, y).map(|n| n.id);
		self.hover.node
	}

	pub fn clear_hover(&mut self) {
		self.hover.node = None;
	}

	pub fn node_at(&self, x: f64, y: f64) -> Option<&NodeBox> {
		self.layout.node_at(x, y)
	}

	/// How strongly the highlight is applied, 0 (none) to 1 (full).
	pub fn emphasis(&self) -> f64 {
		ease_out_cubic(self.selection.highlight_t)
	}

	pub fn node_alpha(&self, id: NodeId) -> f64 {
		if self.selection.visible().includes_node(id) {
			1.0
		} else {
			1.0 - (1.0 - DIMMED_NODE_ALPHA) * self.emphasis()
		}
	}

	/// 1 for links drawn in full color, 0 for fully faded ones.
	pub fn link_strength(&self, key: &str) -> f64 {
		if self.selection.visible().includes_link(key) {
			1.0
		} else {
			1.0 - self.emphasis()
		}
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, speed) = if self.selection.current.is_active() {
			(1.0, 6.0)
		} else {
			(0.0, 4.5)
		};
		let t = &mut self.selection.highlight_t;
		*t += (target - *t) * (speed * dt).min(1.0);
		if target == 1.0 && *t > 0.99 {
			*t = 1.0;
		} else if target == 0.0 && *t < 0.01 {
			*t = 0.0;
			self.selection.prev = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		if (width, height) == (self.width, self.height) {
			return;
		}
		self.width = width;
		self.height = height;
		self.layout = SankeyLayout::compute(&self.data, width, height);
	}
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}
