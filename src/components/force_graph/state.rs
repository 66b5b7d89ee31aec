use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

/// Canvas radius per unit of node `size`.
pub const NODE_SCALE: f64 = 0.75;
/// Extra world-space slack around a node for pointer hits.
pub const HIT_PADDING: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub account: String,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: node.size as f32,
				is_anchor: false,
				user_data: NodeInfo {
					account: node.id.clone(),
					color: node.color.clone(),
					radius: node.size * NODE_SCALE,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) else {
				continue;
			};
			// self-links carry no spring force and are not drawn
			if src == tgt {
				continue;
			}
			graph.add_edge(src, tgt, EdgeData::default());
			edges.push((src, tgt));
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	/// Number of drawable links.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = node.data.user_data.radius + HIT_PADDING;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Tooltip text for the hovered account.
	pub fn hover_label(&self) -> Option<(f64, f64, String)> {
		let idx = self.hover.node?;
		let mut label = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				let info = &node.data.user_data;
				label = Some((
					node.x() as f64 + info.radius,
					node.y() as f64,
					format!("Account: {}", info.account),
				));
			}
		});
		label
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Resize the viewport, keeping the graph centred.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};

	fn node(id: &str, size: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			color: "#ff4d4d".into(),
			size,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
		}
	}

	fn state() -> ForceGraphState {
		let data = GraphData {
			nodes: vec![node("A", 10.0), node("B", 10.0), node("C", 6.0)],
			links: vec![link("A", "B"), link("B", "C"), link("C", "C"), link("C", "ghost")],
		};
		ForceGraphState::new(&data, 800.0, 600.0)
	}

	fn index_of(state: &ForceGraphState, account: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.account == account {
				found = Some(n.index());
			}
		});
		found.unwrap()
	}

	#[test]
	fn self_and_dangling_links_are_not_simulated() {
		assert_eq!(state().edge_count(), 2);
	}

	#[test]
	fn radius_follows_node_size() {
		let s = state();
		let mut radii = Vec::new();
		s.graph
			.visit_nodes(|n| radii.push((n.data.user_data.account.clone(), n.data.user_data.radius)));
		radii.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(radii[0], ("A".to_string(), 7.5));
		assert_eq!(radii[2], ("C".to_string(), 4.5));
	}

	#[test]
	fn hover_collects_neighbors_both_directions() {
		let mut s = state();
		let b = index_of(&s, "B");
		s.set_hover(Some(b));
		assert_eq!(s.hover.neighbors.len(), 2);
		assert!(s.is_highlighted(index_of(&s, "A")));
		assert!(s.is_hovered(b));
		let (_, _, label) = s.hover_label().unwrap();
		assert_eq!(label, "Account: B");
	}

	#[test]
	fn resize_keeps_origin_centred() {
		let mut s = state();
		s.transform.x += 30.0;
		s.resize(1000.0, 500.0);
		assert_eq!((s.width, s.height), (1000.0, 500.0));
		assert_eq!(s.transform.x, 400.0 + 30.0 + 100.0);
		assert_eq!(s.transform.y, 300.0 - 50.0);
	}

	#[test]
	fn unhover_keeps_previous_for_fade() {
		let mut s = state();
		let a = index_of(&s, "A");
		s.set_hover(Some(a));
		s.set_hover(None);
		assert_eq!(s.hover.prev_node, Some(a));
		assert!(s.has_active_highlight());
		assert!(s.hover_label().is_none());
	}
}
