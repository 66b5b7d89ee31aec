//! Projection of detected rings into the node/link model drawn by the canvas.
//!
//! Nodes are deduplicated across the whole result set and styled by the
//! first ring that introduces them; links are not deduplicated.

use std::collections::HashSet;

use log::debug;
use serde::Deserialize;

use super::record::{PatternType, RingRecord};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// How member lists turn into links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
	/// Consecutive members only: `k - 1` links per ring.
	#[default]
	Path,
	/// Every unordered member pair: `k * (k - 1) / 2` links per ring.
	Complete,
}

impl EdgePolicy {
	pub fn as_str(self) -> &'static str {
		match self {
			EdgePolicy::Path => "path",
			EdgePolicy::Complete => "complete",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"path" => Some(EdgePolicy::Path),
			"complete" => Some(EdgePolicy::Complete),
			_ => None,
		}
	}
}

/// Visual weight of a node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SeverityStyle {
	pub color: String,
	pub size: f64,
}

/// Styles per severity: `cycle` rings are high alert, everything else caution.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
	pub high_alert: SeverityStyle,
	pub caution: SeverityStyle,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			high_alert: SeverityStyle {
				color: "#ff4d4d".into(),
				size: 10.0,
			},
			caution: SeverityStyle {
				color: "#ffcc00".into(),
				size: 6.0,
			},
		}
	}
}

impl Palette {
	pub fn style_for(&self, pattern: &PatternType) -> &SeverityStyle {
		if pattern.is_cycle() {
			&self.high_alert
		} else {
			&self.caution
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
	pub edge_policy: EdgePolicy,
	pub palette: Palette,
}

/// Build the graph model for `rings`, in order.
pub fn project(rings: &[RingRecord], options: &ProjectionOptions) -> GraphData {
	let mut seen: HashSet<&str> = HashSet::new();
	let mut nodes = Vec::new();
	let mut links = Vec::new();

	for ring in rings {
		let style = options.palette.style_for(&ring.pattern_type);
		for account in &ring.member_accounts {
			if seen.insert(account.as_str()) {
				nodes.push(GraphNode {
					id: account.to_string(),
					color: style.color.clone(),
					size: style.size,
				});
			}
		}

		let members = &ring.member_accounts;
		match options.edge_policy {
			EdgePolicy::Path => {
				links.extend(members.windows(2).map(|pair| GraphLink {
					source: pair[0].to_string(),
					target: pair[1].to_string(),
				}));
			}
			EdgePolicy::Complete => {
				for (i, source) in members.iter().enumerate() {
					links.extend(members[i + 1..].iter().map(|target| GraphLink {
						source: source.to_string(),
						target: target.to_string(),
					}));
				}
			}
		}
	}

	debug!(
		"projected {} rings into {} nodes / {} links ({})",
		rings.len(),
		nodes.len(),
		links.len(),
		options.edge_policy.as_str()
	);
	GraphData { nodes, links }
}
