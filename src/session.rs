//! The current analysis and the views derived from it.
//!
//! A [`Snapshot`] is built in one step from a result set and replaced
//! wholesale; nothing in it is mutated after construction. Fetches are
//! sequenced so that only the most recently issued request may install.

use std::sync::Arc;

use log::{info, warn};

use crate::components::force_graph::GraphData;
use crate::error::FetchFailure;
use crate::rings::{EdgePolicy, ProjectionOptions, ResultSet, SummaryRow, project, tabulate};

/// Result set plus both derived views.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
	pub version: u64,
	pub result: ResultSet,
	pub graph: GraphData,
	pub summary: Vec<SummaryRow>,
}

impl Snapshot {
	fn derive(version: u64, result: ResultSet, options: &ProjectionOptions) -> Self {
		let graph = project(result.rings(), options);
		let summary = tabulate(result.rings());
		Self {
			version,
			result,
			graph,
			summary,
		}
	}
}

/// Handle for one in-flight analysis call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
	pub fn seq(self) -> u64 {
		self.0
	}
}

/// What happened when a fetch finished.
#[derive(Debug)]
pub enum Completion {
	/// A new snapshot is current.
	Installed { version: u64 },
	/// A newer request was issued meanwhile; the outcome was dropped.
	Superseded { seq: u64, latest: u64 },
	/// The latest request failed; the previous snapshot is untouched.
	Failed(FetchFailure),
}

#[derive(Clone, Debug, Default)]
pub struct Session {
	options: ProjectionOptions,
	issued: u64,
	settled: u64,
	current: Option<Arc<Snapshot>>,
}

impl Session {
	pub fn new(options: ProjectionOptions) -> Self {
		Self {
			options,
			..Default::default()
		}
	}

	/// Register a new request. Any request issued earlier can no longer install.
	pub fn begin_fetch(&mut self) -> RequestTicket {
		self.issued += 1;
		info!("analysis request #{} started", self.issued);
		RequestTicket(self.issued)
	}

	pub fn complete(
		&mut self,
		ticket: RequestTicket,
		outcome: Result<ResultSet, FetchFailure>,
	) -> Completion {
		if ticket.0 != self.issued {
			warn!(
				"discarding response for request #{} (latest is #{})",
				ticket.0, self.issued
			);
			return Completion::Superseded {
				seq: ticket.0,
				latest: self.issued,
			};
		}
		self.settled = ticket.0;

		match outcome {
			Ok(result) => {
				let version = self.current.as_ref().map_or(1, |s| s.version + 1);
				let snapshot = Snapshot::derive(version, result, &self.options);
				info!(
					"installed analysis v{version}: {} rings, {} accounts",
					snapshot.summary.len(),
					snapshot.graph.nodes.len()
				);
				self.current = Some(Arc::new(snapshot));
				Completion::Installed { version }
			}
			Err(failure) => {
				warn!("analysis request #{} failed: {failure}", ticket.0);
				Completion::Failed(failure)
			}
		}
	}

	/// Whether the latest issued request is still outstanding.
	pub fn is_pending(&self) -> bool {
		self.issued > self.settled
	}

	pub fn current(&self) -> Option<&Arc<Snapshot>> {
		self.current.as_ref()
	}

	pub fn options(&self) -> &ProjectionOptions {
		&self.options
	}

	/// Switch edge policy and re-derive the graph of the current result set.
	pub fn set_edge_policy(&mut self, policy: EdgePolicy) {
		if self.options.edge_policy == policy {
			return;
		}
		self.options.edge_policy = policy;
		if let Some(current) = self.current.take() {
			let graph = project(current.result.rings(), &self.options);
			let snapshot = Snapshot {
				version: current.version,
				result: current.result.clone(),
				graph,
				summary: current.summary.clone(),
			};
			self.current = Some(Arc::new(snapshot));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn scenario() -> ResultSet {
		ResultSet::from_value(json!({"fraud_rings": [
			{"ring_id": 1, "pattern_type": "cycle", "risk_score": 92, "member_accounts": ["A", "B", "C"]},
			{"ring_id": 2, "pattern_type": "other", "risk_score": 40, "member_accounts": ["C", "D"]}
		]}))
		.unwrap()
	}

	fn single() -> ResultSet {
		ResultSet::from_value(json!({"fraud_rings": [
			{"ring_id": 9, "pattern_type": "cycle", "risk_score": 99, "member_accounts": ["Z"]}
		]}))
		.unwrap()
	}

	#[test]
	fn success_installs_snapshot_with_both_views() {
		let mut session = Session::default();
		assert!(session.current().is_none());

		let ticket = session.begin_fetch();
		assert!(session.is_pending());
		let done = session.complete(ticket, Ok(scenario()));

		assert!(matches!(done, Completion::Installed { version: 1 }));
		assert!(!session.is_pending());
		let snap = session.current().unwrap();
		assert_eq!(snap.graph.nodes.len(), 4);
		assert_eq!(snap.graph.links.len(), 3);
		assert_eq!(snap.summary.len(), 2);
	}

	#[test]
	fn failure_leaves_previous_snapshot_untouched() {
		let mut session = Session::default();
		let first = session.begin_fetch();
		session.complete(first, Ok(scenario()));
		let before = Arc::clone(session.current().unwrap());

		let second = session.begin_fetch();
		let done = session.complete(second, Err(FetchFailure::Status { status: 500 }));

		assert!(matches!(done, Completion::Failed(FetchFailure::Status { status: 500 })));
		assert!(Arc::ptr_eq(&before, session.current().unwrap()));
		assert!(!session.is_pending());
	}

	#[test]
	fn failure_without_prior_state_keeps_nothing() {
		let mut session = Session::default();
		let ticket = session.begin_fetch();
		let done = session.complete(ticket, Err(FetchFailure::ReadUpload("gone".into())));
		assert!(matches!(done, Completion::Failed(_)));
		assert!(session.current().is_none());
	}

	#[test]
	fn reupload_replaces_rather_than_merges() {
		let mut session = Session::default();
		let t1 = session.begin_fetch();
		session.complete(t1, Ok(scenario()));
		let t2 = session.begin_fetch();
		session.complete(t2, Ok(single()));

		let snap = session.current().unwrap();
		assert_eq!(snap.version, 2);
		assert_eq!(snap.graph.nodes.len(), 1);
		assert_eq!(snap.summary.len(), 1);
	}

	#[test]
	fn stale_response_is_discarded() {
		let mut session = Session::default();
		let slow = session.begin_fetch();
		let fast = session.begin_fetch();

		assert!(matches!(
			session.complete(fast, Ok(single())),
			Completion::Installed { version: 1 }
		));
		let done = session.complete(slow, Ok(scenario()));
		assert!(matches!(done, Completion::Superseded { seq: 1, latest: 2 }));
		assert_eq!(session.current().unwrap().summary[0].ring_id, "9");
	}

	#[test]
	fn stale_failure_does_not_clear_pending() {
		let mut session = Session::default();
		let old = session.begin_fetch();
		let _new = session.begin_fetch();
		let done = session.complete(old, Err(FetchFailure::Status { status: 503 }));
		assert!(matches!(done, Completion::Superseded { .. }));
		assert!(session.is_pending());
	}

	#[test]
	fn edge_policy_switch_rederives_graph_only() {
		let mut session = Session::default();
		let ticket = session.begin_fetch();
		session.complete(ticket, Ok(scenario()));

		session.set_edge_policy(EdgePolicy::Complete);
		let snap = session.current().unwrap();
		assert_eq!(snap.version, 1);
		// 3 pairs from ring 1, 1 from ring 2
		assert_eq!(snap.graph.links.len(), 4);
		assert_eq!(snap.summary.len(), 2);
		assert_eq!(session.options().edge_policy, EdgePolicy::Complete);
	}
}
