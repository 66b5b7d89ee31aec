use std::collections::HashSet;

use fraud_ring_canvas::export::export_artifact;
use fraud_ring_canvas::rings::{
	EdgePolicy, Palette, ProjectionOptions, ResultSet, project, tabulate,
};
use fraud_ring_canvas::session::Session;
use proptest::prelude::*;
use serde_json::{Value, json};

/// (is_cycle, risk score, members) per ring.
type RingSpec = (bool, u8, Vec<String>);

fn ring_specs() -> impl Strategy<Value = Vec<RingSpec>> {
	proptest::collection::vec(
		(
			any::<bool>(),
			0u8..=100,
			proptest::collection::vec("[A-F]{1,2}", 1..7),
		),
		0..8,
	)
}

fn document(specs: &[RingSpec]) -> Value {
	let rings: Vec<Value> = specs
		.iter()
		.enumerate()
		.map(|(i, (cycle, score, members))| {
			json!({
				"ring_id": format!("RING_{i:03}"),
				"pattern_type": if *cycle { "cycle" } else { "smurfing_fan_in" },
				"risk_score": score,
				"member_accounts": members,
			})
		})
		.collect();
	json!({ "fraud_rings": rings, "summary": { "fraud_rings_detected": specs.len() } })
}

fn result_set(specs: &[RingSpec]) -> ResultSet {
	ResultSet::from_value(document(specs)).unwrap()
}

proptest! {
	#[test]
	fn node_per_distinct_account(specs in ring_specs()) {
		let graph = project(result_set(&specs).rings(), &ProjectionOptions::default());

		let distinct: HashSet<&str> = specs
			.iter()
			.flat_map(|(_, _, members)| members.iter().map(String::as_str))
			.collect();
		let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		prop_assert_eq!(graph.nodes.len(), distinct.len());
		prop_assert_eq!(ids, distinct);
	}

	#[test]
	fn path_links_follow_consecutive_members(specs in ring_specs()) {
		let graph = project(result_set(&specs).rings(), &ProjectionOptions::default());

		let expected: Vec<(&str, &str)> = specs
			.iter()
			.flat_map(|(_, _, members)| {
				members.windows(2).map(|w| (w[0].as_str(), w[1].as_str()))
			})
			.collect();
		let actual: Vec<(&str, &str)> = graph
			.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect();
		prop_assert_eq!(actual, expected);
	}

	#[test]
	fn complete_links_cover_every_pair(specs in ring_specs()) {
		let options = ProjectionOptions {
			edge_policy: EdgePolicy::Complete,
			..Default::default()
		};
		let graph = project(result_set(&specs).rings(), &options);

		let expected: usize = specs
			.iter()
			.map(|(_, _, members)| members.len() * (members.len() - 1) / 2)
			.sum();
		prop_assert_eq!(graph.links.len(), expected);
	}

	#[test]
	fn first_ring_decides_node_style(specs in ring_specs()) {
		let palette = Palette::default();
		let graph = project(result_set(&specs).rings(), &ProjectionOptions::default());

		for node in &graph.nodes {
			let (first_is_cycle, _, _) = specs
				.iter()
				.find(|(_, _, members)| members.contains(&node.id))
				.unwrap();
			let style = if *first_is_cycle { &palette.high_alert } else { &palette.caution };
			prop_assert_eq!(&node.color, &style.color);
			prop_assert_eq!(node.size, style.size);
		}
	}

	#[test]
	fn summary_rows_mirror_rings(specs in ring_specs()) {
		let rows = tabulate(result_set(&specs).rings());

		prop_assert_eq!(rows.len(), specs.len());
		for (i, (row, (_, _, members))) in rows.iter().zip(&specs).enumerate() {
			prop_assert_eq!(&row.ring_id, &format!("RING_{i:03}"));
			prop_assert_eq!(row.member_count, members.len());
			prop_assert_eq!(&row.accounts, &members.join(", "));
		}
	}

	#[test]
	fn export_round_trips_received_document(specs in ring_specs()) {
		let raw = document(&specs);
		let mut session = Session::default();
		let ticket = session.begin_fetch();
		session.complete(ticket, ResultSet::from_value(raw.clone()));

		let artifact = export_artifact(&session).unwrap().unwrap();
		let parsed: Value = serde_json::from_str(&artifact.contents).unwrap();
		prop_assert_eq!(parsed, raw);
	}
}
