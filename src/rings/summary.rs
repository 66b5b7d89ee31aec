//! Tabular view of a result set: one display row per ring.

use super::record::RingRecord;

/// One table row per ring.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
	pub ring_id: String,
	pub pattern_type: String,
	/// Already formatted, e.g. `85%`.
	pub risk_score: String,
	pub member_count: usize,
	/// Member accounts joined with `", "`.
	pub accounts: String,
}

/// Row-per-ring view, in input order.
pub fn tabulate(rings: &[RingRecord]) -> Vec<SummaryRow> {
	rings
		.iter()
		.map(|ring| SummaryRow {
			ring_id: ring.ring_id.to_string(),
			pattern_type: ring.pattern_type.to_string(),
			risk_score: format!("{}%", ring.risk_score),
			member_count: ring.member_accounts.len(),
			accounts: ring
				.member_accounts
				.iter()
				.map(|a| a.as_str())
				.collect::<Vec<_>>()
				.join(", "),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rings::ResultSet;
	use serde_json::json;

	#[test]
	fn one_row_per_ring_in_order() {
		let set = ResultSet::from_value(json!({"fraud_rings": [
			{"ring_id": 1, "pattern_type": "cycle", "risk_score": 92, "member_accounts": ["A", "B", "C"]},
			{"ring_id": 2, "pattern_type": "other", "risk_score": 40.5, "member_accounts": ["C", "D"]},
			{"ring_id": "RING_S_X", "pattern_type": "other", "risk_score": 40, "member_accounts": ["C", "D"]}
		]}))
		.unwrap();
		let rows = tabulate(set.rings());

		assert_eq!(rows.len(), 3);
		assert_eq!(
			rows[0],
			SummaryRow {
				ring_id: "1".into(),
				pattern_type: "cycle".into(),
				risk_score: "92%".into(),
				member_count: 3,
				accounts: "A, B, C".into(),
			}
		);
		assert_eq!(rows[1].risk_score, "40.5%");
		assert_eq!(rows[2].ring_id, "RING_S_X");
		// identical rings are not merged
		assert_eq!(rows[1].accounts, rows[2].accounts);
	}

	#[test]
	fn empty_input_gives_no_rows() {
		assert!(tabulate(&[]).is_empty());
	}
}
