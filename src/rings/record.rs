use std::fmt;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchFailure;

/// Ring identifier as sent by the engine: either text (`"RING_C_001"`) or a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RingId {
	Number(serde_json::Number),
	Text(String),
}

impl fmt::Display for RingId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RingId::Number(n) => write!(f, "{n}"),
			RingId::Text(s) => f.write_str(s),
		}
	}
}

/// Structural classification of a ring. Only `cycle` is singled out; anything
/// else keeps its original label for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatternType {
	Cycle,
	Other(String),
}

impl PatternType {
	/// Whether this is the high-alert classification.
	pub fn is_cycle(&self) -> bool {
		matches!(self, PatternType::Cycle)
	}

	/// Label as it appeared on the wire.
	pub fn as_str(&self) -> &str {
		match self {
			PatternType::Cycle => "cycle",
			PatternType::Other(label) => label,
		}
	}
}

impl From<String> for PatternType {
	fn from(label: String) -> Self {
		if label == "cycle" {
			PatternType::Cycle
		} else {
			PatternType::Other(label)
		}
	}
}

impl From<PatternType> for String {
	fn from(pattern: PatternType) -> Self {
		match pattern {
			PatternType::Cycle => "cycle".to_string(),
			PatternType::Other(label) => label,
		}
	}
}

impl fmt::Display for PatternType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Account identifier. Engines fed numeric CSV ids send integers, which are
/// kept as their decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "AccountRepr")]
pub struct AccountId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum AccountRepr {
	Text(String),
	Number(serde_json::Number),
}

impl From<AccountRepr> for AccountId {
	fn from(repr: AccountRepr) -> Self {
		match repr {
			AccountRepr::Text(s) => AccountId(s),
			AccountRepr::Number(n) => AccountId(n.to_string()),
		}
	}
}

impl AccountId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for AccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One detected fraud ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingRecord {
	pub ring_id: RingId,
	pub pattern_type: PatternType,
	/// Percentage, 0 to 100 inclusive.
	pub risk_score: f64,
	/// Ordered; consecutive members become links.
	pub member_accounts: Vec<AccountId>,
}

impl RingRecord {
	fn check(&self, index: usize) -> Result<(), FetchFailure> {
		let invalid = |reason: String| FetchFailure::InvalidRing { index, reason };
		if self.member_accounts.is_empty() {
			return Err(invalid("no member accounts".into()));
		}
		if !self.risk_score.is_finite() || !(0.0..=100.0).contains(&self.risk_score) {
			return Err(invalid(format!(
				"risk score {} outside 0-100",
				self.risk_score
			)));
		}
		Ok(())
	}
}

/// Engine run statistics, when the engine reports them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSummary {
	pub total_accounts_analyzed: u64,
	pub suspicious_accounts_flagged: u64,
	pub fraud_rings_detected: u64,
	pub processing_time_seconds: f64,
}

/// Per-account finding reported alongside the rings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
	pub account_id: AccountId,
	pub suspicion_score: f64,
	#[serde(default)]
	pub detected_patterns: Vec<String>,
	pub ring_id: Option<RingId>,
}

#[derive(Deserialize)]
struct AnalysisResponse {
	fraud_rings: Vec<RingRecord>,
	#[serde(default)]
	suspicious_accounts: Option<Value>,
	#[serde(default)]
	summary: Option<Value>,
}

/// Read an auxiliary section; a section that does not fit is dropped, never fatal.
fn lenient<T: DeserializeOwned>(section: &str, value: Option<Value>) -> Option<T> {
	match serde_json::from_value(value?) {
		Ok(parsed) => Some(parsed),
		Err(err) => {
			warn!("ignoring unreadable `{section}` section: {err}");
			None
		}
	}
}

/// Everything one analysis call returned: the typed rings plus the raw
/// document they were read from, kept for verbatim export.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSet {
	rings: Vec<RingRecord>,
	suspicious_accounts: Vec<SuspiciousAccount>,
	summary: Option<EngineSummary>,
	raw: Value,
}

impl ResultSet {
	/// Parse a response body.
	pub fn from_slice(body: &[u8]) -> Result<Self, FetchFailure> {
		let raw: Value = serde_json::from_slice(body)?;
		Self::from_value(raw)
	}

	/// Type-check an already decoded response document.
	pub fn from_value(raw: Value) -> Result<Self, FetchFailure> {
		let response = AnalysisResponse::deserialize(&raw)?;
		for (index, ring) in response.fraud_rings.iter().enumerate() {
			ring.check(index)?;
		}
		Ok(Self {
			rings: response.fraud_rings,
			suspicious_accounts: lenient("suspicious_accounts", response.suspicious_accounts)
				.unwrap_or_default(),
			summary: lenient("summary", response.summary),
			raw,
		})
	}

	/// Rings in engine order.
	pub fn rings(&self) -> &[RingRecord] {
		&self.rings
	}

	pub fn suspicious_accounts(&self) -> &[SuspiciousAccount] {
		&self.suspicious_accounts
	}

	pub fn summary(&self) -> Option<&EngineSummary> {
		self.summary.as_ref()
	}

	/// The response document exactly as received.
	pub fn raw(&self) -> &Value {
		&self.raw
	}

	pub fn is_empty(&self) -> bool {
		self.rings.is_empty()
	}
}
