//! Failure types for the engine round-trip and the export download.

use thiserror::Error;

/// The analysis call did not produce a usable result set.
#[derive(Error, Debug)]
pub enum FetchFailure {
	/// Transport-level failure (DNS, CORS, connection reset, ...).
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	/// The engine answered with a non-success status.
	#[error("engine responded with status {status}")]
	Status { status: u16 },

	/// The body is not the expected `{ fraud_rings: [...] }` document.
	#[error("malformed response body: {0}")]
	Malformed(#[from] serde_json::Error),

	/// The body parsed but a ring breaks the data model.
	#[error("ring #{index} is invalid: {reason}")]
	InvalidRing { index: usize, reason: String },

	/// The browser could not read the selected file.
	#[error("could not read upload: {0}")]
	ReadUpload(String),
}

impl FetchFailure {
	/// Text for the blocking notification shown to the user.
	pub fn notice(&self) -> String {
		match self {
			FetchFailure::Network(_) => {
				"Network Error: check that the analysis engine is running!".to_string()
			}
			other => format!("Analysis failed: {other}"),
		}
	}
}

/// Offering the export artifact failed.
#[derive(Error, Debug)]
pub enum ExportFailure {
	#[error("could not serialize result set: {0}")]
	Serialize(#[from] serde_json::Error),

	#[error("browser refused the download: {0}")]
	Browser(String),
}
