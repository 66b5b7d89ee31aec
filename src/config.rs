//! Application configuration.

use log::warn;
use serde::Deserialize;

use crate::rings::ProjectionOptions;

const DEFAULT_ENDPOINT: &str = "https://muling-detection-engine.onrender.com/analyze";
/// `<meta name=.. content='{json}'>` carrying a runtime override.
pub const CONFIG_META: &str = "fraud-ring-config";

/// `FRAUD_ENGINE_URL` at build time, else the public engine.
fn default_endpoint() -> String {
	option_env!("FRAUD_ENGINE_URL")
		.unwrap_or(DEFAULT_ENDPOINT)
		.to_string()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Analysis endpoint receiving the multipart upload.
	pub endpoint: String,
	pub projection: ProjectionOptions,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			endpoint: default_endpoint(),
			projection: ProjectionOptions::default(),
		}
	}
}

impl AppConfig {
	/// Parse a JSON config document; missing fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Apply an optional override document, falling back to defaults when it
	/// is absent, blank or unreadable.
	pub fn resolve(override_json: Option<&str>) -> Self {
		let Some(text) = override_json.map(str::trim).filter(|t| !t.is_empty()) else {
			return Self::default();
		};
		Self::from_json(text).unwrap_or_else(|err| {
			warn!("ignoring invalid {CONFIG_META} document: {err}");
			Self::default()
		})
	}

	/// Configuration for the running page, read from the [`CONFIG_META`] tag.
	pub fn from_page() -> Self {
		let content = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| {
				d.query_selector(&format!("meta[name=\"{CONFIG_META}\"]"))
					.ok()
					.flatten()
			})
			.and_then(|meta| meta.get_attribute("content"));
		Self::resolve(content.as_deref())
	}
}
