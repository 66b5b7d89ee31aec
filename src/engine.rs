//! Client for the external analysis engine.

use log::{debug, info};
use reqwest::multipart::{Form, Part};
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use crate::error::FetchFailure;
use crate::rings::ResultSet;

/// A file picked by the user, already read into memory.
#[derive(Clone, Debug)]
pub struct Upload {
	pub file_name: String,
	pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct EngineClient {
	http: reqwest::Client,
	endpoint: String,
}

impl EngineClient {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			endpoint: endpoint.into(),
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// POST `upload` as the multipart field `file` and read back the rings.
	pub async fn analyze(&self, upload: Upload) -> Result<ResultSet, FetchFailure> {
		info!(
			"uploading {} ({} bytes) to {}",
			upload.file_name,
			upload.bytes.len(),
			self.endpoint
		);
		let part = Part::bytes(upload.bytes).file_name(upload.file_name);
		let form = Form::new().part("file", part);

		let response = self.http.post(&self.endpoint).multipart(form).send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?;
		debug!("engine answered {status} with {} bytes", body.len());
		read_response(status, &body)
	}
}

/// Read a browser file picked by the user into memory.
pub async fn read_upload(file: &File) -> Result<Upload, FetchFailure> {
	let buffer = JsFuture::from(file.array_buffer())
		.await
		.map_err(|err| FetchFailure::ReadUpload(format!("{err:?}")))?;
	Ok(Upload {
		file_name: file.name(),
		bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
	})
}

/// Turn a raw engine answer into a result set.
pub fn read_response(status: u16, body: &[u8]) -> Result<ResultSet, FetchFailure> {
	if !(200..300).contains(&status) {
		return Err(FetchFailure::Status { status });
	}
	ResultSet::from_slice(body)
}
