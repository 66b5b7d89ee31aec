//! Download of the last received engine response.

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::ExportFailure;
use crate::session::Session;

pub const EXPORT_FILE_NAME: &str = "fraud_analysis.json";
const EXPORT_MIME: &str = "application/json";
/// How long the object URL outlives the click.
const REVOKE_DELAY_MS: i32 = 1_000;

/// Serialized export, ready to hand to the browser.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportArtifact {
	pub file_name: &'static str,
	pub contents: String,
}

/// Pretty-print the raw response of the current analysis. `None` when
/// nothing has been analyzed yet.
pub fn export_artifact(session: &Session) -> Option<Result<ExportArtifact, ExportFailure>> {
	let snapshot = session.current()?;
	Some(
		serde_json::to_string_pretty(snapshot.result.raw())
			.map(|contents| ExportArtifact {
				file_name: EXPORT_FILE_NAME,
				contents,
			})
			.map_err(ExportFailure::from),
	)
}

fn browser(err: JsValue) -> ExportFailure {
	ExportFailure::Browser(format!("{err:?}"))
}

/// Offer `artifact` as a file download via a temporary object URL.
pub fn download(artifact: &ExportArtifact) -> Result<(), ExportFailure> {
	let window = web_sys::window().ok_or_else(|| ExportFailure::Browser("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| ExportFailure::Browser("no document".into()))?;

	let opts = BlobPropertyBag::new();
	opts.set_type(EXPORT_MIME);
	let parts = js_sys::Array::of1(&JsValue::from_str(&artifact.contents));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &opts).map_err(browser)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(browser)?;

	let link: HtmlAnchorElement = document
		.create_element("a")
		.map_err(browser)?
		.dyn_into()
		.map_err(|_| ExportFailure::Browser("anchor element has wrong type".into()))?;
	link.set_href(&url);
	link.set_download(artifact.file_name);

	// detached anchors are ignored by some browsers
	let body = document
		.body()
		.ok_or_else(|| ExportFailure::Browser("no body".into()))?;
	body.append_child(&link).map_err(browser)?;
	link.click();
	link.remove();

	// the download starts asynchronously; keep the URL alive until it has
	let revoke = Closure::once_into_js(move || {
		let _ = Url::revoke_object_url(&url);
	});
	window
		.set_timeout_with_callback_and_timeout_and_arguments_0(
			revoke.unchecked_ref(),
			REVOKE_DELAY_MS,
		)
		.map_err(browser)?;

	info!(
		"exported {} ({} bytes)",
		artifact.file_name,
		artifact.contents.len()
	);
	Ok(())
}
