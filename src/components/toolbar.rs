use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use web_sys::{Event, File, HtmlInputElement};

use crate::engine::{EngineClient, read_upload};
use crate::error::FetchFailure;
use crate::export::{download, export_artifact};
use crate::rings::EdgePolicy;
use crate::session::{Completion, Session};

fn notify(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Send `file` to the engine and install the answer if it is still the latest request.
async fn analyze_file(client: EngineClient, session: RwSignal<Session>, file: File) {
	let Some(ticket) = session.try_update(Session::begin_fetch) else {
		return;
	};
	info!("request #{} sends {} to {}", ticket.seq(), file.name(), client.endpoint());
	let outcome: Result<_, FetchFailure> = match read_upload(&file).await {
		Ok(upload) => client.analyze(upload).await,
		Err(failure) => Err(failure),
	};
	match session.try_update(|s| s.complete(ticket, outcome)) {
		Some(Completion::Failed(failure)) => notify(&failure.notice()),
		Some(Completion::Installed { version }) => info!("showing analysis v{version}"),
		_ => {}
	}
}

fn export_current(session: RwSignal<Session>) {
	let Some(artifact) = session.with_untracked(export_artifact) else {
		return;
	};
	if let Err(err) = artifact.and_then(|a| download(&a)) {
		warn!("export failed: {err}");
		notify(&format!("Export failed: {err}"));
	}
}

/// Upload control, edge policy switch and export button.
#[component]
pub fn Toolbar(client: EngineClient, session: RwSignal<Session>) -> impl IntoView {
	let pending = Memo::new(move |_| session.with(Session::is_pending));
	let has_result = Memo::new(move |_| session.with(|s| s.current().is_some()));
	let policy = Memo::new(move |_| session.with(|s| s.options().edge_policy));

	let engine_hint = format!("Analyzed by {}", client.endpoint());
	let on_file = move |ev: Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		spawn_local(analyze_file(client.clone(), session, file));
	};

	let on_policy = move |ev: Event| match EdgePolicy::parse(&event_target_value(&ev)) {
		Some(p) => session.update(|s| s.set_edge_policy(p)),
		None => warn!("unknown edge policy {:?}", event_target_value(&ev)),
	};

	view! {
		<div class="toolbar">
			<input type="file" accept=".csv" title=engine_hint on:change=on_file />
			<select on:change=on_policy>
				<option value="path" selected=move || policy.get() == EdgePolicy::Path>
					"Consecutive links"
				</option>
				<option value="complete" selected=move || policy.get() == EdgePolicy::Complete>
					"All pairs"
				</option>
			</select>
			<Show when=move || pending.get()>
				<span class="pending">"Analyzing..."</span>
			</Show>
			<Show when=move || has_result.get()>
				<button on:click=move |_| export_current(session)>"Export JSON"</button>
			</Show>
		</div>
	}
}
