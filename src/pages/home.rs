use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::ring_table::{EngineStats, RingTable, SuspiciousAccountTable};
use crate::components::toolbar::Toolbar;
use crate::config::AppConfig;
use crate::engine::EngineClient;
use crate::session::Session;

/// Analysis dashboard: upload, graph, summary tables.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_else(AppConfig::from_page);
	let client = EngineClient::new(config.endpoint.clone());
	let session = RwSignal::new(Session::new(config.projection));

	// Each view reads the same snapshot, so they always change together
	let graph = Memo::new(move |_| {
		session.with(|s| s.current().map(|snap| snap.graph.clone()).unwrap_or_default())
	});
	let rows = Memo::new(move |_| {
		session.with(|s| s.current().map(|snap| snap.summary.clone()).unwrap_or_default())
	});
	let stats = Memo::new(move |_| {
		session.with(|s| s.current().and_then(|snap| snap.result.summary().cloned()))
	});
	let suspicious = Memo::new(move |_| {
		session.with(|s| {
			s.current()
				.map(|snap| snap.result.suspicious_accounts().to_vec())
				.unwrap_or_default()
		})
	});
	let has_result = Memo::new(move |_| session.with(|s| s.current().is_some()));
	let nothing_found = Memo::new(move |_| {
		session.with(|s| s.current().is_some_and(|snap| snap.result.is_empty()))
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="dashboard">
				<header class="dashboard-header">
					<h1>"Fraud Ring Explorer"</h1>
					<Toolbar client=client session=session />
				</header>

				<EngineStats summary=stats />

				<div class="graph-panel">
					<ForceGraphCanvas data=graph />
				</div>

				<Show when=move || nothing_found.get()>
					<p class="empty">"No fraud rings detected in this file."</p>
				</Show>

				<Show when=move || has_result.get()>
					<RingTable rows=rows />
					<SuspiciousAccountTable accounts=suspicious />
				</Show>
			</div>
		</ErrorBoundary>
	}
}
