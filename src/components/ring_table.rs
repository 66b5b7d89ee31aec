use leptos::prelude::*;

use crate::rings::{EngineSummary, SummaryRow, SuspiciousAccount};

/// Row-per-ring summary table.
#[component]
pub fn RingTable(#[prop(into)] rows: Signal<Vec<SummaryRow>>) -> impl IntoView {
	view! {
		<h3>"Fraud Ring Summary Table"</h3>
		<table class="data-table">
			<thead>
				<tr>
					<th>"Ring ID"</th>
					<th>"Pattern Type"</th>
					<th>"Risk Score"</th>
					<th>"Member Count"</th>
					<th>"Accounts"</th>
				</tr>
			</thead>
			<tbody>
				{move || {
					rows.get()
						.into_iter()
						.map(|row| {
							view! {
								<tr>
									<td>{row.ring_id}</td>
									<td>{row.pattern_type}</td>
									<td>{row.risk_score}</td>
									<td>{row.member_count}</td>
									<td class="accounts">{row.accounts}</td>
								</tr>
							}
						})
						.collect_view()
				}}
			</tbody>
		</table>
	}
}

/// Per-account findings, in the order the engine ranked them.
#[component]
pub fn SuspiciousAccountTable(
	#[prop(into)] accounts: Signal<Vec<SuspiciousAccount>>,
) -> impl IntoView {
	view! {
		<Show when=move || !accounts.with(Vec::is_empty)>
			<h3>"Suspicious Accounts"</h3>
			<table class="data-table">
				<thead>
					<tr>
						<th>"Account"</th>
						<th>"Suspicion Score"</th>
						<th>"Patterns"</th>
						<th>"Ring"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						accounts
							.get()
							.into_iter()
							.map(|acc| {
								let ring = acc.ring_id.map(|r| r.to_string()).unwrap_or_default();
								view! {
									<tr>
										<td>{acc.account_id.to_string()}</td>
										<td>{acc.suspicion_score}</td>
										<td>{acc.detected_patterns.join(", ")}</td>
										<td>{ring}</td>
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>
		</Show>
	}
}

/// Engine run statistics strip.
#[component]
pub fn EngineStats(#[prop(into)] summary: Signal<Option<EngineSummary>>) -> impl IntoView {
	move || {
		summary.get().map(|s| {
			view! {
				<div class="engine-stats">
					<span>"Accounts analyzed: " {s.total_accounts_analyzed}</span>
					<span>"Flagged: " {s.suspicious_accounts_flagged}</span>
					<span>"Rings: " {s.fraud_rings_detected}</span>
					<span>{format!("Processed in {:.3}s", s.processing_time_seconds)}</span>
				</div>
			}
		})
	}
}
