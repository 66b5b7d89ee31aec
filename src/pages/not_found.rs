use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! { <h1>"Nothing to see here."</h1> <a href="/">"Back to the dashboard"</a> }
}
