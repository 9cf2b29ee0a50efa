//! Notice Bar Component
//!
//! Shows recoverable errors until they time out or are dismissed, plus
//! the tail of the activity log.

use std::time::Duration;

use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let store = use_app_store();
    let (show_log, set_show_log) = signal(false);

    view! {
        <div class="notice-bar">
            {move || {
                let notices = store.notices().read().notices().to_vec();
                notices.into_iter().map(|notice| {
                    let id = notice.id;
                    view! {
                        <div class="notice" role="alert">
                            <strong class="notice-title">{notice.error.title()}</strong>
                            <span class="notice-message">{notice.error.to_string()}</span>
                            <button class="notice-dismiss" on:click=move |_| store_dismiss_notice(store, id)>
                                "×"
                            </button>
                        </div>
                    }
                }).collect_view()
            }}

            <button class="activity-toggle" on:click=move |_| set_show_log.update(|v| *v = !*v)>
                {move || if show_log.get() { "Hide activity" } else { "Show activity" }}
            </button>
            <Show when=move || show_log.get()>
                <ActivityLog />
            </Show>
        </div>
    }
}

/// How often the open activity log picks up new lines
const ACTIVITY_REFRESH: Duration = Duration::from_secs(1);

/// Tail of the rolling log, polled while mounted
#[component]
fn ActivityLog() -> impl IntoView {
    let (lines, set_lines) = signal(rolling_logger::recent_lines());

    match set_interval_with_handle(
        move || set_lines.set(rolling_logger::recent_lines()),
        ACTIVITY_REFRESH,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::warn!("[NoticeBar] Activity log will not refresh: {:?}", e),
    }

    view! {
        <pre class="activity-log">{move || lines.get().join("\n")}</pre>
    }
}
