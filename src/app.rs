//! Photo Globe App
//!
//! Main application component: upload widget, globe and preview.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{GlobeView, NoticeBar, PhotoPreview, UploadPanel};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{store_push_notice, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    log::info!("[App] Using photo service at {}", config.endpoint);

    // State
    let store = Store::new(AppState::new(&config));
    let ctx = AppContext::new(signal(0u32), config);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load photos on mount and whenever the collection is invalidated
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        let config = ctx.config();
        log::info!("[App] Loading photos, trigger={}", trigger);
        spawn_local(async move {
            match api::list_photos(&config).await {
                // A newer load owns the collection now
                Ok(_) if !ctx.is_current(trigger) => {
                    log::debug!("[App] Dropping stale load, trigger={}", trigger);
                }
                Ok(photos) => {
                    log::info!("[App] Loaded {} photos", photos.len());
                    store.photos().set(photos);
                }
                // Keep whatever was loaded before
                Err(e) => store_push_notice(store, e),
            }
        });
    });

    view! {
        <div class="App">
            <UploadPanel />
            <NoticeBar />
            <GlobeView />
            <PhotoPreview />
        </div>
    }
}
