//! Photo Preview Component
//!
//! Full-size image of the last clicked marker.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PhotoPreview() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let style = format!(
        "position: absolute; top: 100px; left: 100px; width: {}px;",
        ctx.config().preview_width
    );

    view! {
        {move || store.selected_photo_url().get().map(|url| view! {
            <img class="photo-preview" src=url alt="" style=style.clone() />
        })}
    }
}
