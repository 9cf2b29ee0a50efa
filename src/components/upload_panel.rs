//! Upload Panel Component
//!
//! Image picker with click-to-select and drag-and-drop. Every add or
//! update submits the affected image to the photo service.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    create_file_drop_signals, files_from_list, make_on_dragenter, make_on_dragleave,
    make_on_dragover, make_on_drop,
};
use web_sys::File;

use crate::api::GraphqlGateway;
use crate::context::AppContext;
use crate::error::Result;
use crate::files;
use crate::store::{store_push_notice, use_app_store, AppStateStoreFields, AppStore};
use crate::upload::{self, ChangeSet, ImageList, PendingImage, UploadStatus};

fn status_class(status: &UploadStatus) -> &'static str {
    match status {
        UploadStatus::Idle => "upload-status idle",
        UploadStatus::Submitting => "upload-status submitting",
        UploadStatus::Committed { .. } => "upload-status committed",
        UploadStatus::Failed { .. } => "upload-status failed",
    }
}

/// Commit a list edit, then submit the image it targets.
/// The edit stands whatever happens to the submission.
fn commit_and_submit<F>(store: AppStore, ctx: AppContext, change: F)
where
    F: FnOnce(&mut ImageList) -> Result<ChangeSet>,
{
    let outcome = {
        let field = store.images();
        let mut images = field.write();
        change(&mut *images).map(|changes| images.target(&changes).cloned())
    };
    match outcome {
        Ok(Some(image)) => submit(store, ctx, image),
        Ok(None) => {}
        Err(e) => store_push_notice(store, e),
    }
}

/// Extract the image's location and create its photo record in the background
fn submit(store: AppStore, ctx: AppContext, image: PendingImage) {
    let started = store.images().write().mark_submitting(image.key);
    if !started {
        log::debug!("[Upload] {} is not ready to submit", image.file_name);
        return;
    }
    log::info!("[Upload] Submitting {}", image.file_name);

    spawn_local(async move {
        let gateway = GraphqlGateway::new(ctx.config());
        match upload::submit_image(&gateway, &image).await {
            Ok(photo) => {
                log::info!("[Upload] Created photo {} from {}", photo.id, image.file_name);
                let recorded = store.images().write().mark_committed(image.key, photo.id);
                if !recorded {
                    log::debug!("[Upload] {} was removed before it finished", image.file_name);
                }
                // The loaded collection no longer matches the server
                ctx.reload();
            }
            Err(e) => {
                log::warn!("[Upload] {} failed: {}", image.file_name, e);
                store.images().write().mark_failed(image.key, e.to_string());
                store_push_notice(store, e);
            }
        }
    });
}

/// Upload widget: picker, drop target and the selected image list
#[component]
pub fn UploadPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let max_images = ctx.config().max_images;
    let dnd = create_file_drop_signals();
    let file_input = NodeRef::<leptos::html::Input>::new();
    // Image the next pick replaces (None = add)
    let (update_index, set_update_index) = signal(None::<usize>);

    let on_files = move |files: Vec<File>, target: Option<usize>| {
        spawn_local(async move {
            let (selected, errors) = files::read_all(files).await;
            for e in errors {
                store_push_notice(store, e);
            }
            match target {
                Some(index) => {
                    if let Some(image) = selected.into_iter().next() {
                        commit_and_submit(store, ctx, move |list| list.update(index, image));
                    }
                }
                None => {
                    if !selected.is_empty() {
                        commit_and_submit(store, ctx, move |list| list.add(selected));
                    }
                }
            }
        });
    };

    let open_picker = move |index: Option<usize>| {
        set_update_index.set(index);
        if let Some(input) = file_input.get_untracked() {
            input.set_multiple(index.is_none());
            input.click();
        }
    };

    let on_input_change = move |_ev: web_sys::Event| {
        let Some(input) = file_input.get_untracked() else { return };
        let files = input.files().map(|list| files_from_list(&list)).unwrap_or_default();
        // Lets the same file be picked again
        input.set_value("");
        let target = update_index.get_untracked();
        set_update_index.set(None);
        if !files.is_empty() {
            on_files(files, target);
        }
    };

    let remove_image = move |index: usize| {
        let removed = store.images().write().remove(index);
        match removed {
            Ok(image) => log::info!("[Upload] Removed {}", image.file_name),
            Err(e) => store_push_notice(store, e),
        }
    };

    let remove_all = move |_: web_sys::MouseEvent| {
        let removed = store.images().write().remove_all();
        log::info!("[Upload] Removed all {} images", removed);
    };

    view! {
        <div class="upload__image-wrapper">
            <input
                type="file"
                accept="image/*"
                multiple=true
                style="display: none;"
                node_ref=file_input
                on:change=on_input_change
            />
            <button
                class="upload-drop-btn"
                style=move || if dnd.dragging_read.get() { "color: red;" } else { "" }
                on:click=move |_| open_picker(None)
                on:dragenter=make_on_dragenter(dnd)
                on:dragover=make_on_dragover(dnd)
                on:dragleave=make_on_dragleave(dnd)
                on:drop=make_on_drop(dnd, move |files| on_files(files, None))
            >
                "Click or Drop here"
            </button>
            " "
            <button class="upload-clear-btn" on:click=remove_all>"Remove all images"</button>
            <span class="image-count">
                {move || format!("{} / {}", store.images().read().len(), max_images)}
            </span>

            {move || {
                let images = store.images().read().images().to_vec();
                images.into_iter().enumerate().map(|(index, image)| {
                    let failure = match &image.status {
                        UploadStatus::Failed { reason } => Some(reason.clone()),
                        _ => None,
                    };
                    let retry_image = image.clone();
                    view! {
                        <div class="image-item">
                            <img src=image.data_url.clone() alt=image.file_name.clone() width="100" />
                            <span class=status_class(&image.status) title=failure.clone().unwrap_or_default()>
                                {image.status.label()}
                            </span>
                            <div class="image-item__btn-wrapper">
                                <button on:click=move |_| open_picker(Some(index))>"Update"</button>
                                <button on:click=move |_| remove_image(index)>"Remove"</button>
                                {failure.map(|_| view! {
                                    <button on:click=move |_| submit(store, ctx, retry_image.clone())>
                                        "Retry"
                                    </button>
                                })}
                            </div>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}
