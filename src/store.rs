//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::Photo;
use crate::upload::ImageList;

/// How long a notice stays up unless dismissed
const NOTICE_TIMEOUT_MS: u32 = 8_000;

/// A failure shown to the user
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub error: AppError,
}

/// Visible notices, newest last
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeLog {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeLog {
    pub fn push(&mut self, error: AppError) -> u64 {
        self.next_id += 1;
        self.notices.push(Notice { id: self.next_id, error });
        self.next_id
    }

    /// Unknown ids are ignored
    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// Last successfully loaded collection. Markers are projected from this alone.
    pub photos: Vec<Photo>,
    /// Images picked in the upload widget
    pub images: ImageList,
    /// Image shown in the preview overlay
    pub selected_photo_url: Option<String>,
    pub notices: NoticeLog,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            photos: Vec::new(),
            images: ImageList::new(config.max_images),
            selected_photo_url: None,
            notices: NoticeLog::default(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show an error to the user; it clears itself after a while
pub fn store_push_notice(store: AppStore, error: AppError) {
    log::warn!("[Notice] {}", error);
    let id = store.notices().write().push(error);
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
        store.notices().write().dismiss(id);
    });
}

pub fn store_dismiss_notice(store: AppStore, id: u64) {
    store.notices().write().dismiss(id);
}

/// Marker click: show this photo in the preview
pub fn store_select_photo(store: AppStore, url: String) {
    store.selected_photo_url().set(Some(url));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_response;
    use crate::error::MetadataError;
    use crate::markers::build_markers;
    use crate::models::PhotoCollectionData;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_state_is_empty() {
        let state = AppState::new(&AppConfig::default());
        assert!(state.photos.is_empty());
        assert!(state.images.is_empty());
        assert_eq!(state.images.max(), 69);
        assert_eq!(state.selected_photo_url, None);
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_notice_ids_are_unique_and_dismissable() {
        let mut log = NoticeLog::default();
        let first = log.push(AppError::Network("offline".into()));
        let second = log.push(AppError::Metadata(MetadataError::NoGpsData));
        assert_ne!(first, second);

        log.dismiss(first);
        assert_eq!(log.notices().len(), 1);
        assert_eq!(log.notices()[0].id, second);

        log.dismiss(999);
        assert_eq!(log.notices().len(), 1);
    }

    #[test]
    fn test_clicked_marker_selects_its_photo() {
        let owner = Owner::new();
        owner.set();

        let body = r#"{"data":{"photoCollection":{"edges":[{"node":{"id":"1","latitude":10,"longitude":20,"url":"img1"}}]}}}"#;
        let data: PhotoCollectionData = decode_response(200, body).unwrap();
        let store = Store::new(AppState::new(&AppConfig::default()));
        store.photos().set(data.photo_collection.into_photos());

        let photos = store.photos().get_untracked();
        let mut rng = SmallRng::seed_from_u64(3);
        let markers = build_markers(&photos, &mut rng);
        assert_eq!(markers.len(), 1);
        assert_eq!((markers[0].lat, markers[0].lng), (10.0, 20.0));
        assert_eq!(store.selected_photo_url().get_untracked(), None);

        store_select_photo(store, markers[0].url.clone());
        assert_eq!(store.selected_photo_url().get_untracked(), Some("img1".to_string()));
    }
}
