//! UI Components
//!
//! Leptos components making up the single page.

mod globe_view;
mod notice_bar;
mod photo_preview;
mod upload_panel;

pub use globe_view::GlobeView;
pub use notice_bar::NoticeBar;
pub use photo_preview::PhotoPreview;
pub use upload_panel::UploadPanel;
