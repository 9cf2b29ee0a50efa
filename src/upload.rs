//! Upload Widget State
//!
//! The locally selected images and the per-image upload state machine.
//! List edits always commit immediately; the remote outcome only moves
//! the affected image's status.

use crate::api::PhotoGateway;
use crate::error::{AppError, Result};
use crate::metadata;
use crate::models::{Photo, PhotoCreateInput};

/// Lifecycle of one selected image
///
/// `Idle -> Submitting -> Committed | Failed`, and `Failed -> Submitting` on retry.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Idle,
    Submitting,
    Committed { photo_id: String },
    Failed { reason: String },
}

impl UploadStatus {
    pub fn can_transition_to(&self, next: &UploadStatus) -> bool {
        matches!(
            (self, next),
            (UploadStatus::Idle, UploadStatus::Submitting)
                | (UploadStatus::Failed { .. }, UploadStatus::Submitting)
                | (UploadStatus::Submitting, UploadStatus::Committed { .. })
                | (UploadStatus::Submitting, UploadStatus::Failed { .. })
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "",
            UploadStatus::Submitting => "Uploading…",
            UploadStatus::Committed { .. } => "Saved",
            UploadStatus::Failed { .. } => "Failed",
        }
    }
}

/// An image read from disk, before it joins the list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub data_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    /// Stable across index shifts; a replaced image gets a new key
    pub key: u64,
    pub file_name: String,
    pub data_url: String,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
}

/// Indices touched by one add or update
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub kind: ChangeKind,
    pub indices: Vec<usize>,
}

impl ChangeSet {
    /// The image to submit: the first changed index, 0 if none was reported
    pub fn target_index(&self) -> usize {
        self.indices.first().copied().unwrap_or(0)
    }
}

/// Bounded list of selected images
#[derive(Debug, Clone, PartialEq)]
pub struct ImageList {
    images: Vec<PendingImage>,
    max: usize,
    next_key: u64,
}

impl ImageList {
    pub fn new(max: usize) -> Self {
        Self {
            images: Vec::new(),
            max,
            next_key: 1,
        }
    }

    pub fn images(&self) -> &[PendingImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn get(&self, index: usize) -> Option<&PendingImage> {
        self.images.get(index)
    }

    fn pending(&mut self, selected: SelectedImage) -> PendingImage {
        let key = self.next_key;
        self.next_key += 1;
        PendingImage {
            key,
            file_name: selected.file_name,
            data_url: selected.data_url,
            status: UploadStatus::Idle,
        }
    }

    /// Append a batch. A batch that would overflow the bound is rejected whole.
    pub fn add(&mut self, selected: Vec<SelectedImage>) -> Result<ChangeSet> {
        if self.images.len() + selected.len() > self.max {
            return Err(AppError::TooManyImages { max: self.max });
        }
        let start = self.images.len();
        for image in selected {
            let pending = self.pending(image);
            self.images.push(pending);
        }
        Ok(ChangeSet {
            kind: ChangeKind::Added,
            indices: (start..self.images.len()).collect(),
        })
    }

    /// Replace the image at `index`. The replacement starts over as `Idle`.
    pub fn update(&mut self, index: usize, selected: SelectedImage) -> Result<ChangeSet> {
        if index >= self.images.len() {
            return Err(AppError::ImageIndexOutOfRange { index, len: self.images.len() });
        }
        self.images[index] = self.pending(selected);
        Ok(ChangeSet {
            kind: ChangeKind::Updated,
            indices: vec![index],
        })
    }

    pub fn remove(&mut self, index: usize) -> Result<PendingImage> {
        if index >= self.images.len() {
            return Err(AppError::ImageIndexOutOfRange { index, len: self.images.len() });
        }
        Ok(self.images.remove(index))
    }

    /// Returns how many images were dropped
    pub fn remove_all(&mut self) -> usize {
        let removed = self.images.len();
        self.images.clear();
        removed
    }

    /// Image a change set should submit. `None` when the change touched nothing.
    pub fn target(&self, changes: &ChangeSet) -> Option<&PendingImage> {
        if changes.indices.is_empty() {
            return None;
        }
        self.images.get(changes.target_index())
    }

    /// Move the image with `key` to `next`. False if the image is gone or the
    /// transition isn't allowed.
    pub fn set_status(&mut self, key: u64, next: UploadStatus) -> bool {
        match self.images.iter_mut().find(|image| image.key == key) {
            Some(image) if image.status.can_transition_to(&next) => {
                image.status = next;
                true
            }
            _ => false,
        }
    }

    pub fn mark_submitting(&mut self, key: u64) -> bool {
        self.set_status(key, UploadStatus::Submitting)
    }

    pub fn mark_committed(&mut self, key: u64, photo_id: String) -> bool {
        self.set_status(key, UploadStatus::Committed { photo_id })
    }

    pub fn mark_failed(&mut self, key: u64, reason: String) -> bool {
        self.set_status(key, UploadStatus::Failed { reason })
    }
}

/// Extract the image's GPS position and send a creation request for it.
pub async fn submit_image<G: PhotoGateway + ?Sized>(gateway: &G, image: &PendingImage) -> Result<Photo> {
    let coords = metadata::extract_gps(&image.data_url)?;
    let input = PhotoCreateInput {
        latitude: coords.latitude,
        longitude: coords.longitude,
        url: image.data_url.clone(),
    };
    gateway.create_photo(&input).await
}
