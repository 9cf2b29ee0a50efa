//! Globe Markers
//!
//! Projects the loaded photo collection into marker descriptors for the
//! globe. Each render draws a fresh size and tint per marker.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Photo;

pub const MIN_MARKER_SIZE: f64 = 7.0;
pub const MARKER_SIZE_SPAN: f64 = 30.0;

/// Upper end of the tint draw. Rounding a draw in [0, 3) gives indices 0..=3,
/// one more than the palette holds.
const TINT_DRAW_SPAN: f64 = 3.0;

/// Teardrop pin, tinted through `currentColor`
pub const MARKER_SVG: &str = r#"<svg viewBox="-4 0 36 36">
    <path fill="currentColor" d="M14,0 C21.732,0 28,5.641 28,12.6 C28,23.963 14,36 14,36 C14,36 0,24.064 0,12.6 C0,5.641 6.268,0 14,0 Z"></path>
    <circle fill="black" cx="14" cy="14" r="7"></circle>
  </svg>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    White,
    Green,
}

impl MarkerColor {
    pub const PALETTE: [MarkerColor; 3] = [MarkerColor::Red, MarkerColor::White, MarkerColor::Green];

    /// Palette entry, or `None` past the end (marker keeps its inherited color)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::PALETTE.get(index).copied()
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::White => "white",
            MarkerColor::Green => "green",
        }
    }
}

/// One pin on the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Pin width in px, in [7, 37)
    pub size: f64,
    pub color: Option<MarkerColor>,
    pub url: String,
}

/// Size for a draw in [0, 1). Draws next to 1 round up to 37, so they are
/// pulled back under the bound.
pub fn marker_size(sample: f64) -> f64 {
    let upper = MIN_MARKER_SIZE + MARKER_SIZE_SPAN;
    let size = MIN_MARKER_SIZE + sample * MARKER_SIZE_SPAN;
    if size < upper {
        size
    } else {
        // Largest f64 below the bound
        f64::from_bits(upper.to_bits() - 1)
    }
}

/// Palette index for a draw in [0, 1). Can be 3.
pub fn tint_index(sample: f64) -> usize {
    (sample * TINT_DRAW_SPAN).round() as usize
}

pub fn marker_for<R: Rng>(photo: &Photo, rng: &mut R) -> Marker {
    let size = marker_size(rng.gen::<f64>());
    let color = MarkerColor::from_index(tint_index(rng.gen::<f64>()));
    Marker {
        id: photo.id.clone(),
        lat: photo.latitude,
        lng: photo.longitude,
        size,
        color,
        url: photo.url.clone(),
    }
}

/// One marker per photo, in collection order
pub fn build_markers<R: Rng>(photos: &[Photo], rng: &mut R) -> Vec<Marker> {
    photos.iter().map(|photo| marker_for(photo, rng)).collect()
}
