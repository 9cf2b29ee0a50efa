//! Application Configuration
//!
//! Defaults match the local development service. Deployments override
//! them at build time through `PHOTO_GLOBE_*` environment variables.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";
pub const DEFAULT_MAX_IMAGES: usize = 69;
pub const DEFAULT_FETCH_FIRST: u32 = 100;
pub const DEFAULT_GLOBE_IMAGE_URL: &str = "//unpkg.com/three-globe/example/img/earth-blue-marble.jpg";
pub const DEFAULT_PREVIEW_WIDTH: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GraphQL endpoint for reads and creation requests
    pub endpoint: String,
    /// Sent as `x-api-key`; empty unless configured
    pub api_key: String,
    /// Upper bound on selected images
    pub max_images: usize,
    /// How many photo records the loader requests
    pub fetch_first: u32,
    pub globe_image_url: String,
    /// Preview overlay width in px
    pub preview_width: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            max_images: DEFAULT_MAX_IMAGES,
            fetch_first: DEFAULT_FETCH_FIRST,
            globe_image_url: DEFAULT_GLOBE_IMAGE_URL.to_string(),
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

impl AppConfig {
    /// Config baked in at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("PHOTO_GLOBE_ENDPOINT"),
            option_env!("PHOTO_GLOBE_API_KEY"),
            option_env!("PHOTO_GLOBE_MAX_IMAGES"),
        )
    }

    fn from_values(endpoint: Option<&str>, api_key: Option<&str>, max_images: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            config.endpoint = endpoint.to_string();
        }
        if let Some(key) = api_key {
            config.api_key = key.to_string();
        }
        // Unparseable or zero limits keep the default
        if let Some(max) = max_images.and_then(|m| m.trim().parse::<usize>().ok()).filter(|m| *m > 0) {
            config.max_images = max;
        }
        config
    }
}
