//! Photo Queries
//!
//! Read and create operations against the photo collection.

use async_trait::async_trait;
use serde::Serialize;

use super::{graphql_request, PhotoGateway};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Photo, PhotoCollectionData, PhotoCreateData, PhotoCreateInput};

pub const GET_ALL_PHOTOS_QUERY: &str = r#"
    query GetAllPhotos($first: Int!) {
        photoCollection(first: $first) {
            edges {
                node {
                    id
                    latitude
                    longitude
                    url
                }
            }
        }
    }
"#;

pub const CREATE_PHOTO_MUTATION: &str = r#"
    mutation PhotoCreate($input: PhotoCreateInput!) {
        photoCreate(input: $input) {
            photo {
                url
                latitude
                longitude
                id
            }
        }
    }
"#;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct GetAllPhotosArgs {
    first: u32,
}

#[derive(Serialize)]
struct PhotoCreateArgs<'a> {
    input: &'a PhotoCreateInput,
}

// ========================
// Commands
// ========================

/// First `config.fetch_first` photos, no cursor handling
pub async fn list_photos(config: &AppConfig) -> Result<Vec<Photo>> {
    let args = GetAllPhotosArgs { first: config.fetch_first };
    let data: PhotoCollectionData = graphql_request(config, GET_ALL_PHOTOS_QUERY, args).await?;
    Ok(data.photo_collection.into_photos())
}

pub async fn create_photo(config: &AppConfig, input: &PhotoCreateInput) -> Result<Photo> {
    let data: PhotoCreateData = graphql_request(config, CREATE_PHOTO_MUTATION, PhotoCreateArgs { input }).await?;
    Ok(data.photo_create.photo)
}

/// Live gateway talking to the configured GraphQL endpoint
pub struct GraphqlGateway {
    config: AppConfig,
}

impl GraphqlGateway {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl PhotoGateway for GraphqlGateway {
    async fn create_photo(&self, input: &PhotoCreateInput) -> Result<Photo> {
        create_photo(&self.config, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_response;

    #[test]
    fn test_query_names_operations() {
        assert!(GET_ALL_PHOTOS_QUERY.contains("query GetAllPhotos($first: Int!)"));
        assert!(GET_ALL_PHOTOS_QUERY.contains("photoCollection(first: $first)"));
        assert!(CREATE_PHOTO_MUTATION.contains("mutation PhotoCreate($input: PhotoCreateInput!)"));
    }

    #[test]
    fn test_variables_shape() {
        assert_eq!(
            serde_json::to_value(GetAllPhotosArgs { first: 100 }).unwrap(),
            serde_json::json!({ "first": 100 })
        );

        let input = PhotoCreateInput { latitude: 10.0, longitude: 20.0, url: "img1".into() };
        assert_eq!(
            serde_json::to_value(PhotoCreateArgs { input: &input }).unwrap(),
            serde_json::json!({ "input": { "latitude": 10.0, "longitude": 20.0, "url": "img1" } })
        );
    }

    #[test]
    fn test_decode_create_response() {
        let body = r#"{"data":{"photoCreate":{"photo":{"url":"img9","latitude":1.0,"longitude":2.0,"id":"9"}}}}"#;
        let data: PhotoCreateData = decode_response(200, body).unwrap();
        assert_eq!(data.photo_create.photo.id, "9");
        assert_eq!(data.photo_create.photo.url, "img9");
    }

    #[test]
    fn test_decode_empty_collection() {
        let body = r#"{"data":{"photoCollection":{"edges":[]}}}"#;
        let data: PhotoCollectionData = decode_response(200, body).unwrap();
        assert!(data.photo_collection.into_photos().is_empty());
    }
}
