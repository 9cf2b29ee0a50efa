//! Frontend Models
//!
//! Data structures matching the photo service's GraphQL shapes.

use serde::{Deserialize, Serialize};

/// Photo record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Image location, often a data URL
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEdge {
    pub node: Photo,
}

/// Paging envelope around photo records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoConnection {
    #[serde(default)]
    pub edges: Vec<PhotoEdge>,
}

impl PhotoConnection {
    /// Photos in server order
    pub fn into_photos(self) -> Vec<Photo> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

/// `data` of the GetAllPhotos query
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCollectionData {
    pub photo_collection: PhotoConnection,
}

/// Input of the PhotoCreate mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoCreateInput {
    pub latitude: f64,
    pub longitude: f64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoCreatePayload {
    pub photo: Photo,
}

/// `data` of the PhotoCreate mutation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCreateData {
    pub photo_create: PhotoCreatePayload,
}

/// Decimal degrees, south and west negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_flattens_edges_in_order() {
        let json = r#"{
            "photoCollection": {
                "edges": [
                    { "node": { "id": "1", "latitude": 10, "longitude": 20, "url": "img1" } },
                    { "node": { "id": "2", "latitude": -33.9, "longitude": 151.2, "url": "img2" } }
                ]
            }
        }"#;
        let data: PhotoCollectionData = serde_json::from_str(json).unwrap();
        let photos = data.photo_collection.into_photos();

        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0], Photo { id: "1".into(), latitude: 10.0, longitude: 20.0, url: "img1".into() });
        assert_eq!(photos[1].id, "2");
    }

    #[test]
    fn test_create_input_wire_shape() {
        let input = PhotoCreateInput { latitude: 1.5, longitude: -2.25, url: "data:image/jpeg;base64,AA==".into() };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "latitude": 1.5, "longitude": -2.25, "url": "data:image/jpeg;base64,AA==" })
        );
    }
}
