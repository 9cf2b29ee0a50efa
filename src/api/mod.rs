//! GraphQL API Bindings
//!
//! Frontend bindings to the photo service, organized by domain.

mod photo;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::{Photo, PhotoCreateInput};

pub use photo::*;

/// Persists new photo records. Lets the upload flow run against a fake in tests.
#[async_trait(?Send)]
pub trait PhotoGateway {
    async fn create_photo(&self, input: &PhotoCreateInput) -> Result<Photo>;
}

#[derive(Serialize)]
struct GraphqlBody<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// POST `{query, variables}` to the configured endpoint and decode `data`.
pub async fn graphql_request<V, T>(config: &AppConfig, query: &str, variables: V) -> Result<T>
where
    V: Serialize,
    T: DeserializeOwned,
{
    let response = reqwest::Client::new()
        .post(&config.endpoint)
        .header("Content-Type", "application/json")
        .header("x-api-key", &config.api_key)
        .json(&GraphqlBody { query, variables })
        .send()
        .await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    decode_response(status, &body)
}

/// Turn a raw HTTP status and body into `data` or a classified error.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(AppError::Network(format!("status {}: {}", status, body.trim())));
    }

    let parsed: GraphqlResponse<T> = serde_json::from_str(body)?;
    if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(AppError::Protocol(messages.join("; ")));
    }
    parsed
        .data
        .ok_or_else(|| AppError::Protocol("response has no data".to_string()))
}
