//! HTTP adapters for the folder and note resources.
//!
//! Handlers parse the path and body, hand the request to the matching core
//! service on the store's blocking pool, and turn the outcome into a response.

use crate::error::ApiError;
use axum::body::Bytes;
use axum::http::Uri;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub mod folders;
pub mod notes;

/// Parses a path id; anything that is not an integer is an unknown resource.
pub(crate) fn parse_id(raw: &str, not_found_message: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(not_found_message.to_string()))
}

/// Decodes a JSON request body regardless of the declared content type.
///
/// A blank body reads as `{}` so that field checks report what is missing.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(raw).map_err(|err| {
        let message = match err.classify() {
            Category::Data => format!("Invalid request body: {err}"),
            Category::Io | Category::Syntax | Category::Eof => {
                format!("Invalid JSON in request body: {err}")
            }
        };
        ApiError::Validation(message)
    })
}

/// Path of a newly created resource below the collection the request hit.
pub(crate) fn resource_location(collection: &Uri, id: i64) -> String {
    format!("{}/{id}", collection.path().trim_end_matches('/'))
}
