//! Parse server response payloads
//!
//! See: https://docs.parseplatform.org/rest/guide/#objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Acknowledgement of a class object creation (`POST /classes/<Class>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseUploadResponse {
    /// Server-generated object id
    pub object_id: String,

    pub created_at: DateTime<Utc>,
}

/// Acknowledgement of a file upload (`POST /files/<name>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseUploadFileResponse {
    /// Server-side file name, prefixed with a generated id
    pub name: String,

    /// Public URL of the stored file
    pub url: String,
}

/// Envelope of a class query (`GET /classes/<Class>`)
#[derive(Debug, Deserialize)]
pub(crate) struct ParseListResponse<T> {
    pub results: Vec<T>,
}
