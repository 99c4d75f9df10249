//! Request resource descriptors
//!
//! A resource is an immutable value describing one Parse call: target, headers
//! and query or payload. It performs no I/O; [`NetworkService`] executes it.
//!
//! | Resource | Method | Path |
//! |---|---|---|
//! | [`ClassRequestResource`] | GET | `/classes/<Class>` |
//! | [`ConfigRequestResource`] | GET | `/config` |
//! | [`UploadClassRequestResource`] | POST | `/classes/<Class>` |
//! | [`UploadFileRequestResource`] | POST | `/files/<name>` |
//!
//! [`NetworkService`]: crate::service::NetworkService

use bridge_traits::http::{HttpMethod, HttpRequest};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;
use url::Url;

use crate::error::{NetworkError, Result};
use crate::response::{ParseListResponse, ParseUploadFileResponse, ParseUploadResponse};

/// A type stored in a Parse class
pub trait ParseClassObject: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Server-side class (table) name
    const PARSE_CLASS_NAME: &'static str;
}

/// Common behaviour of all request descriptors.
pub trait RequestResource: Send + Sync {
    /// Decoded success payload
    type Response: Send + 'static;

    fn method(&self) -> HttpMethod;

    fn base_url(&self) -> &Url;

    fn headers(&self) -> &BTreeMap<String, String>;

    /// Path below the base URL, one entry per segment
    fn path_segments(&self) -> Vec<&str>;

    fn query(&self) -> Option<&BTreeMap<String, String>> {
        None
    }

    /// Encoded body and its content type
    fn body(&self) -> Result<Option<(Bytes, String)>> {
        Ok(None)
    }

    /// Decode a 2xx response body
    fn decode(&self, body: &[u8]) -> Result<Self::Response>;

    /// Absolute request URL.
    fn url(&self) -> Result<Url> {
        let base = self.base_url();
        if !matches!(base.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidRequest(format!(
                "unsupported base URL scheme '{}'",
                base.scheme()
            )));
        }

        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                NetworkError::InvalidRequest(format!("base URL '{}' cannot carry a path", base))
            })?;
            segments.pop_if_empty();
            for segment in self.path_segments() {
                segments.push(segment);
            }
        }

        if let Some(query) = self.query().filter(|query| !query.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url)
    }

    /// Assemble the transport request.
    fn to_http_request(&self, timeout: Duration) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(self.method(), self.url()?.to_string())
            .headers(self.headers().clone())
            .header("Accept", "application/json")
            .timeout(timeout);

        if let Some((body, content_type)) = self.body()? {
            request = request.body(body, content_type);
        }

        Ok(request)
    }
}

/// Resources fetched with [`NetworkService::download`](crate::NetworkService::download)
pub trait Downloadable: RequestResource {}

/// Resources sent with [`NetworkService::upload`](crate::NetworkService::upload)
pub trait Uploadable: RequestResource {}

/// Decode JSON, telling unparseable bodies apart from schema mismatches.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| NetworkError::InvalidResponse(format!("response body is not JSON: {}", e)))?;
    serde_json::from_value(value).map_err(|e| NetworkError::JsonDecoding(e.to_string()))
}

/// Query over a Parse class, decoding `{"results": [...]}`.
pub struct ClassRequestResource<T> {
    base_url: Url,
    parse_class: String,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    _object: PhantomData<fn() -> T>,
}

impl<T> ClassRequestResource<T> {
    pub fn new(
        base_url: Url,
        parse_class: impl Into<String>,
        query: BTreeMap<String, String>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            base_url,
            parse_class: parse_class.into(),
            query,
            headers,
            _object: PhantomData,
        }
    }

    pub fn parse_class(&self) -> &str {
        &self.parse_class
    }

    pub fn query_parameters(&self) -> &BTreeMap<String, String> {
        &self.query
    }
}

impl<T: DeserializeOwned + Send + 'static> RequestResource for ClassRequestResource<T> {
    type Response = Vec<T>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn path_segments(&self) -> Vec<&str> {
        vec!["classes", &self.parse_class]
    }

    fn query(&self) -> Option<&BTreeMap<String, String>> {
        Some(&self.query)
    }

    fn decode(&self, body: &[u8]) -> Result<Self::Response> {
        decode_json::<ParseListResponse<T>>(body).map(|list| list.results)
    }
}

impl<T: DeserializeOwned + Send + 'static> Downloadable for ClassRequestResource<T> {}

/// Parse config endpoint, decoding into `T`.
pub struct ConfigRequestResource<T> {
    base_url: Url,
    headers: BTreeMap<String, String>,
    _config: PhantomData<fn() -> T>,
}

impl<T> ConfigRequestResource<T> {
    pub fn new(base_url: Url, headers: BTreeMap<String, String>) -> Self {
        Self {
            base_url,
            headers,
            _config: PhantomData,
        }
    }
}

impl<T: DeserializeOwned + Send + 'static> RequestResource for ConfigRequestResource<T> {
    type Response = T;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn path_segments(&self) -> Vec<&str> {
        vec!["config"]
    }

    fn decode(&self, body: &[u8]) -> Result<Self::Response> {
        decode_json(body)
    }
}

impl<T: DeserializeOwned + Send + 'static> Downloadable for ConfigRequestResource<T> {}

/// Creation of a class object from a JSON payload.
pub struct UploadClassRequestResource<T> {
    base_url: Url,
    parse_class: String,
    object: Option<T>,
    headers: BTreeMap<String, String>,
}

impl<T> UploadClassRequestResource<T> {
    pub fn new(
        base_url: Url,
        parse_class: impl Into<String>,
        object: Option<T>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            base_url,
            parse_class: parse_class.into(),
            object,
            headers,
        }
    }

    pub fn parse_class(&self) -> &str {
        &self.parse_class
    }

    pub fn object(&self) -> Option<&T> {
        self.object.as_ref()
    }
}

impl<T: Serialize + Send + Sync> RequestResource for UploadClassRequestResource<T> {
    type Response = ParseUploadResponse;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn path_segments(&self) -> Vec<&str> {
        vec!["classes", &self.parse_class]
    }

    fn body(&self) -> Result<Option<(Bytes, String)>> {
        let object = self.object.as_ref().ok_or_else(|| {
            NetworkError::InvalidRequest(format!("no {} object to upload", self.parse_class))
        })?;
        let json = serde_json::to_vec(object).map_err(|e| {
            NetworkError::InvalidRequest(format!("cannot serialize {}: {}", self.parse_class, e))
        })?;
        Ok(Some((Bytes::from(json), "application/json".to_string())))
    }

    fn decode(&self, body: &[u8]) -> Result<Self::Response> {
        decode_json(body)
    }
}

impl<T: Serialize + Send + Sync> Uploadable for UploadClassRequestResource<T> {}

/// Raw file upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFileRequestResource {
    base_url: Url,
    file_name: String,
    file: Option<Bytes>,
    headers: BTreeMap<String, String>,
}

impl UploadFileRequestResource {
    pub fn new(
        base_url: Url,
        file_name: impl Into<String>,
        file: Option<Bytes>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            base_url,
            file_name: file_name.into(),
            file,
            headers,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file(&self) -> Option<&Bytes> {
        self.file.as_ref()
    }

    /// Content type derived from the file extension
    pub fn content_type(&self) -> &'static str {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("heic") => "image/heic",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for UploadFileRequestResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFileRequestResource")
            .field("base_url", &self.base_url.as_str())
            .field("file_name", &self.file_name)
            .field("file_len", &self.file.as_ref().map(Bytes::len))
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RequestResource for UploadFileRequestResource {
    type Response = ParseUploadFileResponse;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn path_segments(&self) -> Vec<&str> {
        vec!["files", &self.file_name]
    }

    fn body(&self) -> Result<Option<(Bytes, String)>> {
        let file = self
            .file
            .clone()
            .filter(|file| !file.is_empty())
            .ok_or_else(|| NetworkError::InvalidRequest("no file data to upload".to_string()))?;
        Ok(Some((file, self.content_type().to_string())))
    }

    fn decode(&self, body: &[u8]) -> Result<Self::Response> {
        decode_json(body)
    }
}

impl Uploadable for UploadFileRequestResource {}

// Manual impls: derives would put bounds on the phantom object type.

impl<T> Clone for ClassRequestResource<T> {
    fn clone(&self) -> Self {
        Self::new(
            self.base_url.clone(),
            self.parse_class.clone(),
            self.query.clone(),
            self.headers.clone(),
        )
    }
}

impl<T> PartialEq for ClassRequestResource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.parse_class == other.parse_class
            && self.query == other.query
            && self.headers == other.headers
    }
}

impl<T> fmt::Debug for ClassRequestResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRequestResource")
            .field("base_url", &self.base_url.as_str())
            .field("parse_class", &self.parse_class)
            .field("query", &self.query)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Clone for ConfigRequestResource<T> {
    fn clone(&self) -> Self {
        Self::new(self.base_url.clone(), self.headers.clone())
    }
}

impl<T> PartialEq for ConfigRequestResource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.headers == other.headers
    }
}

impl<T> fmt::Debug for ConfigRequestResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRequestResource")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Clone> Clone for UploadClassRequestResource<T> {
    fn clone(&self) -> Self {
        Self::new(
            self.base_url.clone(),
            self.parse_class.clone(),
            self.object.clone(),
            self.headers.clone(),
        )
    }
}

impl<T: PartialEq> PartialEq for UploadClassRequestResource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.parse_class == other.parse_class
            && self.object == other.object
            && self.headers == other.headers
    }
}

impl<T> fmt::Debug for UploadClassRequestResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadClassRequestResource")
            .field("base_url", &self.base_url.as_str())
            .field("parse_class", &self.parse_class)
            .field("has_object", &self.object.is_some())
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}
