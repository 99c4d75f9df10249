//! Request descriptors for the defect endpoints
//!
//! Pure constructors: same inputs, equal descriptors, no I/O.

use bytes::Bytes;
use core_network::{
    ClassRequestResource, ConfigRequestResource, ParseClassObject, UploadClassRequestResource,
    UploadFileRequestResource,
};
use std::collections::BTreeMap;
use url::Url;

use crate::models::{FormContact, FormData, ParseConfig};

/// File name used for uploaded defect photos
pub const DEFAULT_FILE_NAME: &str = "defect.jpg";

/// `GET /classes/DefectFormContact` with `query` passed through verbatim.
pub fn contact_fetch(
    base_url: Url,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
) -> ClassRequestResource<FormContact> {
    ClassRequestResource::new(base_url, FormContact::PARSE_CLASS_NAME, query, headers)
}

/// `GET /config`
pub fn config_fetch(
    base_url: Url,
    headers: BTreeMap<String, String>,
) -> ConfigRequestResource<ParseConfig> {
    ConfigRequestResource::new(base_url, headers)
}

/// `POST /classes/DefectFormData`
pub fn data_upload(
    base_url: Url,
    headers: BTreeMap<String, String>,
    payload: Option<FormData>,
) -> UploadClassRequestResource<FormData> {
    UploadClassRequestResource::new(base_url, FormData::PARSE_CLASS_NAME, payload, headers)
}

/// `POST /files/defect.jpg`
pub fn file_upload(
    base_url: Url,
    headers: BTreeMap<String, String>,
    file: Option<Bytes>,
) -> UploadFileRequestResource {
    file_upload_named(base_url, headers, DEFAULT_FILE_NAME, file)
}

pub fn file_upload_named(
    base_url: Url,
    headers: BTreeMap<String, String>,
    file_name: &str,
    file: Option<Bytes>,
) -> UploadFileRequestResource {
    UploadFileRequestResource::new(base_url, file_name, file, headers)
}
