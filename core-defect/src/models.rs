//! Defect module data model
//!
//! Wire format follows the Parse REST conventions: camelCase keys, ISO-8601
//! timestamps and server-managed `objectId`/`createdAt`/`updatedAt` fields.
//! Server-managed fields are read-only here: decoded from responses, never
//! sent back.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use core_network::ParseClassObject;
use serde::{Deserialize, Serialize};

/// Parse GeoPoint (`{"__type": "GeoPoint", "latitude": .., "longitude": ..}`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "GeoPoint")]
pub struct ParseGeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ParseGeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the coordinates lie within the ranges Parse accepts.
    pub fn is_within_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Recipient entry of the defect form's contact dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContact {
    #[serde(default, skip_serializing)]
    object_id: Option<String>,
    #[serde(default, skip_serializing)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    updated_at: Option<DateTime<Utc>>,

    /// Recipient address of the generated mail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,

    /// Label shown in the dropdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Sort position in the dropdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl FormContact {
    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl ParseClassObject for FormContact {
    const PARSE_CLASS_NAME: &'static str = "DefectFormContact";
}

/// A defect report as submitted by a citizen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default, skip_serializing)]
    object_id: Option<String>,
    #[serde(default, skip_serializing)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    updated_at: Option<DateTime<Utc>>,

    /// Full name of the reporter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Location of the defect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Photos, base64 encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// `objectId` of the chosen [`FormContact`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geopoint: Option<ParseGeoPoint>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    /// Append a photo, base64-encoding the raw image bytes.
    pub fn with_image_bytes(mut self, image: &[u8]) -> Self {
        self.images
            .get_or_insert_with(Vec::new)
            .push(STANDARD.encode(image));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_contact_id(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn with_geopoint(mut self, geopoint: ParseGeoPoint) -> Self {
        self.geopoint = Some(geopoint);
        self
    }
}

impl ParseClassObject for FormData {
    const PARSE_CLASS_NAME: &'static str = "DefectFormData";
}

/// Parse server config (`GET /config`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Public config parameters
    #[serde(default)]
    pub params: Option<serde_json::Value>,

    #[serde(default, rename = "masterKeyOnly")]
    pub master_key_only: Option<serde_json::Value>,
}

impl ParseConfig {
    /// The `privacyText` parameter, if present and a string.
    pub fn privacy_text(&self) -> Option<&str> {
        self.params.as_ref()?.get("privacyText")?.as_str()
    }
}
