use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::{AppError, Result};

/// Dimension of the stored embedding vectors; fixed by the index mapping.
pub const EMBEDDING_DIMENSION: usize = 768;

/// Listing availability
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Available,
    Unavailable,
    Rented,
    Sold,
    UnderMaintenance,
}

/// Furnishing level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Furnishing {
    Unfurnished,
    SemiFurnished,
    FullyFurnished,
}

/// Geographic coordinate, stored as a geo_point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Structured address attached to a property
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub locality: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub pincode: Option<String>,

    /// External place reference (maps provider id)
    #[serde(default)]
    pub place_id: Option<String>,
}

/// A point of interest near a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAmenity {
    pub name: String,

    #[serde(rename = "type")]
    pub amenity_type: String,

    #[serde(default)]
    pub distance_km: Option<f64>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub place_id: Option<String>,
}

/// The catalog's unit of retrieval. Authored by the external ingestion
/// pipeline; read-only for the ranking and recommendation paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDocument {
    /// Unique, stable identifier
    pub property_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub property_type: String,

    #[serde(default)]
    pub bedrooms: Option<u32>,

    #[serde(default)]
    pub bathrooms: Option<u32>,

    #[serde(default)]
    pub floor: Option<u32>,

    #[serde(default)]
    pub total_floors: Option<u32>,

    #[serde(default)]
    pub area_sqft: Option<f64>,

    #[serde(default)]
    pub carpet_area_sqft: Option<f64>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_per_sqft: Option<f64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub property_status: PropertyStatus,

    #[serde(default)]
    pub furnishing: Option<Furnishing>,

    #[serde(default)]
    pub geo_location: Option<GeoPoint>,

    #[serde(default)]
    pub address: Option<Address>,

    #[serde(default)]
    pub builder_name: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    /// Listing platform the property was sourced from
    #[serde(default)]
    pub platform_name: Option<String>,

    #[serde(default)]
    pub platform_focus: Option<String>,

    /// Audience descriptors ("students", "young families", ...)
    #[serde(default)]
    pub target_audience: Vec<String>,

    #[serde(default)]
    pub special_features: Vec<String>,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub nearby_amenities: Vec<NearbyAmenity>,

    #[serde(default)]
    pub image_urls: Vec<String>,

    #[serde(default)]
    pub ai_summary: Option<String>,

    #[serde(default)]
    pub ai_highlights: Option<String>,

    #[serde(default)]
    pub ai_recommendations: Option<String>,

    /// Dense vector over `combined_text`, compared by cosine similarity.
    /// Absent for documents the embedding backfill has not reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Denormalized text the embedding is generated from
    #[serde(default)]
    pub combined_text: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PropertyDocument {
    /// Check the document invariants enforced before any write: non-empty
    /// identifier, embedding dimension, coordinate ranges, non-negative
    /// money and area figures.
    pub fn validate_invariants(&self) -> Result<()> {
        if self.property_id.trim().is_empty() {
            return Err(AppError::Validation("property_id must not be empty".into()));
        }

        if let Some(embedding) = &self.embedding {
            if embedding.len() != EMBEDDING_DIMENSION {
                return Err(AppError::Validation(format!(
                    "embedding must have {} components, got {}",
                    EMBEDDING_DIMENSION,
                    embedding.len()
                )));
            }
        }

        if let Some(geo) = &self.geo_location {
            if !geo.is_valid() {
                return Err(AppError::Validation(format!(
                    "geo_location out of range: lat={}, lon={}",
                    geo.lat, geo.lon
                )));
            }
        }

        for (field, value) in [
            ("price", self.price),
            ("price_per_sqft", self.price_per_sqft),
            ("area_sqft", self.area_sqft),
            ("carpet_area_sqft", self.carpet_area_sqft),
        ] {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(AppError::Validation(format!(
                        "{field} must be non-negative, got {v}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Assemble the denormalized text used as the embedding source. The
    /// output is deterministic for a given document.
    pub fn build_combined_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.push(self.name.clone());
        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }
        if !self.property_type.is_empty() {
            parts.push(self.property_type.clone());
        }
        if let Some(address) = &self.address {
            for piece in [&address.locality, &address.city, &address.state] {
                if let Some(p) = piece {
                    parts.push(p.clone());
                }
            }
        }
        if !self.amenities.is_empty() {
            parts.push(self.amenities.join(", "));
        }
        for nearby in &self.nearby_amenities {
            parts.push(format!("near {} ({})", nearby.name, nearby.amenity_type));
        }
        parts.join(". ")
    }
}

/// Flattened response projection of a property hit. Built from a raw hit
/// source; fields missing from the document default rather than error.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PropertyView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub property_type: String,
    pub platform_name: String,
    pub target_audience: Vec<String>,
    pub special_features: Vec<String>,
    pub price: f64,
    pub area_sqft: f64,
    pub bedrooms: u32,
    pub amenities: Vec<String>,
    pub locality: String,
    pub city: String,
    pub state: String,
}

impl PropertyView {
    /// Project a raw hit source into the response shape
    pub fn from_source(source: &Value) -> Self {
        let document: PartialDocument = serde_json::from_value(source.clone()).unwrap_or_default();
        let address = document.address.unwrap_or_default();

        Self {
            id: document.property_id,
            name: document.name,
            description: document.description,
            property_type: document.property_type,
            platform_name: document.platform_name.unwrap_or_default(),
            target_audience: document.target_audience,
            special_features: document.special_features,
            price: document.price.unwrap_or_default(),
            area_sqft: document.area_sqft.unwrap_or_default(),
            bedrooms: document.bedrooms.unwrap_or_default(),
            amenities: document.amenities,
            locality: address.locality.unwrap_or_default(),
            city: address.city.unwrap_or_default(),
            state: address.state.unwrap_or_default(),
        }
    }
}

/// Lenient projection of a hit source; every field optional so a sparse or
/// legacy document still yields a view.
#[derive(Debug, Default, Deserialize)]
struct PartialDocument {
    #[serde(default)]
    property_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    property_type: String,
    #[serde(default)]
    platform_name: Option<String>,
    #[serde(default)]
    target_audience: Vec<String>,
    #[serde(default)]
    special_features: Vec<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    area_sqft: Option<f64>,
    #[serde(default)]
    bedrooms: Option<u32>,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    address: Option<Address>,
}
