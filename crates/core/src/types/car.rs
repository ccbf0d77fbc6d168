//! The car record served by the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::CarId;

/// A single car in the catalog.
///
/// Records are immutable after load; every consumer shares the same dataset
/// order. The wire format is camelCase JSON and matches the catalog
/// endpoints exactly, so the same struct is used for the embedded dataset,
/// the HTTP responses, and the API client.
///
/// Beyond the core searchable attributes, a record carries an open set of
/// optional descriptive fields (engine specs, dimensions, feature lists)
/// that only the detail view renders. Absent fields are omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Price in whole currency units.
    pub price: Decimal,
    pub fuel_type: String,
    pub transmission: String,
    pub seating_capacity: u8,
    /// Fuel efficiency (km/l, or km per charge for electric).
    pub mileage: Decimal,

    // Optional descriptive fields, detail view only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    /// Engine displacement in cc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displacement: Option<u32>,
    /// Peak power in bhp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_power: Option<Decimal>,
    /// Peak torque in Nm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_torque: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<String>,
    /// Exterior dimensions in mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheelbase: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_clearance: Option<u32>,
    /// Kerb weight in kg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerb_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comfort_features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entertainment_features: Option<Vec<String>>,
}
