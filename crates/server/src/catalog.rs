//! The in-memory car catalog.
//!
//! The dataset is embedded in the binary and parsed once at startup. After
//! load it is immutable and shared read-only by every handler; all
//! filtering happens downstream in the search pipeline.

use std::collections::HashSet;

use car_finder_core::search::{distinct_brands, distinct_fuel_types};
use car_finder_core::types::{Car, CarId};
use thiserror::Error;

/// The built-in dataset, in the same camelCase wire format the endpoints
/// serve.
const EMBEDDED_DATASET: &str = include_str!("../data/cars.json");

/// Catalog load errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate car id in dataset: {0}")]
    DuplicateId(CarId),
}

/// The full, static set of car records.
#[derive(Debug, Clone)]
pub struct Catalog {
    cars: Vec<Car>,
}

impl Catalog {
    /// Load the embedded dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is malformed or contains a
    /// duplicate id. Either one is a build defect, so `main` treats this
    /// as fatal.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Parse a catalog from a JSON array of car records.
    ///
    /// Record order is preserved; it is the stable order every consumer
    /// sees.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cars: Vec<Car> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for car in &cars {
            if !seen.insert(car.id.clone()) {
                return Err(CatalogError::DuplicateId(car.id.clone()));
            }
        }

        Ok(Self { cars })
    }

    /// Every record, in dataset order.
    #[must_use]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Look up a single record by id.
    ///
    /// Absence is a domain-level "not found", not an error.
    #[must_use]
    pub fn get(&self, id: &CarId) -> Option<&Car> {
        self.cars.iter().find(|car| car.id == *id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Distinct brands in first-seen order, for the filter dropdown.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        distinct_brands(&self.cars)
    }

    /// Distinct fuel types in first-seen order.
    #[must_use]
    pub fn fuel_types(&self) -> Vec<String> {
        distinct_fuel_types(&self.cars)
    }
}
