//! Configuration types for the funding-scheme rate schedule.
//!
//! These strongly-typed structures are deserialized from the YAML files in
//! a scheme configuration directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Metadata about the funding scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// The scheme code (e.g. "NDIS-PB-2025").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or effective date of the schedule.
    pub version: String,
    /// URL to the official pricing documentation.
    pub source_url: String,
}

/// Description of a funding category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInfo {
    /// The human-readable name of the category.
    pub name: String,
    /// A description of what the category funds.
    pub description: String,
}

/// Categories configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Map of category code to category details.
    pub categories: HashMap<String, CategoryInfo>,
}

/// Rate schedule effective from a specific date.
///
/// Rates are keyed by shift-type code, then staffing-ratio code.
#[derive(Debug, Clone, Deserialize)]
pub struct RateFile {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Hourly rates: shift type -> staffing ratio -> dollars per hour.
    pub rates: HashMap<String, HashMap<String, Decimal>>,
}

/// The complete scheme configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SchemeConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Funding category descriptions, keyed by category code.
    categories: HashMap<String, CategoryInfo>,
    /// Rate files by effective date (sorted oldest first).
    rates: Vec<RateFile>,
}

impl SchemeConfig {
    /// Creates a new SchemeConfig from its component parts.
    pub fn new(
        metadata: SchemeMetadata,
        categories: HashMap<String, CategoryInfo>,
        rates: Vec<RateFile>,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            categories,
            rates: sorted_rates,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the funding category descriptions.
    pub fn categories(&self) -> &HashMap<String, CategoryInfo> {
        &self.categories
    }

    /// Returns all rate files.
    pub fn rates(&self) -> &[RateFile] {
        &self.rates
    }
}
