//! Scheme configuration loading.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{RosterError, RosterResult};
use crate::models::FundingCategory;
use crate::rostering::{ShiftType, StaffingRatio};

use super::types::{CategoriesConfig, CategoryInfo, RateFile, SchemeConfig, SchemeMetadata};

/// Loads and provides access to the funding-scheme rate schedule.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ndis/
/// ├── scheme.yaml        # Scheme metadata
/// ├── categories.yaml    # Funding category descriptions
/// └── rates/
///     └── 2025-07-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::SchemeLoader;
/// use roster_engine::rostering::{ShiftType, StaffingRatio};
/// use chrono::NaiveDate;
///
/// let loader = SchemeLoader::load("./config/ndis").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let rate = loader.get_hourly_rate(ShiftType::Day, StaffingRatio::OneToOne, date).unwrap();
/// println!("Hourly rate: ${}", rate);
/// ```
#[derive(Debug, Clone)]
pub struct SchemeLoader {
    config: SchemeConfig,
}

impl SchemeLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any required file is missing, any file contains
    /// invalid YAML, or a funding category used by the engine is not
    /// described in `categories.yaml`.
    pub fn load<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let path = path.as_ref();

        let scheme_path = path.join("scheme.yaml");
        let metadata = Self::load_yaml::<SchemeMetadata>(&scheme_path)?;

        let categories_path = path.join("categories.yaml");
        let categories_config = Self::load_yaml::<CategoriesConfig>(&categories_path)?;

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        // Every category the engine can draw from must be described.
        for category in [FundingCategory::CommunityAccess, FundingCategory::Sil] {
            let code = category.to_string();
            if !categories_config.categories.contains_key(&code) {
                return Err(RosterError::ConfigParseError {
                    path: categories_path.display().to_string(),
                    message: format!("missing funding category '{}'", code),
                });
            }
        }

        let config = SchemeConfig::new(metadata, categories_config.categories, rates);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> RosterResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| RosterError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| RosterError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> RosterResult<Vec<RateFile>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(RosterError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| RosterError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| RosterError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_file = Self::load_yaml::<RateFile>(&path)?;
                rates.push(rate_file);
            }
        }

        if rates.is_empty() {
            return Err(RosterError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying scheme configuration.
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the description of a funding category.
    pub fn describe_category(&self, category: FundingCategory) -> &CategoryInfo {
        // Presence is validated at load time.
        &self.config.categories()[&category.to_string()]
    }

    /// Gets the hourly rate for a shift type and staffing ratio on a date.
    ///
    /// The method finds the most recent rate file that is effective on or
    /// before the given date.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::RateNotFound`] if no rate file is effective
    /// for the date, or the effective file has no entry for the shift type
    /// and ratio.
    pub fn get_hourly_rate(
        &self,
        shift_type: ShiftType,
        ratio: StaffingRatio,
        date: NaiveDate,
    ) -> RosterResult<Decimal> {
        let not_found = || RosterError::RateNotFound {
            shift_type: shift_type.code().to_string(),
            ratio: ratio.code().to_string(),
            date,
        };

        let rate_file = self
            .config
            .rates()
            .iter()
            .rev()
            .find(|rf| rf.effective_date <= date)
            .ok_or_else(not_found)?;

        rate_file
            .rates
            .get(shift_type.code())
            .and_then(|by_ratio| by_ratio.get(ratio.code()))
            .copied()
            .ok_or_else(not_found)
    }
}
