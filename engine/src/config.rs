// Copyright 2023 Centrifuge Foundation (centrifuge.io).
//
// This file is part of the Centrifuge chain project.
// Centrifuge is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version (see http://www.gnu.org/licenses).
// Centrifuge is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

use std::{fs, io, path::Path};

use lending_primitives::{
	Bps, DEFAULT_JOURNAL_CAPACITY, DEFAULT_LIQUIDATION_THRESHOLD_BPS, DEFAULT_MAX_DURATION_DAYS,
	MAX_BPS, MAX_LOAN_DURATION_DAYS,
};
use serde::{Deserialize, Serialize};

use crate::risk::RateTable;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("unable to read configuration from {path}: {source}")]
	Io { path: String, source: io::Error },

	#[error("malformed configuration: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("invalid configuration: {0}")]
	Invalid(String),
}

/// Engine wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Loan-to-value, in basis points, from which an active loan may be
	/// liquidated.
	pub liquidation_threshold_bps: Bps,

	/// Amount of payments kept by the journal. Oldest entries are evicted
	/// first.
	pub journal_capacity: u32,

	/// Longest duration accepted when creating a loan.
	pub max_duration_days: u32,

	/// Annual rate recommended for each risk tier.
	pub rate_table: RateTable,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			liquidation_threshold_bps: DEFAULT_LIQUIDATION_THRESHOLD_BPS,
			journal_capacity: DEFAULT_JOURNAL_CAPACITY,
			max_duration_days: DEFAULT_MAX_DURATION_DAYS,
			rate_table: RateTable::default(),
		}
	}
}

impl EngineConfig {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;

		Self::from_json(&content)
	}

	pub fn from_json(content: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.liquidation_threshold_bps == 0 {
			return Err(ConfigError::Invalid(
				"liquidation_threshold_bps must be greater than zero".into(),
			));
		}

		if self.journal_capacity == 0 {
			return Err(ConfigError::Invalid(
				"journal_capacity must be greater than zero".into(),
			));
		}

		if self.max_duration_days == 0 {
			return Err(ConfigError::Invalid(
				"max_duration_days must be greater than zero".into(),
			));
		}

		if self.max_duration_days > MAX_LOAN_DURATION_DAYS {
			return Err(ConfigError::Invalid(format!(
				"max_duration_days must not exceed {MAX_LOAN_DURATION_DAYS}"
			)));
		}

		let rates = self.rate_table.rates();
		if let Some(rate) = rates.iter().find(|rate| **rate > MAX_BPS) {
			return Err(ConfigError::Invalid(format!(
				"rate of {rate} bps exceeds {MAX_BPS} bps"
			)));
		}

		if rates.windows(2).any(|pair| pair[0] > pair[1]) {
			return Err(ConfigError::Invalid(
				"rate_table must not decrease with the risk tier".into(),
			));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn defaults_are_valid() {
		let config = EngineConfig::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.liquidation_threshold_bps, 8_000);
		assert_eq!(config.journal_capacity, 1_000);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = EngineConfig::from_json(r#"{ "liquidation_threshold_bps": 7500 }"#).unwrap();

		assert_eq!(config.liquidation_threshold_bps, 7_500);
		assert_eq!(config.journal_capacity, DEFAULT_JOURNAL_CAPACITY);
		assert_eq!(config.rate_table, RateTable::default());
	}

	#[test]
	fn unknown_fields_are_rejected() {
		assert!(matches!(
			EngineConfig::from_json(r#"{ "threshold": 7500 }"#),
			Err(ConfigError::Parse(_))
		));
	}

	#[test]
	fn decreasing_rate_table_is_rejected() {
		let mut config = EngineConfig::default();
		config.rate_table.high = 100;

		assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn zero_capacity_is_rejected() {
		let config = EngineConfig {
			journal_capacity: 0,
			..Default::default()
		};

		assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn max_duration_is_bounded() {
		let mut config = EngineConfig {
			max_duration_days: MAX_LOAN_DURATION_DAYS,
			..Default::default()
		};
		assert!(config.validate().is_ok());

		config.max_duration_days = MAX_LOAN_DURATION_DAYS + 1;
		assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

		config.max_duration_days = u32::MAX;
		assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"{{ "journal_capacity": 10, "rate_table": {{ "low": 100, "moderate": 200, "medium": 300, "high": 400, "very_high": 500 }} }}"#
		)
		.unwrap();

		let config = EngineConfig::from_file(file.path()).unwrap();
		assert_eq!(config.journal_capacity, 10);
		assert_eq!(config.rate_table.very_high, 500);
	}

	#[test]
	fn missing_file() {
		assert!(matches!(
			EngineConfig::from_file("/nonexistent/lending.json"),
			Err(ConfigError::Io { .. })
		));
	}
}
