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

use lending_primitives::Bps;
use lending_traits::RiskSignal;
use lending_types::{RiskAssessment, RiskTier};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidParameter};

/// Annual rate recommended for each risk tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateTable {
	pub low: Bps,
	pub moderate: Bps,
	pub medium: Bps,
	pub high: Bps,
	pub very_high: Bps,
}

impl Default for RateTable {
	fn default() -> Self {
		Self {
			low: 500,
			moderate: 800,
			medium: 1200,
			high: 1600,
			very_high: 2500,
		}
	}
}

impl RateTable {
	pub fn rate_for(&self, tier: RiskTier) -> Bps {
		match tier {
			RiskTier::Low => self.low,
			RiskTier::Moderate => self.moderate,
			RiskTier::Medium => self.medium,
			RiskTier::High => self.high,
			RiskTier::VeryHigh => self.very_high,
		}
	}

	/// Rates ordered from the lowest to the highest risk tier.
	pub fn rates(&self) -> [Bps; 5] {
		RiskTier::ALL.map(|tier| self.rate_for(tier))
	}
}

/// Maps risk signals to a tier and its recommended rate.
#[derive(Clone, Debug, Default)]
pub struct RiskEngine {
	table: RateTable,
}

impl RiskEngine {
	pub fn new(table: RateTable) -> Self {
		Self { table }
	}

	pub fn assess(&self, signal: &impl RiskSignal) -> Result<RiskAssessment, Error> {
		let ordinal = signal.tier_ordinal();
		let risk_tier = RiskTier::from_ordinal(ordinal)
			.ok_or_else(|| Error::invalid(None, InvalidParameter::UnknownRiskTier(ordinal)))?;

		Ok(RiskAssessment {
			risk_tier,
			recommended_rate_bps: self.table.rate_for(risk_tier),
		})
	}
}
