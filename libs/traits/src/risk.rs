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

use lending_types::RiskTier;

/// Opaque bundle of collateral and borrower signals consumed by the risk
/// engine. Implementors reduce their signals to a tier ordinal in `0..=4`.
pub trait RiskSignal {
	fn tier_ordinal(&self) -> u8;
}

impl RiskSignal for u8 {
	fn tier_ordinal(&self) -> u8 {
		*self
	}
}

impl RiskSignal for RiskTier {
	fn tier_ordinal(&self) -> u8 {
		self.ordinal()
	}
}
