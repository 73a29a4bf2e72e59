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

use codec::{Decode, Encode, MaxEncodedLen};
use lending_primitives::{Balance, Bps};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Health classification of a portfolio, based on the fraction of the
/// borrower's loans, terminal ones included, that are currently liquidation
/// eligible.
#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Encode, Decode, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PortfolioHealth {
	Excellent,
	Good,
	Fair,
	Poor,
	Critical,
}

impl PortfolioHealth {
	/// Classifies `at_risk` out of `loans` loans.
	///
	/// Bands: 0% excellent, under 10% good, under 30% fair, under 50% poor,
	/// critical otherwise. Compared by cross multiplication so no rounding is
	/// involved.
	pub fn classify(at_risk: u32, loans: u32) -> Self {
		let (at_risk, loans) = (u64::from(at_risk), u64::from(loans));

		if loans == 0 || at_risk == 0 {
			Self::Excellent
		} else if at_risk * 10 < loans {
			Self::Good
		} else if at_risk * 10 < loans * 3 {
			Self::Fair
		} else if at_risk * 2 < loans {
			Self::Poor
		} else {
			Self::Critical
		}
	}
}

/// Rollup over the loans of one borrower. Never stored.
#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct PortfolioSnapshot {
	/// Sum of the original principal of every loan, terminal ones included.
	pub total_loaned: Balance,
	/// Sum of the current debt of active loans.
	pub total_debt: Balance,
	/// Mean interest rate of active loans, rounded down.
	pub average_apr_bps: Bps,
	pub loan_count: u32,
	pub active_loan_count: u32,
	pub liquidation_risk_count: u32,
	pub portfolio_health: PortfolioHealth,
}
