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

use lending_primitives::Balance;
use lending_types::CollateralRef;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValuationError {
	#[error("no valuation available for collateral {0}")]
	NotFound(CollateralRef),
	#[error("valuation source unavailable")]
	Unavailable,
}

/// Provides the current value of a collateral, in the same minor units as
/// the loan balances.
pub trait CollateralValuation {
	fn value_of(&self, collateral: &CollateralRef) -> Result<Balance, ValuationError>;
}

#[cfg(feature = "std")]
pub mod mock {
	use super::*;

	mockall::mock! {
		pub Valuation {}

		impl CollateralValuation for Valuation {
			fn value_of(&self, collateral: &CollateralRef) -> Result<Balance, ValuationError>;
		}
	}
}
