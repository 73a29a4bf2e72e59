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
use lending_types::{CollateralRef, SettlementRef};

/// Failure reported by the settlement authority. In every case the
/// authority guarantees nothing was executed on its side.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
	#[error("settlement rejected: {0}")]
	Rejected(String),
	#[error("settlement timed out")]
	Timeout,
	#[error("settlement authority unavailable")]
	Unavailable,
}

/// The authority that actually moves funds and collateral.
///
/// Every call is all-or-nothing: it either returns the reference of a
/// confirmed transaction or an error after which no value has moved.
pub trait SettlementAuthority<AccountId> {
	/// Locks `collateral` and sends `principal` to `borrower`.
	fn disburse(
		&self,
		borrower: &AccountId,
		collateral: &CollateralRef,
		principal: Balance,
	) -> Result<SettlementRef, SettlementError>;

	/// Collects exactly `amount` from `payer`.
	///
	/// Only called to settle a loan in full. Once the collection is
	/// confirmed the authority hands the collateral `disburse` locked for
	/// that loan back to `payer`; no separate release follows.
	fn collect(&self, payer: &AccountId, amount: Balance) -> Result<SettlementRef, SettlementError>;

	/// Releases a locked collateral to its liquidation destination.
	fn release_collateral(
		&self,
		collateral: &CollateralRef,
	) -> Result<SettlementRef, SettlementError>;
}

#[cfg(feature = "std")]
pub mod mock {
	use super::*;

	mockall::mock! {
		pub Settlement<AccountId: 'static> {}

		impl<AccountId: 'static> SettlementAuthority<AccountId> for Settlement<AccountId> {
			fn disburse(
				&self,
				borrower: &AccountId,
				collateral: &CollateralRef,
				principal: Balance,
			) -> Result<SettlementRef, SettlementError>;

			fn collect(
				&self,
				payer: &AccountId,
				amount: Balance
			) -> Result<SettlementRef, SettlementError>;

			fn release_collateral(
				&self,
				collateral: &CollateralRef
			) -> Result<SettlementRef, SettlementError>;
		}
	}
}
