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
use lending_primitives::{Balance, Bps, Moment};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a loan.
///
/// ```text
/// Pending (reserved)
/// Active ──┬──> Active              partial payment
///          ├──> Repaid              full repayment
///          └──> PendingLiquidation ──> Liquidated
/// Cancelled (reserved)
/// ```
///
/// `Repaid`, `Liquidated` and `Cancelled` are terminal.
#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Encode, Decode, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LoanStatus {
	/// Reserved entry point. Loans are only created once the disbursement is
	/// confirmed, so no operation produces this status today.
	Pending,
	Active,
	PendingLiquidation,
	Liquidated,
	Repaid,
	/// Reserved. No operation produces this status today.
	Cancelled,
}

impl LoanStatus {
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Liquidated | Self::Repaid | Self::Cancelled)
	}

	pub fn can_transition_to(&self, next: LoanStatus) -> bool {
		matches!(
			(self, next),
			(Self::Active, Self::Active)
				| (Self::Active, Self::Repaid)
				| (Self::Active, Self::PendingLiquidation)
				| (Self::PendingLiquidation, Self::Liquidated)
		)
	}
}

/// Risk classification of a loan request, from lowest to highest risk.
#[derive(
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Debug,
	Encode,
	Decode,
	TypeInfo,
	MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RiskTier {
	Low,
	Moderate,
	Medium,
	High,
	VeryHigh,
}

impl RiskTier {
	pub const ALL: [RiskTier; 5] = [
		Self::Low,
		Self::Moderate,
		Self::Medium,
		Self::High,
		Self::VeryHigh,
	];

	pub fn from_ordinal(ordinal: u8) -> Option<Self> {
		Self::ALL.get(ordinal as usize).copied()
	}

	pub fn ordinal(&self) -> u8 {
		*self as u8
	}
}

/// Terms recommended by the risk engine. Frozen into the loan created from
/// it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Encode, Decode, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct RiskAssessment {
	pub risk_tier: RiskTier,
	pub recommended_rate_bps: Bps,
}

/// One entry of an amortization schedule.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Encode, Decode, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Installment {
	pub due_at: Moment,
	pub payment: Balance,
	pub interest: Balance,
	pub principal: Balance,
	pub remaining_principal: Balance,
}
