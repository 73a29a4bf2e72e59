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

use std::fmt;

use lending_primitives::{Bps, LoanId, Moment};
use lending_traits::{SettlementError, ValuationError};
use lending_types::{CollateralRef, LoanStatus};
use sp_arithmetic::ArithmeticError;

/// Precondition violated by the parameters of a loan operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidParameter {
	#[error("principal must be greater than zero")]
	ZeroPrincipal,
	#[error("duration must be greater than zero")]
	ZeroDuration,
	#[error("duration of {days} days exceeds the maximum of {max} days")]
	DurationTooLong { days: u32, max: u32 },
	#[error("collateral reference {0} is not well formed")]
	MalformedCollateral(CollateralRef),
	#[error("payment amount must be greater than zero")]
	ZeroAmount,
	#[error("risk tier ordinal {0} is out of range")]
	UnknownRiskTier(u8),
}

/// Why a loan could not be moved to liquidation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IneligibilityReason {
	#[error("loan status is {0:?}")]
	NotActive(LoanStatus),
	#[error(
		"loan-to-value of {ltv_bps} bps is below the {threshold_bps} bps threshold \
		 and the loan is not past its maturity at {maturity_at}"
	)]
	Healthy {
		ltv_bps: Bps,
		threshold_bps: Bps,
		maturity_at: Moment,
	},
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionParameter {
	#[error("share must be greater than zero")]
	ZeroShare,
	#[error("invested amount must be greater than zero")]
	ZeroInvestment,
}

/// Settlement call that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementOperation {
	Disburse,
	Collect,
	ReleaseCollateral,
}

impl fmt::Display for SettlementOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Disburse => "disburse",
			Self::Collect => "collect",
			Self::ReleaseCollateral => "release_collateral",
		};
		f.write_str(name)
	}
}

fn describe_loan(loan_id: &Option<LoanId>) -> String {
	match loan_id {
		Some(id) => format!("loan {id}"),
		None => "new loan".into(),
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("invalid parameters for {}: {reason}", describe_loan(.loan_id))]
	InvalidLoanParameters {
		loan_id: Option<LoanId>,
		reason: InvalidParameter,
	},

	#[error("loan {0} not found")]
	LoanNotFound(LoanId),

	#[error("loan {loan_id} has status {status:?}")]
	LoanNotActive { loan_id: LoanId, status: LoanStatus },

	#[error("loan {0} is already repaid")]
	AlreadyRepaid(LoanId),

	#[error("loan {loan_id} is not eligible for liquidation: {reason}")]
	NotEligibleForLiquidation {
		loan_id: LoanId,
		reason: IneligibilityReason,
	},

	#[error(
		"position of investor {investor} on loan {loan_id} requests {requested_bps} bps \
		 but only {available_bps} bps are available"
	)]
	OversubscribedPosition {
		loan_id: LoanId,
		investor: String,
		requested_bps: Bps,
		available_bps: Bps,
	},

	#[error("invalid position on loan {loan_id}: {reason}")]
	InvalidPositionParameters {
		loan_id: LoanId,
		reason: PositionParameter,
	},

	#[error("investor {investor} already holds a position on loan {loan_id}")]
	PositionAlreadyExists { loan_id: LoanId, investor: String },

	#[error("loan {0} has no fractional positions")]
	NoFractionalPositions(LoanId),

	#[error("collateral {collateral} is already pledged to {}", describe_loan(.loan_id))]
	CollateralAlreadyPledged {
		collateral: CollateralRef,
		loan_id: Option<LoanId>,
	},

	#[error("settlement {operation} failed for {}: {source}", describe_loan(.loan_id))]
	SettlementFailure {
		operation: SettlementOperation,
		loan_id: Option<LoanId>,
		source: SettlementError,
	},

	#[error("collateral valuation for loan {loan_id} unavailable: {source}")]
	ValuationUnavailable {
		loan_id: LoanId,
		source: ValuationError,
	},

	#[error("arithmetic error: {0:?}")]
	Arithmetic(ArithmeticError),
}

impl Error {
	/// External failures that may succeed when the caller retries. Local
	/// validation errors never do.
	pub fn is_retryable(&self) -> bool {
		matches!(
			self,
			Self::SettlementFailure { .. } | Self::ValuationUnavailable { .. }
		)
	}

	pub(crate) fn invalid(loan_id: Option<LoanId>, reason: InvalidParameter) -> Self {
		Self::InvalidLoanParameters { loan_id, reason }
	}
}

impl From<ArithmeticError> for Error {
	fn from(error: ArithmeticError) -> Self {
		Self::Arithmetic(error)
	}
}
