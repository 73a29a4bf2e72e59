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

use lending_primitives::{Balance, Bps, LoanId, Moment};
use lending_traits::CollateralValuation;
use lending_types::LoanStatus;
use serde::Serialize;

use crate::{
	amortization,
	entities::loan::Loan,
	error::{Error, IneligibilityReason},
};

const LOG_TARGET: &str = "lending::liquidation";

/// Outcome of a liquidation evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LiquidationCheck {
	pub loan_id: LoanId,
	pub status: LoanStatus,
	pub current_debt: Balance,
	/// Not queried for loans that are not active. Also missing for an
	/// overdue loan whose collateral could not be valued.
	pub collateral_value: Option<Balance>,
	pub ltv_bps: Bps,
	pub threshold_bps: Bps,
	pub maturity_at: Moment,
	pub overdue: bool,
}

impl LiquidationCheck {
	pub fn is_eligible(&self) -> bool {
		self.ensure_eligible().is_ok()
	}

	pub fn ensure_eligible(&self) -> Result<(), Error> {
		let reason = if self.status != LoanStatus::Active {
			IneligibilityReason::NotActive(self.status)
		} else if self.ltv_bps >= self.threshold_bps || self.overdue {
			return Ok(());
		} else {
			IneligibilityReason::Healthy {
				ltv_bps: self.ltv_bps,
				threshold_bps: self.threshold_bps,
				maturity_at: self.maturity_at,
			}
		};

		Err(Error::NotEligibleForLiquidation {
			loan_id: self.loan_id,
			reason,
		})
	}
}

/// Decides whether a loan can be liquidated: it must be active and either
/// its loan-to-value reached the threshold or it is past maturity.
///
/// Never mutates anything.
#[derive(Clone, Debug)]
pub struct LiquidationMonitor {
	threshold_bps: Bps,
}

impl LiquidationMonitor {
	pub fn new(threshold_bps: Bps) -> Self {
		Self { threshold_bps }
	}

	pub fn evaluate<AccountId, V>(
		&self,
		loan: &Loan<AccountId>,
		valuation: &V,
		now: Moment,
	) -> Result<LiquidationCheck, Error>
	where
		V: CollateralValuation,
	{
		let current_debt = loan.current_debt(now)?;
		let mut check = LiquidationCheck {
			loan_id: loan.id(),
			status: loan.status(),
			current_debt,
			collateral_value: None,
			ltv_bps: 0,
			threshold_bps: self.threshold_bps,
			maturity_at: loan.maturity_at(),
			overdue: loan.is_overdue(now),
		};

		if !loan.is_active() {
			return Ok(check);
		}

		let collateral_value = match valuation.value_of(loan.collateral()) {
			Ok(value) => value,
			// Past maturity the loan is eligible whatever its collateral is worth
			Err(source) if check.overdue => {
				log::debug!(
					target: LOG_TARGET,
					"loan {} is overdue, collateral valuation unavailable: {}",
					check.loan_id,
					source
				);
				return Ok(check);
			}
			Err(source) => {
				return Err(Error::ValuationUnavailable {
					loan_id: loan.id(),
					source,
				})
			}
		};

		check.collateral_value = Some(collateral_value);
		check.ltv_bps = amortization::loan_to_value(current_debt, collateral_value);

		log::debug!(
			target: LOG_TARGET,
			"loan {} at {} bps against a threshold of {} bps, overdue: {}",
			check.loan_id,
			check.ltv_bps,
			check.threshold_bps,
			check.overdue
		);

		Ok(check)
	}
}
