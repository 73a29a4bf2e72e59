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

use lending_primitives::{Balance, Bps, Moment};
use lending_types::{Installment, PortfolioHealth, PortfolioSnapshot};
use serde::Serialize;
use sp_arithmetic::traits::{EnsureAdd, EnsureDiv};

use crate::{entities::loan::Loan, error::Error};

/// Detailed view of a single loan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoanAnalytics<AccountId> {
	pub loan: Loan<AccountId>,
	pub current_debt: Balance,
	pub ltv_bps: Bps,
	pub liquidation_eligible: bool,
	pub schedule: Vec<Installment>,
}

/// Read only rollup over a set of loans.
pub struct PortfolioAggregator;

impl PortfolioAggregator {
	/// `is_at_risk` tells whether an active loan is currently liquidation
	/// eligible.
	pub fn snapshot<AccountId, F>(
		loans: &[Loan<AccountId>],
		now: Moment,
		mut is_at_risk: F,
	) -> Result<PortfolioSnapshot, Error>
	where
		F: FnMut(&Loan<AccountId>) -> Result<bool, Error>,
	{
		let mut total_loaned: Balance = 0;
		let mut total_debt: Balance = 0;
		let mut rate_sum: u64 = 0;
		let mut active_loan_count: u32 = 0;
		let mut liquidation_risk_count: u32 = 0;

		for loan in loans {
			total_loaned = total_loaned.ensure_add(loan.principal())?;

			if !loan.is_active() {
				continue;
			}

			active_loan_count = active_loan_count.ensure_add(1)?;
			total_debt = total_debt.ensure_add(loan.current_debt(now)?)?;
			rate_sum = rate_sum.ensure_add(u64::from(loan.interest_rate_bps()))?;

			if is_at_risk(loan)? {
				liquidation_risk_count = liquidation_risk_count.ensure_add(1)?;
			}
		}

		let average_apr_bps = match active_loan_count {
			0 => 0,
			count => Bps::try_from(rate_sum.ensure_div(u64::from(count))?).unwrap_or(Bps::MAX),
		};

		let loan_count = u32::try_from(loans.len()).unwrap_or(u32::MAX);

		Ok(PortfolioSnapshot {
			total_loaned,
			total_debt,
			average_apr_bps,
			loan_count,
			active_loan_count,
			liquidation_risk_count,
			portfolio_health: PortfolioHealth::classify(liquidation_risk_count, loan_count),
		})
	}
}
