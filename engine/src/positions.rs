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

use std::{collections::BTreeMap, fmt::Debug, sync::Mutex};

use lending_primitives::{Balance, Bps, LoanId, MAX_BPS};
use lending_types::FractionalPosition;
use sp_arithmetic::{
	helpers_128bit::multiply_by_rational_with_rounding,
	traits::{EnsureAdd, EnsureSub},
	ArithmeticError, Rounding,
};

use crate::{
	error::{Error, PositionParameter},
	sync,
};

const LOG_TARGET: &str = "lending::positions";

/// Proportional ownership of loans among co-investors.
pub struct FractionalPositionLedger<AccountId> {
	positions: Mutex<BTreeMap<LoanId, Vec<FractionalPosition<AccountId>>>>,
}

impl<AccountId> Default for FractionalPositionLedger<AccountId> {
	fn default() -> Self {
		Self {
			positions: Mutex::new(BTreeMap::new()),
		}
	}
}

impl<AccountId> FractionalPositionLedger<AccountId>
where
	AccountId: Clone + Ord + Debug,
{
	/// Registers a position. The caller is responsible for checking the loan
	/// exists. The position is either fully recorded or not at all.
	pub fn create_position(
		&self,
		loan_id: LoanId,
		investor: AccountId,
		share_bps: Bps,
		invested_amount: Balance,
	) -> Result<FractionalPosition<AccountId>, Error> {
		if share_bps == 0 {
			return Err(Error::InvalidPositionParameters {
				loan_id,
				reason: PositionParameter::ZeroShare,
			});
		}

		if invested_amount == 0 {
			return Err(Error::InvalidPositionParameters {
				loan_id,
				reason: PositionParameter::ZeroInvestment,
			});
		}

		let mut positions = sync::lock(&self.positions);
		let loan_positions = positions.entry(loan_id).or_default();

		if loan_positions.iter().any(|p| p.investor == investor) {
			return Err(Error::PositionAlreadyExists {
				loan_id,
				investor: format!("{investor:?}"),
			});
		}

		let allocated = loan_positions
			.iter()
			.try_fold(0, |total: Bps, p| total.ensure_add(p.share_bps))?;
		let available_bps = MAX_BPS.saturating_sub(allocated);

		if share_bps > available_bps {
			log::debug!(
				target: LOG_TARGET,
				"rejected {} bps for {:?} on loan {}, {} bps available",
				share_bps,
				investor,
				loan_id,
				available_bps
			);

			return Err(Error::OversubscribedPosition {
				loan_id,
				investor: format!("{investor:?}"),
				requested_bps: share_bps,
				available_bps,
			});
		}

		let position = FractionalPosition {
			loan_id,
			investor,
			share_bps,
			invested_amount,
		};
		loan_positions.push(position.clone());

		log::info!(
			target: LOG_TARGET,
			"{:?} holds {} bps of loan {}",
			position.investor,
			share_bps,
			loan_id
		);

		Ok(position)
	}

	pub fn positions(&self, loan_id: LoanId) -> Vec<FractionalPosition<AccountId>> {
		sync::lock(&self.positions)
			.get(&loan_id)
			.cloned()
			.unwrap_or_default()
	}

	/// Splits `proceeds` among the investors of a loan.
	///
	/// Investors are ordered by share descending, ties by investor
	/// ascending. Each receives `floor(proceeds · share / 10000)` except the
	/// last one who takes whatever is left, so the allocations always sum to
	/// `proceeds`.
	pub fn distribute(
		&self,
		loan_id: LoanId,
		proceeds: Balance,
	) -> Result<BTreeMap<AccountId, Balance>, Error> {
		let mut positions = self.positions(loan_id);
		if positions.is_empty() {
			return Err(Error::NoFractionalPositions(loan_id));
		}

		positions.sort_by(|a, b| {
			b.share_bps
				.cmp(&a.share_bps)
				.then_with(|| a.investor.cmp(&b.investor))
		});

		let mut allocations = BTreeMap::new();
		let mut distributed: Balance = 0;
		let last = positions.len() - 1;

		for (index, position) in positions.into_iter().enumerate() {
			let amount = match index == last {
				true => proceeds.ensure_sub(distributed)?,
				false => multiply_by_rational_with_rounding(
					proceeds,
					position.share_bps.into(),
					MAX_BPS.into(),
					Rounding::Down,
				)
				.ok_or(ArithmeticError::Overflow)?,
			};

			distributed = distributed.ensure_add(amount)?;
			allocations.insert(position.investor, amount);
		}

		log::info!(
			target: LOG_TARGET,
			"distributed {} among {} investors of loan {}",
			proceeds,
			allocations.len(),
			loan_id
		);

		Ok(allocations)
	}
}
