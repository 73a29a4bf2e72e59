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

use codec::{Decode, Encode};
use lending_primitives::{Balance, Bps, LoanId, Moment};
use lending_types::{CollateralRef, Installment, LoanStatus, RiskAssessment, SettlementRef};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_arithmetic::traits::{EnsureAdd, EnsureAddAssign, EnsureSub};

use crate::{amortization, error::Error};

/// A loan backed by an NFT.
///
/// Only created once the settlement authority confirmed the disbursement and
/// only mutated through the registry. Terminal loans are kept for audit.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct Loan<AccountId> {
	id: LoanId,
	borrower: AccountId,
	collateral: CollateralRef,

	/// Disbursed amount
	principal: Balance,

	/// Never increases
	principal_remaining: Balance,

	assessment: RiskAssessment,
	status: LoanStatus,
	created_at: Moment,
	maturity_at: Moment,

	/// Interest accrued up to `interest_updated_at` and not paid yet
	accrued_interest: Balance,
	interest_updated_at: Moment,

	disbursement_ref: SettlementRef,
}

impl<AccountId> Loan<AccountId> {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		id: LoanId,
		borrower: AccountId,
		collateral: CollateralRef,
		principal: Balance,
		assessment: RiskAssessment,
		created_at: Moment,
		maturity_at: Moment,
		disbursement_ref: SettlementRef,
	) -> Self {
		Self {
			id,
			borrower,
			collateral,
			principal,
			principal_remaining: principal,
			assessment,
			status: LoanStatus::Active,
			created_at,
			maturity_at,
			accrued_interest: 0,
			interest_updated_at: created_at,
			disbursement_ref,
		}
	}

	pub fn id(&self) -> LoanId {
		self.id
	}

	pub fn borrower(&self) -> &AccountId {
		&self.borrower
	}

	pub fn collateral(&self) -> &CollateralRef {
		&self.collateral
	}

	pub fn principal(&self) -> Balance {
		self.principal
	}

	pub fn principal_remaining(&self) -> Balance {
		self.principal_remaining
	}

	pub fn interest_rate_bps(&self) -> Bps {
		self.assessment.recommended_rate_bps
	}

	pub fn assessment(&self) -> &RiskAssessment {
		&self.assessment
	}

	pub fn status(&self) -> LoanStatus {
		self.status
	}

	pub fn created_at(&self) -> Moment {
		self.created_at
	}

	pub fn maturity_at(&self) -> Moment {
		self.maturity_at
	}

	pub fn disbursement_ref(&self) -> &SettlementRef {
		&self.disbursement_ref
	}

	pub fn is_active(&self) -> bool {
		self.status == LoanStatus::Active
	}

	pub fn is_overdue(&self, now: Moment) -> bool {
		now > self.maturity_at
	}

	/// Interest accrued and not paid as of `now`. Only active loans accrue.
	pub fn pending_interest(&self, now: Moment) -> Result<Balance, Error> {
		if !self.is_active() || now <= self.interest_updated_at {
			return Ok(self.accrued_interest);
		}

		let since_checkpoint = amortization::accrued_interest(
			self.principal_remaining,
			self.interest_rate_bps(),
			now.ensure_sub(self.interest_updated_at)?,
		)?;

		Ok(self.accrued_interest.ensure_add(since_checkpoint)?)
	}

	/// Remaining principal plus pending interest.
	pub fn current_debt(&self, now: Moment) -> Result<Balance, Error> {
		Ok(self.principal_remaining.ensure_add(self.pending_interest(now)?)?)
	}

	pub fn payment_schedule(&self, now: Moment) -> Result<Vec<Installment>, Error> {
		if !self.is_active() {
			return Ok(Vec::new());
		}

		Ok(amortization::payment_schedule(
			self.principal_remaining,
			self.interest_rate_bps(),
			self.pending_interest(now)?,
			now,
			self.maturity_at,
		)?)
	}

	/// Checkpoints the interest accrued until `now`.
	fn accrue(&mut self, now: Moment) -> Result<(), Error> {
		self.accrued_interest = self.pending_interest(now)?;
		self.interest_updated_at = self.interest_updated_at.max(now);
		Ok(())
	}

	fn ensure_can_transition(&self, next: LoanStatus) -> Result<(), Error> {
		match self.status.can_transition_to(next) {
			true => Ok(()),
			false => Err(Error::LoanNotActive {
				loan_id: self.id,
				status: self.status,
			}),
		}
	}

	pub fn ensure_active(&self) -> Result<(), Error> {
		self.ensure_can_transition(LoanStatus::Active)
	}

	/// Reduces the remaining principal, flooring at zero. A fully paid down
	/// loan stays active until it is repaid in full.
	pub fn apply_payment(&mut self, amount: Balance, now: Moment) -> Result<Balance, Error> {
		self.ensure_active()?;
		self.accrue(now)?;

		self.principal_remaining = self.principal_remaining.saturating_sub(amount);
		Ok(self.principal_remaining)
	}

	fn ensure_can_repay(&self) -> Result<(), Error> {
		match self.status {
			LoanStatus::Repaid => Err(Error::AlreadyRepaid(self.id)),
			_ => self.ensure_can_transition(LoanStatus::Repaid),
		}
	}

	/// Debt to collect for a full repayment at `now`.
	pub fn full_repayment_amount(&self, now: Moment) -> Result<Balance, Error> {
		self.ensure_can_repay()?;
		self.current_debt(now)
	}

	pub fn repay_full(&mut self, now: Moment) -> Result<Balance, Error> {
		self.ensure_can_repay()?;
		self.accrue(now)?;

		let mut repaid = self.principal_remaining;
		repaid.ensure_add_assign(self.accrued_interest)?;

		self.principal_remaining = 0;
		self.accrued_interest = 0;
		self.status = LoanStatus::Repaid;

		Ok(repaid)
	}

	/// Interest stops accruing once the loan leaves the active state.
	pub fn start_liquidation(&mut self, now: Moment) -> Result<(), Error> {
		self.ensure_can_transition(LoanStatus::PendingLiquidation)?;
		self.accrue(now)?;
		self.status = LoanStatus::PendingLiquidation;
		Ok(())
	}

	pub fn ensure_can_finalize_liquidation(&self) -> Result<(), Error> {
		self.ensure_can_transition(LoanStatus::Liquidated)
	}

	pub fn finalize_liquidation(&mut self) -> Result<(), Error> {
		self.ensure_can_finalize_liquidation()?;
		self.status = LoanStatus::Liquidated;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use lending_primitives::{SECONDS_PER_DAY, SECONDS_PER_YEAR};
	use lending_types::RiskTier;

	use super::*;

	const NOW: Moment = 1_700_000_000;

	fn loan(principal: Balance, rate: Bps) -> Loan<u64> {
		Loan::new(
			1,
			42,
			CollateralRef::new([1; 20], 7),
			principal,
			RiskAssessment {
				risk_tier: RiskTier::Medium,
				recommended_rate_bps: rate,
			},
			NOW,
			NOW + SECONDS_PER_YEAR,
			SettlementRef::new("disburse-1"),
		)
	}

	#[test]
	fn new_loan_is_active() {
		let loan = loan(1000, 1000);

		assert_eq!(loan.status(), LoanStatus::Active);
		assert_eq!(loan.principal_remaining(), 1000);
		assert_eq!(loan.current_debt(NOW), Ok(1000));
	}

	#[test]
	fn interest_accrues_on_remaining_principal() {
		let mut loan = loan(1000, 1000);

		assert_eq!(loan.current_debt(NOW + SECONDS_PER_YEAR), Ok(1100));

		// Half a year on 1000, then half a year on 500
		let half = SECONDS_PER_YEAR / 2;
		assert_eq!(loan.apply_payment(500, NOW + half), Ok(500));
		assert_eq!(loan.current_debt(NOW + 2 * half), Ok(500 + 50 + 25));
	}

	#[test]
	fn payment_floors_at_zero() {
		let mut loan = loan(1000, 1000);

		assert_eq!(loan.apply_payment(5000, NOW), Ok(0));
		assert_eq!(loan.status(), LoanStatus::Active);
	}

	#[test]
	fn repay_closes_the_loan() {
		let mut loan = loan(1000, 1000);

		assert_eq!(loan.repay_full(NOW + SECONDS_PER_YEAR), Ok(1100));
		assert_eq!(loan.status(), LoanStatus::Repaid);
		assert_eq!(loan.principal_remaining(), 0);
		assert_eq!(loan.current_debt(NOW + 2 * SECONDS_PER_YEAR), Ok(0));

		assert_eq!(loan.repay_full(NOW), Err(Error::AlreadyRepaid(1)));
		assert_eq!(
			loan.apply_payment(1, NOW),
			Err(Error::LoanNotActive {
				loan_id: 1,
				status: LoanStatus::Repaid
			})
		);
	}

	#[test]
	fn liquidation_freezes_interest() {
		let mut loan = loan(1000, 1000);

		loan.start_liquidation(NOW + SECONDS_PER_YEAR).unwrap();
		assert_eq!(loan.status(), LoanStatus::PendingLiquidation);
		assert_eq!(loan.current_debt(NOW + 2 * SECONDS_PER_YEAR), Ok(1100));

		assert!(loan.start_liquidation(NOW).is_err());
		assert_eq!(
			loan.repay_full(NOW),
			Err(Error::LoanNotActive {
				loan_id: 1,
				status: LoanStatus::PendingLiquidation
			})
		);

		loan.finalize_liquidation().unwrap();
		assert_eq!(loan.status(), LoanStatus::Liquidated);
		assert!(loan.finalize_liquidation().is_err());
	}

	#[test]
	fn finalize_requires_pending_liquidation() {
		let mut loan = loan(1000, 1000);

		assert_eq!(
			loan.finalize_liquidation(),
			Err(Error::LoanNotActive {
				loan_id: 1,
				status: LoanStatus::Active
			})
		);
	}

	#[test]
	fn overdue_after_maturity() {
		let loan = loan(1000, 1000);

		assert!(!loan.is_overdue(NOW + SECONDS_PER_YEAR));
		assert!(loan.is_overdue(NOW + SECONDS_PER_YEAR + 1));
		assert!(!loan.is_overdue(NOW + SECONDS_PER_DAY));
	}
}
