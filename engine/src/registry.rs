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

use std::{
	collections::BTreeMap,
	fmt::Debug,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc, Mutex, RwLock,
	},
};

use lending_primitives::{Balance, LoanId, Moment, SECONDS_PER_DAY};
use lending_traits::SettlementAuthority;
use lending_types::{CollateralRef, LoanStatus, Payment, PaymentKind, RiskAssessment};
use sp_arithmetic::traits::{EnsureAdd, EnsureMul};

use crate::{
	entities::loan::Loan,
	error::{Error, InvalidParameter, SettlementOperation},
	journal::PaymentJournal,
	sync,
};

const LOG_TARGET: &str = "lending::registry";

/// Terms requested for a new loan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoanRequest<AccountId> {
	pub borrower: AccountId,
	pub collateral: CollateralRef,
	pub principal: Balance,
	pub duration_days: u32,
	pub assessment: RiskAssessment,
}

/// Authoritative store of loans.
///
/// Each loan sits behind its own lock, so mutations of one loan are
/// serialized while different loans progress in parallel. Settlement calls
/// are made while holding the loan lock and local state is only committed
/// after the authority confirmed.
pub struct LoanRegistry<AccountId> {
	loans: RwLock<BTreeMap<LoanId, Arc<Mutex<Loan<AccountId>>>>>,
	by_borrower: RwLock<BTreeMap<AccountId, Vec<LoanId>>>,

	/// Collateral backing a non terminal loan. `None` while the
	/// disbursement is in flight.
	pledged: Mutex<BTreeMap<CollateralRef, Option<LoanId>>>,

	last_loan_id: AtomicU64,
	max_duration_days: u32,
	journal: PaymentJournal,
}

impl<AccountId> LoanRegistry<AccountId>
where
	AccountId: Clone + Ord + Debug,
{
	pub fn new(max_duration_days: u32, journal: PaymentJournal) -> Self {
		Self {
			loans: RwLock::new(BTreeMap::new()),
			by_borrower: RwLock::new(BTreeMap::new()),
			pledged: Mutex::new(BTreeMap::new()),
			last_loan_id: AtomicU64::new(0),
			max_duration_days,
			journal,
		}
	}

	pub fn journal(&self) -> &PaymentJournal {
		&self.journal
	}

	fn handle(&self, loan_id: LoanId) -> Result<Arc<Mutex<Loan<AccountId>>>, Error> {
		sync::read(&self.loans)
			.get(&loan_id)
			.cloned()
			.ok_or(Error::LoanNotFound(loan_id))
	}

	/// Validates the request and computes its maturity.
	fn validate(&self, request: &LoanRequest<AccountId>, now: Moment) -> Result<Moment, Error> {
		let invalid = |reason| Error::invalid(None, reason);

		if request.principal == 0 {
			return Err(invalid(InvalidParameter::ZeroPrincipal));
		}

		if request.duration_days == 0 {
			return Err(invalid(InvalidParameter::ZeroDuration));
		}

		if request.duration_days > self.max_duration_days {
			return Err(invalid(InvalidParameter::DurationTooLong {
				days: request.duration_days,
				max: self.max_duration_days,
			}));
		}

		if !request.collateral.is_well_formed() {
			return Err(invalid(InvalidParameter::MalformedCollateral(
				request.collateral,
			)));
		}

		let duration = SECONDS_PER_DAY.ensure_mul(u64::from(request.duration_days))?;
		Ok(now.ensure_add(duration)?)
	}

	fn pledge(&self, collateral: &CollateralRef) -> Result<(), Error> {
		let mut pledged = sync::lock(&self.pledged);
		if let Some(loan_id) = pledged.get(collateral) {
			return Err(Error::CollateralAlreadyPledged {
				collateral: *collateral,
				loan_id: *loan_id,
			});
		}

		pledged.insert(*collateral, None);
		Ok(())
	}

	fn unpledge(&self, collateral: &CollateralRef) {
		sync::lock(&self.pledged).remove(collateral);
	}

	/// Creates an active loan once the settlement authority confirmed the
	/// disbursement. Nothing is stored if it does not.
	pub fn create_loan<S>(
		&self,
		request: LoanRequest<AccountId>,
		now: Moment,
		settlement: &S,
	) -> Result<Loan<AccountId>, Error>
	where
		S: SettlementAuthority<AccountId>,
	{
		let maturity_at = self.validate(&request, now)?;
		self.pledge(&request.collateral)?;

		let disbursement_ref =
			match settlement.disburse(&request.borrower, &request.collateral, request.principal) {
				Ok(reference) => reference,
				Err(source) => {
					self.unpledge(&request.collateral);
					log::warn!(
						target: LOG_TARGET,
						"disbursement of {} to {:?} against {} failed: {}",
						request.principal,
						request.borrower,
						request.collateral,
						source
					);

					return Err(Error::SettlementFailure {
						operation: SettlementOperation::Disburse,
						loan_id: None,
						source,
					});
				}
			};

		let loan_id = self.last_loan_id.fetch_add(1, Ordering::SeqCst).ensure_add(1)?;
		let loan = Loan::new(
			loan_id,
			request.borrower.clone(),
			request.collateral,
			request.principal,
			request.assessment,
			now,
			maturity_at,
			disbursement_ref,
		);

		sync::write(&self.loans).insert(loan_id, Arc::new(Mutex::new(loan.clone())));
		sync::write(&self.by_borrower)
			.entry(request.borrower)
			.or_default()
			.push(loan_id);
		sync::lock(&self.pledged).insert(request.collateral, Some(loan_id));

		log::info!(
			target: LOG_TARGET,
			"created loan {} of {} at {} bps against {}, maturity at {}",
			loan_id,
			loan.principal(),
			loan.interest_rate_bps(),
			loan.collateral(),
			maturity_at
		);

		Ok(loan)
	}

	/// Pays down principal. Returns the remaining principal.
	pub fn apply_payment(
		&self,
		loan_id: LoanId,
		amount: Balance,
		now: Moment,
	) -> Result<Balance, Error> {
		let handle = self.handle(loan_id)?;
		let mut loan = sync::lock(&handle);

		loan.ensure_active()?;
		if amount == 0 {
			return Err(Error::invalid(Some(loan_id), InvalidParameter::ZeroAmount));
		}

		let remaining = loan.apply_payment(amount, now)?;
		self.journal.append(Payment {
			loan_id,
			amount,
			kind: PaymentKind::Scheduled,
			applied_at: now,
			external_ref: None,
		});

		log::info!(
			target: LOG_TARGET,
			"applied payment of {} to loan {}, {} principal remaining",
			amount,
			loan_id,
			remaining
		);

		Ok(remaining)
	}

	/// Collects the whole debt and closes the loan. Returns the collected
	/// amount.
	pub fn repay_full<S>(&self, loan_id: LoanId, now: Moment, settlement: &S) -> Result<Balance, Error>
	where
		S: SettlementAuthority<AccountId>,
	{
		let handle = self.handle(loan_id)?;
		let mut loan = sync::lock(&handle);

		let amount = loan.full_repayment_amount(now)?;
		let reference = settlement.collect(loan.borrower(), amount).map_err(|source| {
			log::warn!(
				target: LOG_TARGET,
				"collection of {} for loan {} failed: {}",
				amount,
				loan_id,
				source
			);

			Error::SettlementFailure {
				operation: SettlementOperation::Collect,
				loan_id: Some(loan_id),
				source,
			}
		})?;

		loan.repay_full(now)?;
		self.unpledge(loan.collateral());
		self.journal.append(Payment {
			loan_id,
			amount,
			kind: PaymentKind::FullRepayment,
			applied_at: now,
			external_ref: Some(reference),
		});

		log::info!(target: LOG_TARGET, "loan {} repaid with {}", loan_id, amount);

		Ok(amount)
	}

	/// Moves an active loan to pending liquidation. `ensure_eligible` runs
	/// under the loan lock so the decision cannot be raced.
	pub fn initiate_liquidation<F>(
		&self,
		loan_id: LoanId,
		now: Moment,
		ensure_eligible: F,
	) -> Result<LoanStatus, Error>
	where
		F: FnOnce(&Loan<AccountId>) -> Result<(), Error>,
	{
		let handle = self.handle(loan_id)?;
		let mut loan = sync::lock(&handle);

		ensure_eligible(&loan)?;
		loan.start_liquidation(now)?;

		log::info!(target: LOG_TARGET, "loan {} pending liquidation", loan_id);

		Ok(loan.status())
	}

	/// Completes a liquidation once the authority released the collateral.
	pub fn finalize_liquidation<S>(&self, loan_id: LoanId, settlement: &S) -> Result<LoanStatus, Error>
	where
		S: SettlementAuthority<AccountId>,
	{
		let handle = self.handle(loan_id)?;
		let mut loan = sync::lock(&handle);

		loan.ensure_can_finalize_liquidation()?;
		let reference = settlement
			.release_collateral(loan.collateral())
			.map_err(|source| {
				log::warn!(
					target: LOG_TARGET,
					"collateral release for loan {} failed: {}",
					loan_id,
					source
				);

				Error::SettlementFailure {
					operation: SettlementOperation::ReleaseCollateral,
					loan_id: Some(loan_id),
					source,
				}
			})?;

		loan.finalize_liquidation()?;
		self.unpledge(loan.collateral());

		log::info!(
			target: LOG_TARGET,
			"loan {} liquidated, collateral released in {}",
			loan_id,
			reference
		);

		Ok(loan.status())
	}

	/// Consistent snapshot of a loan.
	pub fn get(&self, loan_id: LoanId) -> Result<Loan<AccountId>, Error> {
		let handle = self.handle(loan_id)?;
		let loan = sync::lock(&handle).clone();
		Ok(loan)
	}

	pub fn contains(&self, loan_id: LoanId) -> bool {
		sync::read(&self.loans).contains_key(&loan_id)
	}

	pub fn list_by_borrower(&self, borrower: &AccountId) -> Vec<Loan<AccountId>> {
		let loan_ids = sync::read(&self.by_borrower)
			.get(borrower)
			.cloned()
			.unwrap_or_default();

		loan_ids
			.into_iter()
			.filter_map(|loan_id| self.get(loan_id).ok())
			.collect()
	}

	/// Snapshot of every loan, ordered by identifier.
	pub fn loans(&self) -> Vec<Loan<AccountId>> {
		let handles = sync::read(&self.loans).values().cloned().collect::<Vec<_>>();
		handles
			.iter()
			.map(|handle| sync::lock(handle).clone())
			.collect()
	}

	pub fn is_pledged(&self, collateral: &CollateralRef) -> bool {
		sync::lock(&self.pledged).contains_key(collateral)
	}
}
