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

//! # NFT lending engine
//!
//! Tracks loans backed by NFT collateral: risk adjusted terms, payments,
//! liquidation and the distribution of proceeds among co-investors.
//!
//! The engine never moves value itself. Every transfer goes through the
//! [`SettlementAuthority`] configured in [`Config`], and local state is only
//! committed after the authority confirmed the transfer.

use std::{collections::BTreeMap, fmt::Debug};

pub use config::{ConfigError, EngineConfig};
pub use entities::loan::Loan;
pub use error::{Error, IneligibilityReason, InvalidParameter, PositionParameter, SettlementOperation};
use journal::PaymentJournal;
use lending_primitives::{Balance, Bps, LoanId};
use lending_traits::{CollateralValuation, RiskSignal, SettlementAuthority, TimeAsSecs};
use lending_types::{
	CollateralRef, FractionalPosition, LoanStatus, Payment, PortfolioSnapshot, RiskAssessment,
};
pub use liquidation::{LiquidationCheck, LiquidationMonitor};
use portfolio::PortfolioAggregator;
pub use portfolio::LoanAnalytics;
use positions::FractionalPositionLedger;
use registry::{LoanRegistry, LoanRequest};
use risk::RiskEngine;
pub use risk::RateTable;

pub mod amortization;
pub mod config;
pub mod entities;
pub mod error;
pub mod journal;
pub mod liquidation;
pub mod portfolio;
pub mod positions;
pub mod registry;
pub mod risk;
mod sync;

#[cfg(test)]
mod tests;

const LOG_TARGET: &str = "lending::engine";

/// Collaborators of the engine.
pub trait Config {
	type AccountId: Clone + Ord + Debug + Send + Sync;

	/// Moves funds and collateral.
	type Settlement: SettlementAuthority<Self::AccountId> + Send + Sync;

	/// Prices the collateral of a loan.
	type Valuation: CollateralValuation + Send + Sync;

	type Time: TimeAsSecs + Send + Sync;
}

pub struct LendingEngine<T: Config> {
	config: EngineConfig,
	settlement: T::Settlement,
	valuation: T::Valuation,
	time: T::Time,
	risk: RiskEngine,
	monitor: LiquidationMonitor,
	registry: LoanRegistry<T::AccountId>,
	positions: FractionalPositionLedger<T::AccountId>,
}

impl<T: Config> LendingEngine<T> {
	pub fn new(
		config: EngineConfig,
		settlement: T::Settlement,
		valuation: T::Valuation,
		time: T::Time,
	) -> Result<Self, ConfigError> {
		config.validate()?;

		log::info!(
			target: LOG_TARGET,
			"starting lending engine, liquidation threshold at {} bps",
			config.liquidation_threshold_bps
		);

		Ok(Self {
			risk: RiskEngine::new(config.rate_table.clone()),
			monitor: LiquidationMonitor::new(config.liquidation_threshold_bps),
			registry: LoanRegistry::new(
				config.max_duration_days,
				PaymentJournal::new(config.journal_capacity),
			),
			positions: FractionalPositionLedger::default(),
			config,
			settlement,
			valuation,
			time,
		})
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn settlement(&self) -> &T::Settlement {
		&self.settlement
	}

	pub fn valuation(&self) -> &T::Valuation {
		&self.valuation
	}

	pub fn assess_risk(&self, signal: &impl RiskSignal) -> Result<RiskAssessment, Error> {
		self.risk.assess(signal)
	}

	pub fn create_loan(
		&self,
		borrower: T::AccountId,
		collateral: CollateralRef,
		principal: Balance,
		duration_days: u32,
		assessment: RiskAssessment,
	) -> Result<Loan<T::AccountId>, Error> {
		let request = LoanRequest {
			borrower,
			collateral,
			principal,
			duration_days,
			assessment,
		};

		self.registry
			.create_loan(request, self.time.now(), &self.settlement)
	}

	pub fn apply_payment(&self, loan_id: LoanId, amount: Balance) -> Result<Balance, Error> {
		self.registry
			.apply_payment(loan_id, amount, self.time.now())
	}

	pub fn repay_full(&self, loan_id: LoanId) -> Result<Balance, Error> {
		self.registry
			.repay_full(loan_id, self.time.now(), &self.settlement)
	}

	fn evaluate(&self, loan: &Loan<T::AccountId>) -> Result<LiquidationCheck, Error> {
		self.monitor
			.evaluate(loan, &self.valuation, self.time.now())
	}

	pub fn liquidation_check(&self, loan_id: LoanId) -> Result<LiquidationCheck, Error> {
		self.evaluate(&self.registry.get(loan_id)?)
	}

	pub fn is_liquidation_eligible(&self, loan_id: LoanId) -> Result<bool, Error> {
		Ok(self.liquidation_check(loan_id)?.is_eligible())
	}

	/// Eligibility is evaluated again under the loan lock before the
	/// transition.
	pub fn initiate_liquidation(&self, loan_id: LoanId) -> Result<LoanStatus, Error> {
		let now = self.time.now();
		self.registry.initiate_liquidation(loan_id, now, |loan| {
			self.monitor
				.evaluate(loan, &self.valuation, now)?
				.ensure_eligible()
		})
	}

	pub fn finalize_liquidation(&self, loan_id: LoanId) -> Result<LoanStatus, Error> {
		self.registry
			.finalize_liquidation(loan_id, &self.settlement)
	}

	/// Active loans currently eligible for liquidation. Loans whose
	/// collateral cannot be valued are skipped and reported in the logs.
	pub fn scan_liquidations(&self) -> Vec<LoanId> {
		self.registry
			.loans()
			.iter()
			.filter(|loan| loan.is_active())
			.filter_map(|loan| match self.evaluate(loan) {
				Ok(check) => check.is_eligible().then_some(loan.id()),
				Err(error) => {
					log::warn!(
						target: LOG_TARGET,
						"skipping loan {} in liquidation scan: {}",
						loan.id(),
						error
					);
					None
				}
			})
			.collect()
	}

	pub fn get_loan(&self, loan_id: LoanId) -> Result<Loan<T::AccountId>, Error> {
		self.registry.get(loan_id)
	}

	pub fn get_loan_analytics(&self, loan_id: LoanId) -> Result<LoanAnalytics<T::AccountId>, Error> {
		let now = self.time.now();
		let loan = self.registry.get(loan_id)?;
		let check = self.monitor.evaluate(&loan, &self.valuation, now)?;

		Ok(LoanAnalytics {
			current_debt: check.current_debt,
			ltv_bps: check.ltv_bps,
			liquidation_eligible: check.is_eligible(),
			schedule: loan.payment_schedule(now)?,
			loan,
		})
	}

	pub fn get_risk_assessment(&self, loan_id: LoanId) -> Result<RiskAssessment, Error> {
		Ok(*self.registry.get(loan_id)?.assessment())
	}

	pub fn get_user_loans(&self, borrower: &T::AccountId) -> Vec<Loan<T::AccountId>> {
		self.registry.list_by_borrower(borrower)
	}

	pub fn get_portfolio_stats(&self, borrower: &T::AccountId) -> Result<PortfolioSnapshot, Error> {
		let now = self.time.now();
		let loans = self.registry.list_by_borrower(borrower);

		PortfolioAggregator::snapshot(&loans, now, |loan| {
			Ok(self
				.monitor
				.evaluate(loan, &self.valuation, now)?
				.is_eligible())
		})
	}

	pub fn create_fractional_position(
		&self,
		loan_id: LoanId,
		investor: T::AccountId,
		share_bps: Bps,
		invested_amount: Balance,
	) -> Result<FractionalPosition<T::AccountId>, Error> {
		if !self.registry.contains(loan_id) {
			return Err(Error::LoanNotFound(loan_id));
		}

		self.positions
			.create_position(loan_id, investor, share_bps, invested_amount)
	}

	pub fn get_positions(&self, loan_id: LoanId) -> Vec<FractionalPosition<T::AccountId>> {
		self.positions.positions(loan_id)
	}

	pub fn distribute_proceeds(
		&self,
		loan_id: LoanId,
		proceeds: Balance,
	) -> Result<BTreeMap<T::AccountId, Balance>, Error> {
		if !self.registry.contains(loan_id) {
			return Err(Error::LoanNotFound(loan_id));
		}

		self.positions.distribute(loan_id, proceeds)
	}

	pub fn get_payment_history(&self, loan_id: Option<LoanId>) -> Vec<Payment> {
		self.registry.journal().history(loan_id)
	}
}
