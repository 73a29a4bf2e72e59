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

//! Scenario replay against in-memory collaborators.

use std::{
	collections::BTreeMap,
	io::Write,
	sync::{
		atomic::{AtomicBool, AtomicU64, Ordering},
		Mutex,
	},
};

use lending_engine::{
	Config, ConfigError, EngineConfig, Error, LendingEngine, LiquidationCheck, Loan, LoanAnalytics,
};
use lending_primitives::{Balance, Bps, LoanId, Moment};
use lending_traits::{
	CollateralValuation, ManualClock, SettlementAuthority, SettlementError, TimeAsSecs,
	ValuationError,
};
use lending_types::{
	CollateralRef, FractionalPosition, LoanStatus, Payment, PortfolioSnapshot, RiskTier,
	SettlementRef,
};
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "lending::simulation";

pub type AccountId = String;

pub struct SimulationRuntime;

impl Config for SimulationRuntime {
	type AccountId = AccountId;
	type Settlement = SimulatedSettlement;
	type Time = ManualClock;
	type Valuation = PriceBook;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Transfer {
	Disburse {
		reference: SettlementRef,
		borrower: AccountId,
		collateral: CollateralRef,
		amount: Balance,
	},
	Collect {
		reference: SettlementRef,
		payer: AccountId,
		amount: Balance,
	},
	ReleaseCollateral {
		reference: SettlementRef,
		collateral: CollateralRef,
	},
}

/// Settlement authority confirming every transfer, unless told to reject
/// the next one.
#[derive(Default)]
pub struct SimulatedSettlement {
	last_reference: AtomicU64,
	reject_next: AtomicBool,
	transfers: Mutex<Vec<Transfer>>,
}

impl SimulatedSettlement {
	pub fn reject_next(&self) {
		self.reject_next.store(true, Ordering::SeqCst);
	}

	pub fn transfers(&self) -> Vec<Transfer> {
		match self.transfers.lock() {
			Ok(transfers) => transfers.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	fn settle(
		&self,
		transfer: impl FnOnce(SettlementRef) -> Transfer,
	) -> Result<SettlementRef, SettlementError> {
		if self.reject_next.swap(false, Ordering::SeqCst) {
			return Err(SettlementError::Rejected("rejected by scenario".into()));
		}

		let id = self.last_reference.fetch_add(1, Ordering::SeqCst) + 1;
		let reference = SettlementRef::new(format!("tx-{id}"));

		let mut transfers = match self.transfers.lock() {
			Ok(transfers) => transfers,
			Err(poisoned) => poisoned.into_inner(),
		};
		transfers.push(transfer(reference.clone()));

		Ok(reference)
	}
}

impl SettlementAuthority<AccountId> for SimulatedSettlement {
	fn disburse(
		&self,
		borrower: &AccountId,
		collateral: &CollateralRef,
		principal: Balance,
	) -> Result<SettlementRef, SettlementError> {
		self.settle(|reference| Transfer::Disburse {
			reference,
			borrower: borrower.clone(),
			collateral: *collateral,
			amount: principal,
		})
	}

	fn collect(&self, payer: &AccountId, amount: Balance) -> Result<SettlementRef, SettlementError> {
		self.settle(|reference| Transfer::Collect {
			reference,
			payer: payer.clone(),
			amount,
		})
	}

	fn release_collateral(
		&self,
		collateral: &CollateralRef,
	) -> Result<SettlementRef, SettlementError> {
		self.settle(|reference| Transfer::ReleaseCollateral {
			reference,
			collateral: *collateral,
		})
	}
}

/// Collateral prices set by the scenario.
#[derive(Default)]
pub struct PriceBook(Mutex<BTreeMap<CollateralRef, Balance>>);

impl PriceBook {
	pub fn set(&self, collateral: CollateralRef, value: Balance) {
		match self.0.lock() {
			Ok(mut prices) => prices.insert(collateral, value),
			Err(poisoned) => poisoned.into_inner().insert(collateral, value),
		};
	}
}

impl CollateralValuation for PriceBook {
	fn value_of(&self, collateral: &CollateralRef) -> Result<Balance, ValuationError> {
		let prices = match self.0.lock() {
			Ok(prices) => prices,
			Err(poisoned) => poisoned.into_inner(),
		};

		prices
			.get(collateral)
			.copied()
			.ok_or(ValuationError::NotFound(*collateral))
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
	#[serde(default)]
	pub start_time: Option<Moment>,

	#[serde(default)]
	pub collateral_values: BTreeMap<CollateralRef, Balance>,

	pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
	CreateLoan {
		borrower: AccountId,
		collateral: CollateralRef,
		principal: Balance,
		duration_days: u32,
		risk_tier: RiskTier,
	},
	ApplyPayment {
		loan_id: LoanId,
		amount: Balance,
	},
	RepayFull {
		loan_id: LoanId,
	},
	SetCollateralValue {
		collateral: CollateralRef,
		value: Balance,
	},
	AdvanceDays {
		days: u64,
	},
	CheckLiquidation {
		loan_id: LoanId,
	},
	InitiateLiquidation {
		loan_id: LoanId,
	},
	FinalizeLiquidation {
		loan_id: LoanId,
	},
	CreatePosition {
		loan_id: LoanId,
		investor: AccountId,
		share_bps: Bps,
		invested_amount: Balance,
	},
	DistributeProceeds {
		loan_id: LoanId,
		proceeds: Balance,
	},
	Analytics {
		loan_id: LoanId,
	},
	Portfolio {
		borrower: AccountId,
	},
	History {
		#[serde(default)]
		loan_id: Option<LoanId>,
	},
	Scan,
	RejectNextSettlement,
}

impl Step {
	pub fn name(&self) -> &'static str {
		match self {
			Step::CreateLoan { .. } => "create_loan",
			Step::ApplyPayment { .. } => "apply_payment",
			Step::RepayFull { .. } => "repay_full",
			Step::SetCollateralValue { .. } => "set_collateral_value",
			Step::AdvanceDays { .. } => "advance_days",
			Step::CheckLiquidation { .. } => "check_liquidation",
			Step::InitiateLiquidation { .. } => "initiate_liquidation",
			Step::FinalizeLiquidation { .. } => "finalize_liquidation",
			Step::CreatePosition { .. } => "create_position",
			Step::DistributeProceeds { .. } => "distribute_proceeds",
			Step::Analytics { .. } => "analytics",
			Step::Portfolio { .. } => "portfolio",
			Step::History { .. } => "history",
			Step::Scan => "scan",
			Step::RejectNextSettlement => "reject_next_settlement",
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StepOutput {
	Loan(Loan<AccountId>),
	Amount(Balance),
	Status(LoanStatus),
	Liquidation(LiquidationCheck),
	Analytics(LoanAnalytics<AccountId>),
	Portfolio(PortfolioSnapshot),
	Payments(Vec<Payment>),
	Position(FractionalPosition<AccountId>),
	Allocations(BTreeMap<AccountId, Balance>),
	LoanIds(Vec<LoanId>),
	Time(Moment),
	Done,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
	pub step: usize,
	pub action: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub result: Option<StepOutput>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub retryable: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
	pub steps: usize,
	pub failed: usize,
	pub transfers: Vec<Transfer>,
}

pub struct Simulation {
	engine: LendingEngine<SimulationRuntime>,
	clock: ManualClock,
}

impl Simulation {
	pub fn new(config: EngineConfig, start_time: Moment) -> Result<Self, ConfigError> {
		let clock = ManualClock::new(start_time);
		let engine = LendingEngine::new(
			config,
			SimulatedSettlement::default(),
			PriceBook::default(),
			clock.clone(),
		)?;

		Ok(Self { engine, clock })
	}

	pub fn run_step(&self, step: Step) -> Result<StepOutput, Error> {
		let engine = &self.engine;

		let output = match step {
			Step::CreateLoan {
				borrower,
				collateral,
				principal,
				duration_days,
				risk_tier,
			} => {
				let assessment = engine.assess_risk(&risk_tier)?;
				StepOutput::Loan(engine.create_loan(
					borrower,
					collateral,
					principal,
					duration_days,
					assessment,
				)?)
			}
			Step::ApplyPayment { loan_id, amount } => {
				StepOutput::Amount(engine.apply_payment(loan_id, amount)?)
			}
			Step::RepayFull { loan_id } => StepOutput::Amount(engine.repay_full(loan_id)?),
			Step::SetCollateralValue { collateral, value } => {
				engine.valuation().set(collateral, value);
				StepOutput::Done
			}
			Step::AdvanceDays { days } => {
				self.clock.advance_days(days);
				StepOutput::Time(self.clock.now())
			}
			Step::CheckLiquidation { loan_id } => {
				StepOutput::Liquidation(engine.liquidation_check(loan_id)?)
			}
			Step::InitiateLiquidation { loan_id } => {
				StepOutput::Status(engine.initiate_liquidation(loan_id)?)
			}
			Step::FinalizeLiquidation { loan_id } => {
				StepOutput::Status(engine.finalize_liquidation(loan_id)?)
			}
			Step::CreatePosition {
				loan_id,
				investor,
				share_bps,
				invested_amount,
			} => StepOutput::Position(engine.create_fractional_position(
				loan_id,
				investor,
				share_bps,
				invested_amount,
			)?),
			Step::DistributeProceeds { loan_id, proceeds } => {
				StepOutput::Allocations(engine.distribute_proceeds(loan_id, proceeds)?)
			}
			Step::Analytics { loan_id } => {
				StepOutput::Analytics(engine.get_loan_analytics(loan_id)?)
			}
			Step::Portfolio { borrower } => {
				StepOutput::Portfolio(engine.get_portfolio_stats(&borrower)?)
			}
			Step::History { loan_id } => StepOutput::Payments(engine.get_payment_history(loan_id)),
			Step::Scan => StepOutput::LoanIds(engine.scan_liquidations()),
			Step::RejectNextSettlement => {
				engine.settlement().reject_next();
				StepOutput::Done
			}
		};

		Ok(output)
	}

	/// Replays `scenario`, writing one JSON report per step followed by a
	/// summary. Failed steps are reported and the replay goes on.
	pub fn run(&self, scenario: Scenario, mut out: impl Write) -> std::io::Result<Summary> {
		for (collateral, value) in scenario.collateral_values {
			self.engine.valuation().set(collateral, value);
		}

		let steps = scenario.steps.len();
		let mut failed = 0;

		for (index, step) in scenario.steps.into_iter().enumerate() {
			let action = step.name();
			let report = match self.run_step(step) {
				Ok(result) => StepReport {
					step: index + 1,
					action,
					result: Some(result),
					error: None,
					retryable: None,
				},
				Err(error) => {
					failed += 1;
					log::debug!(target: LOG_TARGET, "step {} ({}) failed: {}", index + 1, action, error);

					StepReport {
						step: index + 1,
						action,
						result: None,
						retryable: Some(error.is_retryable()),
						error: Some(error.to_string()),
					}
				}
			};

			serde_json::to_writer(&mut out, &report)?;
			writeln!(out)?;
		}

		let summary = Summary {
			steps,
			failed,
			transfers: self.engine.settlement().transfers(),
		};
		serde_json::to_writer(&mut out, &summary)?;
		writeln!(out)?;

		log::info!(
			target: LOG_TARGET,
			"replayed {} steps, {} failed",
			steps,
			failed
		);

		Ok(summary)
	}
}
