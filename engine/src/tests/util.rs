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

use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

use super::*;

/// Price of every collateral, adjustable after the engine took ownership
/// of the valuation mock.
#[derive(Clone)]
pub struct CollateralPrice(Arc<AtomicU64>);

impl CollateralPrice {
	pub fn new(value: u64) -> Self {
		Self(Arc::new(AtomicU64::new(value)))
	}

	pub fn set(&self, value: u64) {
		self.0.store(value, Ordering::SeqCst);
	}

	pub fn valuation(&self) -> MockValuation {
		let price = self.0.clone();
		let mut valuation = MockValuation::new();
		valuation
			.expect_value_of()
			.returning(move |_| Ok(price.load(Ordering::SeqCst).into()));
		valuation
	}
}

pub fn collateral(token_id: u128) -> CollateralRef {
	CollateralRef::new(NFT_CONTRACT, token_id)
}

pub fn moderate() -> RiskAssessment {
	RiskAssessment {
		risk_tier: RiskTier::Moderate,
		recommended_rate_bps: 800,
	}
}

pub fn settlement_ok() -> MockSettlement<AccountId> {
	let mut settlement = MockSettlement::new();
	settlement
		.expect_disburse()
		.returning(|_, collateral, _| Ok(SettlementRef::new(format!("disburse-{collateral}"))));
	settlement
		.expect_collect()
		.returning(|_, amount| Ok(SettlementRef::new(format!("collect-{amount}"))));
	settlement
		.expect_release_collateral()
		.returning(|collateral| Ok(SettlementRef::new(format!("release-{collateral}"))));
	settlement
}

pub fn valued_at(value: Balance) -> MockValuation {
	let mut valuation = MockValuation::new();
	valuation.expect_value_of().returning(move |_| Ok(value));
	valuation
}

pub fn new_engine_with(
	config: EngineConfig,
	settlement: MockSettlement<AccountId>,
	valuation: MockValuation,
) -> (LendingEngine<Runtime>, ManualClock) {
	let clock = ManualClock::new(NOW);
	let engine = LendingEngine::new(config, settlement, valuation, clock.clone())
		.expect("valid configuration");

	(engine, clock)
}

pub fn new_engine(
	settlement: MockSettlement<AccountId>,
	valuation: MockValuation,
) -> (LendingEngine<Runtime>, ManualClock) {
	new_engine_with(EngineConfig::default(), settlement, valuation)
}

pub fn create_loan_with(
	engine: &LendingEngine<Runtime>,
	borrower: AccountId,
	token_id: u128,
	principal: Balance,
) -> LoanId {
	engine
		.create_loan(
			borrower,
			collateral(token_id),
			principal,
			DURATION_DAYS,
			moderate(),
		)
		.expect("successful creation")
		.id()
}

pub fn create_loan(engine: &LendingEngine<Runtime>, token_id: u128) -> LoanId {
	create_loan_with(engine, BORROWER, token_id, PRINCIPAL)
}
