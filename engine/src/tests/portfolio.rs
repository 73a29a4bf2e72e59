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

use super::*;

#[test]
fn stats_of_a_borrower() {
	let price = util::CollateralPrice::new(COLLATERAL_VALUE as u64);
	let (engine, _) = util::new_engine(util::settlement_ok(), price.valuation());

	let repaid = util::create_loan_with(&engine, BORROWER, 1, 500);
	util::create_loan_with(&engine, BORROWER, 2, 1000);
	util::create_loan_with(&engine, BORROWER, 3, 2000);
	util::create_loan_with(&engine, OTHER_BORROWER, 4, 9999);
	engine.repay_full(repaid).unwrap();

	let stats = engine.get_portfolio_stats(&BORROWER).unwrap();
	assert_eq!(stats.total_loaned, 3500);
	assert_eq!(stats.total_debt, 3000);
	assert_eq!(stats.average_apr_bps, 800);
	assert_eq!(stats.loan_count, 3);
	assert_eq!(stats.active_loan_count, 2);
	assert_eq!(stats.liquidation_risk_count, 0);
	assert_eq!(stats.portfolio_health, PortfolioHealth::Excellent);

	// 2000 of debt against 2000 of collateral, 1000 against 2000 stays healthy
	price.set(2_000);
	let stats = engine.get_portfolio_stats(&BORROWER).unwrap();
	assert_eq!(stats.liquidation_risk_count, 1);
	// 1 out of 3 loans, the repaid one included
	assert_eq!(stats.portfolio_health, PortfolioHealth::Poor);
}

#[test]
fn stats_without_loans() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));

	let stats = engine.get_portfolio_stats(&BORROWER).unwrap();
	assert_eq!(stats.loan_count, 0);
	assert_eq!(stats.portfolio_health, PortfolioHealth::Excellent);
}

#[test]
fn analytics_of_an_active_loan() {
	let (engine, clock) =
		util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));
	let loan_id = util::create_loan(&engine, 1);

	clock.advance_days(10);
	let analytics = engine.get_loan_analytics(loan_id).unwrap();

	assert_eq!(analytics.loan.id(), loan_id);
	assert_eq!(analytics.current_debt, analytics.loan.current_debt(clock.now()).unwrap());
	assert!(analytics.current_debt > PRINCIPAL);
	assert_eq!(analytics.ltv_bps, 1002);
	assert!(!analytics.liquidation_eligible);

	// 20 days left, a single installment at maturity
	assert_eq!(analytics.schedule.len(), 1);
	assert_eq!(analytics.schedule[0].due_at, NOW + 30 * DAY);
	assert_eq!(analytics.schedule[0].principal, PRINCIPAL);
}

#[test]
fn analytics_of_a_repaid_loan() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));
	let loan_id = util::create_loan(&engine, 1);
	engine.repay_full(loan_id).unwrap();

	let analytics = engine.get_loan_analytics(loan_id).unwrap();
	assert_eq!(analytics.current_debt, 0);
	assert!(analytics.schedule.is_empty());
	assert!(!analytics.liquidation_eligible);
}

#[test]
fn history_of_every_loan() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));
	let first = util::create_loan(&engine, 1);
	let second = util::create_loan(&engine, 2);

	engine.apply_payment(first, 10).unwrap();
	engine.apply_payment(second, 20).unwrap();
	engine.repay_full(first).unwrap();

	let history = engine.get_payment_history(None);
	assert_eq!(
		history.iter().map(|p| (p.loan_id, p.amount)).collect::<Vec<_>>(),
		vec![(first, 10), (second, 20), (first, 990)]
	);
	assert_eq!(engine.get_payment_history(Some(second)).len(), 1);
}

#[test]
fn history_is_bounded() {
	let config = EngineConfig {
		journal_capacity: 3,
		..Default::default()
	};
	let (engine, _) =
		util::new_engine_with(config, util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));
	let loan_id = util::create_loan(&engine, 1);

	for amount in 1..=5 {
		engine.apply_payment(loan_id, amount).unwrap();
	}

	assert_eq!(
		engine
			.get_payment_history(Some(loan_id))
			.iter()
			.map(|p| p.amount)
			.collect::<Vec<_>>(),
		vec![3, 4, 5]
	);
}
