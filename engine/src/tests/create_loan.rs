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
fn with_moderate_risk() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));

	let assessment = engine.assess_risk(&RiskTier::Moderate).unwrap();
	assert_eq!(assessment.recommended_rate_bps, 800);

	let loan = engine
		.create_loan(
			BORROWER,
			util::collateral(1),
			PRINCIPAL,
			DURATION_DAYS,
			assessment,
		)
		.unwrap();

	assert_eq!(loan.id(), 1);
	assert_eq!(loan.status(), LoanStatus::Active);
	assert_eq!(loan.principal(), PRINCIPAL);
	assert_eq!(loan.principal_remaining(), PRINCIPAL);
	assert_eq!(loan.interest_rate_bps(), 800);
	assert_eq!(loan.created_at(), NOW);
	assert_eq!(loan.maturity_at(), NOW + 30 * DAY);
	assert_eq!(
		loan.disbursement_ref(),
		&SettlementRef::new(format!("disburse-{}", util::collateral(1)))
	);

	assert_eq!(engine.get_loan(1), Ok(loan.clone()));
	assert_eq!(engine.get_user_loans(&BORROWER), vec![loan]);
	assert_eq!(engine.get_risk_assessment(1), Ok(assessment));
}

#[test]
fn with_sequential_ids() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));

	assert_eq!(util::create_loan(&engine, 1), 1);
	assert_eq!(util::create_loan(&engine, 2), 2);
	assert_eq!(util::create_loan_with(&engine, OTHER_BORROWER, 3, PRINCIPAL), 3);

	assert_eq!(engine.get_user_loans(&BORROWER).len(), 2);
	assert_eq!(engine.get_user_loans(&OTHER_BORROWER).len(), 1);
}

#[test]
fn with_unknown_risk_tier() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));

	assert_eq!(
		engine.assess_risk(&7u8),
		Err(Error::InvalidLoanParameters {
			loan_id: None,
			reason: InvalidParameter::UnknownRiskTier(7),
		})
	);
}

#[test]
fn with_wrong_parameters() {
	let mut settlement = MockSettlement::new();
	settlement.expect_disburse().never();

	let (engine, _) = util::new_engine(settlement, util::valued_at(COLLATERAL_VALUE));

	let create = |collateral, principal, duration_days| {
		engine
			.create_loan(BORROWER, collateral, principal, duration_days, util::moderate())
			.map(|loan| loan.id())
	};
	let invalid = |reason| -> Result<LoanId, Error> {
		Err(Error::InvalidLoanParameters {
			loan_id: None,
			reason,
		})
	};

	assert_eq!(
		create(util::collateral(1), 0, DURATION_DAYS),
		invalid(InvalidParameter::ZeroPrincipal)
	);
	assert_eq!(
		create(util::collateral(1), PRINCIPAL, 0),
		invalid(InvalidParameter::ZeroDuration)
	);
	assert_eq!(
		create(util::collateral(1), PRINCIPAL, 3651),
		invalid(InvalidParameter::DurationTooLong {
			days: 3651,
			max: 3650
		})
	);

	let malformed = CollateralRef::new([0; 20], 1);
	assert_eq!(
		create(malformed, PRINCIPAL, DURATION_DAYS),
		invalid(InvalidParameter::MalformedCollateral(malformed))
	);

	assert!(engine.get_user_loans(&BORROWER).is_empty());
}

#[test]
fn with_settlement_failure() {
	let mut settlement = MockSettlement::new();
	let mut calls = 0;
	settlement
		.expect_disburse()
		.times(2)
		.returning(move |_, _, _| {
			calls += 1;
			match calls {
				1 => Err(SettlementError::Timeout),
				_ => Ok(SettlementRef::new("disburse")),
			}
		});

	let (engine, _) = util::new_engine(settlement, util::valued_at(COLLATERAL_VALUE));

	let error = engine
		.create_loan(
			BORROWER,
			util::collateral(1),
			PRINCIPAL,
			DURATION_DAYS,
			util::moderate(),
		)
		.unwrap_err();

	assert_eq!(
		error,
		Error::SettlementFailure {
			operation: SettlementOperation::Disburse,
			loan_id: None,
			source: SettlementError::Timeout,
		}
	);
	assert!(error.is_retryable());
	assert_eq!(engine.get_loan(1), Err(Error::LoanNotFound(1)));
	assert!(engine.get_user_loans(&BORROWER).is_empty());

	// The collateral was not kept pledged by the failed attempt
	let loan_id = util::create_loan(&engine, 1);
	assert_eq!(engine.get_loan(loan_id).unwrap().status(), LoanStatus::Active);
}

#[test]
fn with_pledged_collateral() {
	let mut settlement = MockSettlement::new();
	settlement
		.expect_disburse()
		.times(1)
		.returning(|_, _, _| Ok(SettlementRef::new("disburse")));

	let (engine, _) = util::new_engine(settlement, util::valued_at(COLLATERAL_VALUE));

	let loan_id = util::create_loan(&engine, 1);

	assert_eq!(
		engine.create_loan(
			OTHER_BORROWER,
			util::collateral(1),
			PRINCIPAL,
			DURATION_DAYS,
			util::moderate()
		),
		Err(Error::CollateralAlreadyPledged {
			collateral: util::collateral(1),
			loan_id: Some(loan_id),
		})
	);
}

#[test]
fn with_collateral_of_a_repaid_loan() {
	let (engine, _) = util::new_engine(util::settlement_ok(), util::valued_at(COLLATERAL_VALUE));

	let loan_id = util::create_loan(&engine, 1);
	engine.repay_full(loan_id).unwrap();

	let loan_id = util::create_loan(&engine, 1);
	assert_eq!(loan_id, 2);
}
