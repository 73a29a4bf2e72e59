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

use lending_primitives::{Balance, LoanId, Moment, SECONDS_PER_DAY};
use lending_traits::{
	settlement::mock::MockSettlement, valuation::mock::MockValuation, ManualClock,
	SettlementError, TimeAsSecs, ValuationError,
};
use lending_types::{
	CollateralRef, LoanStatus, PaymentKind, PortfolioHealth, RiskAssessment, RiskTier,
	SettlementRef,
};

use super::{
	error::{IneligibilityReason, InvalidParameter, PositionParameter, SettlementOperation},
	EngineConfig, Error, LendingEngine,
};

const BORROWER: AccountId = 1;
const OTHER_BORROWER: AccountId = 2;
const INVESTOR_A: AccountId = 10;
const INVESTOR_B: AccountId = 11;
const INVESTOR_C: AccountId = 12;

const NOW: Moment = 1_700_000_000;
const DAY: u64 = SECONDS_PER_DAY;
const YEAR: u64 = 365 * DAY;

const PRINCIPAL: Balance = 1000;
const COLLATERAL_VALUE: Balance = 10_000;
const DURATION_DAYS: u32 = 30;
const NFT_CONTRACT: [u8; 20] = [0x42; 20];

pub mod mock;
use mock::*;

mod create_loan;
mod portfolio;
mod util;
