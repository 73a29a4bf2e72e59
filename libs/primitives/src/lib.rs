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

#![cfg_attr(not(feature = "std"), no_std)]

pub use constants::*;
pub use types::*;

pub mod types {
	use sp_arithmetic::FixedU128;

	/// Balance of an account or a loan, in minor units of the lending
	/// currency.
	pub type Balance = u128;

	/// UNIX timestamp in seconds.
	pub type Moment = u64;

	/// Identifier of a loan, assigned sequentially by the registry.
	pub type LoanId = u64;

	/// Basis points. 10_000 bps is 100%.
	pub type Bps = u32;

	/// Fixed point type used for intermediate ratios.
	pub type Rate = FixedU128;

	/// Number of months used in amortization schedules.
	pub type Months = u32;
}

pub mod constants {
	use super::types::{Bps, Months};

	// Seconds units
	pub const SECONDS_PER_MINUTE: u64 = 60;
	pub const SECONDS_PER_HOUR: u64 = SECONDS_PER_MINUTE * 60;
	pub const SECONDS_PER_DAY: u64 = SECONDS_PER_HOUR * 24;
	pub const SECONDS_PER_MONTH: u64 = SECONDS_PER_DAY * 30;
	pub const SECONDS_PER_YEAR: u64 = SECONDS_PER_DAY * 365;

	pub const MONTHS_PER_YEAR: Months = 12;

	/// 100% expressed in basis points.
	pub const MAX_BPS: Bps = 10_000;

	/// Default loan-to-value at which an active loan becomes liquidatable.
	pub const DEFAULT_LIQUIDATION_THRESHOLD_BPS: Bps = 8_000;

	/// Default amount of payments retained by the payment journal.
	pub const DEFAULT_JOURNAL_CAPACITY: u32 = 1_000;

	/// Default upper bound for a loan duration (ten years).
	pub const DEFAULT_MAX_DURATION_DAYS: u32 = 3_650;

	/// Longest amortization schedule, in months.
	pub const MAX_LOAN_MONTHS: Months = 1_200;

	/// Longest loan duration any configuration may accept.
	pub const MAX_LOAN_DURATION_DAYS: u32 = MAX_LOAN_MONTHS * 30;
}
