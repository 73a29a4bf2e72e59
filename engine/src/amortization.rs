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

//! Pure loan arithmetic.
//!
//! Money is handled in minor units and rates in basis points. Intermediate
//! ratios use [`Rate`]. Every result rounds down to the minor unit.

use lending_primitives::{
	Balance, Bps, Moment, Months, Rate, MAX_BPS, MAX_LOAN_MONTHS, MONTHS_PER_YEAR,
	SECONDS_PER_MONTH, SECONDS_PER_YEAR,
};
use lending_types::Installment;
use sp_arithmetic::{
	helpers_128bit::multiply_by_rational_with_rounding,
	traits::{
		checked_pow, EnsureAdd, EnsureDiv, EnsureFixedPointNumber, EnsureMul, EnsureSub, One,
	},
	ArithmeticError, FixedPointNumber, Rounding,
};

fn mul_div_floor(value: Balance, numerator: u128, denominator: u128) -> Result<Balance, ArithmeticError> {
	if denominator == 0 {
		return Err(ArithmeticError::DivisionByZero);
	}

	multiply_by_rational_with_rounding(value, numerator, denominator, Rounding::Down)
		.ok_or(ArithmeticError::Overflow)
}

fn monthly_rate(annual_rate_bps: Bps) -> Result<Rate, ArithmeticError> {
	Rate::checked_from_rational(annual_rate_bps, MAX_BPS.ensure_mul(MONTHS_PER_YEAR)?)
		.ok_or(ArithmeticError::Overflow)
}

/// Level installment that amortizes `principal` over `remaining_months`:
/// `P·r·(1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate.
///
/// Returns `principal` when there are no months left or the loan bears no
/// interest.
pub fn monthly_payment(
	principal: Balance,
	annual_rate_bps: Bps,
	remaining_months: Months,
) -> Result<Balance, ArithmeticError> {
	if remaining_months == 0 || annual_rate_bps == 0 {
		return Ok(principal);
	}

	let rate = monthly_rate(annual_rate_bps)?;
	let growth = checked_pow(Rate::one().ensure_add(rate)?, remaining_months as usize)
		.ok_or(ArithmeticError::Overflow)?;

	let factor = rate.ensure_mul(growth)?.ensure_div(growth.ensure_sub(Rate::one())?)?;

	factor.ensure_mul_int(principal)
}

/// Ratio between `debt` and `collateral_value`, in basis points.
///
/// A zero valued collateral yields 0. Ratios that do not fit in [`Bps`]
/// saturate.
pub fn loan_to_value(debt: Balance, collateral_value: Balance) -> Bps {
	if collateral_value == 0 {
		return 0;
	}

	multiply_by_rational_with_rounding(debt, MAX_BPS.into(), collateral_value, Rounding::Down)
		.and_then(|ltv| Bps::try_from(ltv).ok())
		.unwrap_or(Bps::MAX)
}

/// Simple interest over `months_remaining` months:
/// `principal · rate · months / 12`.
pub fn expected_interest(
	principal: Balance,
	annual_rate_bps: Bps,
	months_remaining: Months,
) -> Result<Balance, ArithmeticError> {
	mul_div_floor(
		principal,
		u128::from(annual_rate_bps).ensure_mul(u128::from(months_remaining))?,
		u128::from(MAX_BPS).ensure_mul(u128::from(MONTHS_PER_YEAR))?,
	)
}

/// Simple interest accrued by `principal` during `elapsed_secs`, on a 365
/// days year.
pub fn accrued_interest(
	principal: Balance,
	annual_rate_bps: Bps,
	elapsed_secs: u64,
) -> Result<Balance, ArithmeticError> {
	mul_div_floor(
		principal,
		u128::from(annual_rate_bps).ensure_mul(u128::from(elapsed_secs))?,
		u128::from(MAX_BPS).ensure_mul(u128::from(SECONDS_PER_YEAR))?,
	)
}

/// Months, rounded up, between `now` and `maturity_at`.
pub fn remaining_months(now: Moment, maturity_at: Moment) -> Months {
	let secs = maturity_at.saturating_sub(now);
	Months::try_from(secs.div_ceil(SECONDS_PER_MONTH)).unwrap_or(Months::MAX)
}

/// Remaining installments of a loan.
///
/// The principal is amortized with level payments over the months left
/// until maturity, the last one absorbing rounding. `pending_interest`, the
/// interest accrued but not paid yet, is due with the first installment. A
/// loan past its maturity has a single installment due at `now`. Schedules
/// longer than [`MAX_LOAN_MONTHS`] are rejected as an overflow.
pub fn payment_schedule(
	principal_remaining: Balance,
	annual_rate_bps: Bps,
	pending_interest: Balance,
	now: Moment,
	maturity_at: Moment,
) -> Result<Vec<Installment>, ArithmeticError> {
	if principal_remaining == 0 && pending_interest == 0 {
		return Ok(Vec::new());
	}

	let months = remaining_months(now, maturity_at);
	if months > MAX_LOAN_MONTHS {
		return Err(ArithmeticError::Overflow);
	}

	if months == 0 {
		return Ok(vec![Installment {
			due_at: now,
			payment: principal_remaining.ensure_add(pending_interest)?,
			interest: pending_interest,
			principal: principal_remaining,
			remaining_principal: 0,
		}]);
	}

	let level = match annual_rate_bps {
		0 => principal_remaining.ensure_div(Balance::from(months))?,
		rate => monthly_payment(principal_remaining, rate, months)?,
	};

	let monthly_divisor = u128::from(MAX_BPS).ensure_mul(u128::from(MONTHS_PER_YEAR))?;
	let mut remaining = principal_remaining;
	let mut schedule = Vec::new();

	for month in 1..=months {
		let due_at = now
			.ensure_add(SECONDS_PER_MONTH.ensure_mul(u64::from(month))?)?
			.min(maturity_at);

		let monthly_interest = mul_div_floor(remaining, annual_rate_bps.into(), monthly_divisor)?;
		let principal = match month == months {
			true => remaining,
			false => level.saturating_sub(monthly_interest).min(remaining),
		};

		let interest = match month {
			1 => monthly_interest.ensure_add(pending_interest)?,
			_ => monthly_interest,
		};

		remaining = remaining.ensure_sub(principal)?;
		schedule.push(Installment {
			due_at,
			payment: principal.ensure_add(interest)?,
			interest,
			principal,
			remaining_principal: remaining,
		});

		if remaining == 0 {
			break;
		}
	}

	Ok(schedule)
}
