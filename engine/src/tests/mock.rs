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

use lending_traits::{
	settlement::mock::MockSettlement, valuation::mock::MockValuation, ManualClock,
};

use crate::Config;

pub type AccountId = u64;

pub struct Runtime;

impl Config for Runtime {
	type AccountId = AccountId;
	type Settlement = MockSettlement<AccountId>;
	type Time = ManualClock;
	type Valuation = MockValuation;
}
