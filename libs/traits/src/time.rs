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
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
	time::{SystemTime, UNIX_EPOCH},
};

use lending_primitives::{Moment, SECONDS_PER_DAY};

/// Source of the current UNIX time, in seconds.
pub trait TimeAsSecs {
	fn now(&self) -> Moment;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeAsSecs for SystemClock {
	fn now(&self) -> Moment {
		match SystemTime::now().duration_since(UNIX_EPOCH) {
			Ok(elapsed) => elapsed.as_secs(),
			Err(_) => {
				log::warn!(target: "lending::time", "system clock is before the UNIX epoch");
				0
			}
		}
	}
}

/// Clock moved by hand. Clones share the same instant, so a handle can be
/// kept outside the engine that owns the other one.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
	pub fn new(now: Moment) -> Self {
		Self(Arc::new(AtomicU64::new(now)))
	}

	pub fn set(&self, now: Moment) {
		self.0.store(now, Ordering::SeqCst);
	}

	pub fn advance(&self, secs: u64) {
		self.0.fetch_add(secs, Ordering::SeqCst);
	}

	pub fn advance_days(&self, days: u64) {
		self.advance(days.saturating_mul(SECONDS_PER_DAY));
	}
}

impl TimeAsSecs for ManualClock {
	fn now(&self) -> Moment {
		self.0.load(Ordering::SeqCst)
	}
}
