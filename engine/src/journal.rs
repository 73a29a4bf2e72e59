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
	collections::VecDeque,
	sync::{Mutex, MutexGuard},
};

use lending_primitives::LoanId;
use lending_types::Payment;

use crate::sync;

const LOG_TARGET: &str = "lending::journal";

/// Append only log of applied payments, bounded to `capacity` entries.
pub struct PaymentJournal {
	capacity: usize,
	entries: Mutex<VecDeque<Payment>>,
}

impl PaymentJournal {
	pub fn new(capacity: u32) -> Self {
		let capacity = capacity.max(1) as usize;
		Self {
			capacity,
			entries: Mutex::new(VecDeque::new()),
		}
	}

	fn entries(&self) -> MutexGuard<'_, VecDeque<Payment>> {
		sync::lock(&self.entries)
	}

	/// Records a payment. When the journal is full the oldest entry is
	/// evicted under the same lock.
	pub fn append(&self, payment: Payment) {
		let mut entries = self.entries();

		while entries.len() >= self.capacity {
			if let Some(evicted) = entries.pop_front() {
				log::trace!(
					target: LOG_TARGET,
					"evicting payment of loan {} applied at {}",
					evicted.loan_id,
					evicted.applied_at
				);
			}
		}

		entries.push_back(payment);
	}

	/// Retained payments, oldest first, optionally restricted to one loan.
	pub fn history(&self, loan_id: Option<LoanId>) -> Vec<Payment> {
		self.entries()
			.iter()
			.filter(|payment| loan_id.map_or(true, |id| payment.loan_id == id))
			.cloned()
			.collect()
	}

	pub fn len(&self) -> usize {
		self.entries().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries().is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}
}
