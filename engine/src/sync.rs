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

//! Poison tolerant lock helpers. A panic while holding a lock never leaves
//! a loan half mutated, since every mutation is checked before it is
//! applied.

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	match mutex.lock() {
		Ok(guard) => guard,
		Err(poisoned) => poisoned.into_inner(),
	}
}

pub fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
	match lock.read() {
		Ok(guard) => guard,
		Err(poisoned) => poisoned.into_inner(),
	}
}

pub fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
	match lock.write() {
		Ok(guard) => guard,
		Err(poisoned) => poisoned.into_inner(),
	}
}
