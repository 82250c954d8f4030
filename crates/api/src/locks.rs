// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-booking serialization.
//!
//! Every mutating adapter holds the booking's lock across its whole
//! load/apply/execute sequence, so concurrent events against the same
//! booking are applied one at a time. Distinct bookings proceed in
//! parallel.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-booking mutexes, keyed by calendar event id.
#[derive(Debug, Default)]
pub struct BookingLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BookingLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one booking, creating it on first use.
    ///
    /// The guard owns its mutex, so it may be held across await points and
    /// is released on drop.
    pub async fn acquire(&self, calendar_event_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(
                locks
                    .entry(calendar_event_id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
