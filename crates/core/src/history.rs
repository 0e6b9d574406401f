// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-user record of delivered question ids.
///
/// This is the only shared-mutable component of the engine. All mutation
/// happens under a single lock acquisition, so concurrent `record_seen`
/// calls for the same user commute without lost updates. Records are owned
/// by the requesting identity; there is no cross-user visibility.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Mutex<HashMap<String, HashSet<i64>>>,
}

impl HistoryStore {
    /// Creates an empty history store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Acquires the record map, recovering from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, HashSet<i64>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the set of question ids already delivered to a user.
    ///
    /// Unknown users get an empty set, not an error.
    #[must_use]
    pub fn seen(&self, user_id: &str) -> HashSet<i64> {
        self.lock().get(user_id).cloned().unwrap_or_default()
    }

    /// Records question ids as delivered to a user.
    ///
    /// This is an idempotent union merge: recording an id the user has
    /// already seen is a no-op.
    pub fn record_seen<I>(&self, user_id: &str, question_ids: I)
    where
        I: IntoIterator<Item = i64>,
    {
        let mut records = self.lock();
        records
            .entry(user_id.to_string())
            .or_default()
            .extend(question_ids);
    }

    /// Clears all recorded ids for a user.
    ///
    /// The decision to reset (e.g. on an exhausted rotation) belongs to
    /// the sampler, not to this store.
    pub fn reset(&self, user_id: &str) {
        self.lock().remove(user_id);
    }
}
