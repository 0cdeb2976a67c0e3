//! Identifier-keyed store of outstanding OTP challenges
//!
//! At most one record exists per identifier. The store never reads a clock:
//! callers pass `now`, which keeps expiry decisions deterministic and testable.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::VerifyOutcome;

/// Authoritative holder of outstanding codes
///
/// Implementations must make `put` and `take_if_valid` for the same identifier
/// mutually exclusive, must not block operations on other identifiers for
/// longer than a map lookup, and must never perform I/O.
pub trait OtpStore: Send + Sync {
    /// Record `code` for `identifier`, replacing any outstanding code
    fn put(&self, identifier: &str, code: &str, validity_seconds: u64, now: DateTime<Utc>);

    /// Check `candidate` and consume the record when it is verified or expired
    ///
    /// A mismatch counts against `max_attempts`; the record is dropped on the
    /// attempt that reaches it. `None` or `Some(0)` leaves attempts uncapped.
    /// This is the only path by which a verified or expired record leaves the store.
    fn take_if_valid(
        &self,
        identifier: &str,
        candidate: &str,
        max_attempts: Option<u32>,
        now: DateTime<Utc>,
    ) -> VerifyOutcome;

    /// Remove the record only if it still holds `code`
    ///
    /// Returns `true` when a record was removed. A record replaced by a newer
    /// issuance is left alone.
    fn discard_if_code(&self, identifier: &str, code: &str) -> bool;

    /// Drop every record whose window has closed at `now`; returns how many
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of outstanding records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store backed by a sharded concurrent map
///
/// Each operation locks only the shard holding the identifier, and only for
/// the duration of the map access.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: DashMap<String, OtpRecord>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the outstanding record for diagnostics and tests
    pub fn peek(&self, identifier: &str) -> Option<OtpRecord> {
        self.records.get(identifier).map(|r| r.value().clone())
    }
}

impl OtpStore for InMemoryOtpStore {
    fn put(&self, identifier: &str, code: &str, validity_seconds: u64, now: DateTime<Utc>) {
        let record = OtpRecord::new(identifier, code, now, validity_seconds);
        self.records.insert(identifier.to_string(), record);
    }

    fn take_if_valid(
        &self,
        identifier: &str,
        candidate: &str,
        max_attempts: Option<u32>,
        now: DateTime<Utc>,
    ) -> VerifyOutcome {
        let mut entry = match self.records.entry(identifier.to_string()) {
            Entry::Vacant(_) => return VerifyOutcome::NoSuchChallenge,
            Entry::Occupied(entry) => entry,
        };

        if entry.get().is_expired_at(now) {
            entry.remove();
            return VerifyOutcome::Expired;
        }

        if entry.get().matches(candidate) {
            entry.remove();
            return VerifyOutcome::Verified;
        }

        let record = entry.get_mut();
        record.failed_attempts = record.failed_attempts.saturating_add(1);
        let failed = record.failed_attempts;

        match max_attempts.filter(|max| *max > 0) {
            None => VerifyOutcome::Mismatch {
                remaining_attempts: None,
            },
            Some(max) => {
                let remaining = max.saturating_sub(failed);
                if remaining == 0 {
                    entry.remove();
                }
                VerifyOutcome::Mismatch {
                    remaining_attempts: Some(remaining),
                }
            }
        }
    }

    fn discard_if_code(&self, identifier: &str, code: &str) -> bool {
        self.records
            .remove_if(identifier, |_, record| record.matches(code))
            .is_some()
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.records.retain(|_, record| {
            let keep = !record.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
