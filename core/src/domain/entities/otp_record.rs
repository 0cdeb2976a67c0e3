//! Outstanding one-time password bound to an identifier.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::Serialize;

/// Default number of digits in a code
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Default validity window (5 minutes)
pub const DEFAULT_VALIDITY_SECONDS: u64 = 300;

// Keeps `Duration::seconds` in range
const MAX_VALIDITY_SECONDS: i64 = 100 * 365 * 24 * 3600;

/// The unit of OTP state: one outstanding code for one identifier
///
/// Records are never partially updated by callers. A new issuance for the same
/// identifier replaces the whole record; the only in-place mutation is the
/// failed-attempt counter maintained by the store.
///
/// `code` is skipped on serialization so a record can be dumped for
/// diagnostics without leaking the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRecord {
    /// Email address or phone number the code was issued to (opaque, not validated)
    pub identifier: String,

    /// Fixed-length numeric code
    #[serde(skip_serializing)]
    pub code: String,

    /// Instant the code was issued
    pub issued_at: DateTime<Utc>,

    /// `issued_at + validity window`
    pub expires_at: DateTime<Utc>,

    /// Verification attempts that presented the wrong code
    pub failed_attempts: u32,
}

impl OtpRecord {
    /// Creates a record valid for `validity_seconds` after `issued_at`
    pub fn new(
        identifier: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        validity_seconds: u64,
    ) -> Self {
        let secs = i64::try_from(validity_seconds)
            .unwrap_or(i64::MAX)
            .min(MAX_VALIDITY_SECONDS);
        let expires_at = issued_at
            .checked_add_signed(Duration::seconds(secs))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            identifier: identifier.into(),
            code: code.into(),
            issued_at,
            expires_at,
            failed_attempts: 0,
        }
    }

    /// Whether the validity window has closed at `now`
    ///
    /// The boundary instant itself is still valid: expiry requires `now > expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Exact comparison against a candidate code
    ///
    /// No trimming, case folding or numeric coercion. Runs in constant time for
    /// equal-length inputs.
    pub fn matches(&self, candidate: &str) -> bool {
        if self.code.len() != candidate.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Time left in the validity window, zero once expired
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
