//! Timestamp rules shared by every storage backend.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Current time truncated to microseconds, the finest precision PostgreSQL keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp to record as `updated_at` when a row published at `published_at` changes.
///
/// Always strictly later than `published_at`, even when the update lands within
/// the same microsecond as the insert.
pub fn touched_at(published_at: DateTime<Utc>) -> DateTime<Utc> {
    now().max(published_at + TimeDelta::microseconds(1))
}
