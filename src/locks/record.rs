//! The serialized lock value and its parsed form.

use crate::principal::PrincipalId;
use chrono::{DateTime, Utc};

/// An exclusive claim on one entity.
///
/// Stored as `"<unix-timestamp>:<owner-id>"`. The timestamp is informational
/// only; it never expires the lock or breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRecord {
    /// Unix timestamp (seconds) of creation. `0` when unparsable.
    pub created_at: i64,

    /// The principal who created the lock. [`PrincipalId::NONE`] when the
    /// owner segment is missing or malformed.
    pub owner: PrincipalId,
}

impl LockRecord {
    pub fn new(owner: impl Into<PrincipalId>, created_at: i64) -> Self {
        Self {
            created_at,
            owner: owner.into(),
        }
    }

    /// Parse a stored lock value.
    ///
    /// Returns `None` for an absent or empty value (no lock). Any non-empty
    /// value yields a record: a missing `:` separator or an owner segment that
    /// is not a plain unsigned integer gives owner `0`, which matches no real
    /// principal.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let (time, owner) = match raw.split_once(':') {
            Some((time, owner)) => (time, Some(owner)),
            None => (raw, None),
        };

        let created_at = time.trim().parse::<i64>().unwrap_or(0);
        // Strict on purpose: "1:2:3" and "1:42abc" are malformed, not owners 2 and 42.
        let owner = owner
            .and_then(|o| o.trim().parse::<u64>().ok())
            .map(PrincipalId)
            .unwrap_or(PrincipalId::NONE);

        Some(Self { created_at, owner })
    }

    /// Parse an optional stored value; see [`LockRecord::parse`].
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    /// The stored form, `"<timestamp>:<owner>"`.
    pub fn serialize(&self) -> String {
        format!("{}:{}", self.created_at, self.owner)
    }

    /// Creation time as a UTC datetime, when the timestamp is representable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    /// Human-readable age relative to `now`.
    pub fn age_string_at(&self, now: DateTime<Utc>) -> String {
        let Some(created) = self.created_at_utc() else {
            return "unknown".to_string();
        };

        let age = now.signed_duration_since(created);
        let minutes = age.num_minutes().max(0);
        let hours = age.num_hours().max(0);
        let days = age.num_days().max(0);

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }

    /// Human-readable age relative to the current time.
    pub fn age_string(&self) -> String {
        self.age_string_at(Utc::now())
    }
}

impl std::fmt::Display for LockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialize())
    }
}
