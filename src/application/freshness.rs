// Freshness policy - whether an existing image still counts as current
use chrono::{DateTime, Utc};

/// Strategy deciding whether an image file written at `modified` is still
/// current at `now`. Availability checks consult this after confirming the
/// file exists.
pub trait FreshnessPolicy: Send + Sync {
    fn is_fresh(&self, modified: DateTime<Utc>, now: DateTime<Utc>) -> bool;
}

/// Default policy: any existing image counts, regardless of age.
///
/// This matches the shipped behavior of the availability check, where the
/// modification-time test is computed but never applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFresh;

impl FreshnessPolicy for AlwaysFresh {
    fn is_fresh(&self, _modified: DateTime<Utc>, _now: DateTime<Utc>) -> bool {
        true
    }
}

/// Strict policy: an image older than `max_age_secs` no longer counts.
#[derive(Debug, Clone, Copy)]
pub struct MaxAge {
    max_age_secs: u64,
}

impl MaxAge {
    pub fn new(max_age_secs: u64) -> Self {
        Self { max_age_secs }
    }
}

impl FreshnessPolicy for MaxAge {
    fn is_fresh(&self, modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(modified).num_seconds() <= self.max_age_secs as i64
    }
}
