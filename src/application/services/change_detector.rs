use chrono::Utc;

use crate::domain::entities::fingerprint::{CacheRecord, FingerprintKey};
use crate::domain::ports::store::{FingerprintStore, StoreError};

/// Outcome of one change-detection query.
#[derive(Debug)]
pub struct Decision {
    pub alert: bool,
    /// Set when the detector decided to alert but could not record it
    pub persist_error: Option<StoreError>,
}

/// Cooldown-aware deduplication of recurring findings.
///
/// A finding alerts when it is new, when its item set changed, or when the
/// same set has been quiet for at least the cooldown. A record dated after
/// `now` counts as expired. Alerting rewrites the cache record; suppression
/// leaves it untouched.
pub struct ChangeDetector<'a> {
    store: &'a dyn FingerprintStore,
}

impl<'a> ChangeDetector<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn FingerprintStore) -> Self {
        Self { store }
    }

    /// Decides against the current wall clock.
    ///
    /// A failed cache write is logged; the alert decision stands.
    pub fn should_alert<S: AsRef<str>>(
        &self,
        key: &FingerprintKey,
        items: &[S],
        cooldown_minutes: i64,
    ) -> bool {
        let decision = self.evaluate_at(key, items, cooldown_minutes, Utc::now().timestamp());
        if let Some(e) = &decision.persist_error {
            tracing::warn!(key = %key, "Failed to record alert fingerprint: {e}");
        }
        decision.alert
    }

    /// Decides with an explicit clock (seconds since the Unix epoch).
    pub fn evaluate_at<S: AsRef<str>>(
        &self,
        key: &FingerprintKey,
        items: &[S],
        cooldown_minutes: i64,
        now: i64,
    ) -> Decision {
        let alert = match self.store.load(key) {
            None => {
                tracing::debug!(key = %key, "No cached fingerprint, first observation");
                true
            }
            Some(record) if !record.same_items(items) => {
                tracing::debug!(key = %key, "Item set changed since last alert");
                true
            }
            Some(_) if cooldown_minutes <= 0 => true,
            Some(record) => {
                let elapsed = record.age_secs(now);
                if elapsed < 0 {
                    tracing::warn!(
                        key = %key,
                        elapsed,
                        "Cached fingerprint is dated in the future, treating as expired"
                    );
                    true
                } else {
                    let due = elapsed >= cooldown_minutes.saturating_mul(60);
                    tracing::debug!(key = %key, elapsed, due, "Unchanged item set");
                    due
                }
            }
        };

        if !alert {
            return Decision {
                alert,
                persist_error: None,
            };
        }

        let persist_error = self.store.store(key, &CacheRecord::new(items, now)).err();
        Decision {
            alert,
            persist_error,
        }
    }
}
