//! crates/lexinary_core/src/session.rs
//!
//! Per-browser-session state: free-tier counter, usage analytics and the
//! subscription flag. A `Session` lives in memory for as long as the visitor's
//! session does and is never persisted.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::domain::{ClauseFinding, Subscription};
use crate::quota::FREE_SUMMARY_LIMIT;

/// Usage counters shown in the analytics sidebar. None of them ever decrease.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analytics {
    pub summaries: u64,
    pub contracts: u64,
    pub research: u64,
    /// Whole seconds since the session started.
    pub time_spent: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    /// Eight hex chars shown to the visitor and used in download file names.
    pub user_id: String,
    pub free_summary_count: u32,
    pub analytics: Analytics,
    pub subscribed: bool,
    pub subscription: Option<Subscription>,
    pub start_time: DateTime<Utc>,
    pub last_summary: Option<String>,
    pub last_analysis: Option<Vec<ClauseFinding>>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            user_id: derive_user_id(now),
            free_summary_count: 0,
            analytics: Analytics::default(),
            subscribed: false,
            subscription: None,
            start_time: now,
            last_summary: None,
            last_analysis: None,
        }
    }

    /// Free summaries still available. The gate itself is [`crate::quota::can_run`].
    pub fn free_summaries_remaining(&self) -> u32 {
        FREE_SUMMARY_LIMIT.saturating_sub(self.free_summary_count)
    }

    /// Books a successful summary generation.
    pub fn record_summary(&mut self, summary: String) {
        self.free_summary_count += 1;
        self.analytics.summaries += 1;
        self.last_summary = Some(summary);
    }

    pub fn record_contract_analysis(&mut self, findings: Vec<ClauseFinding>) {
        self.analytics.contracts += 1;
        self.last_analysis = Some(findings);
    }

    pub fn record_research(&mut self) {
        self.analytics.research += 1;
    }

    /// Switches the session to the paid tier. There is no way back.
    pub fn activate_subscription(&mut self, subscription: Subscription) {
        if self.subscribed {
            return;
        }
        self.subscribed = true;
        self.subscription = Some(subscription);
    }

    /// Recomputes `time_spent`; a clock that steps backwards never lowers it.
    pub fn refresh_time_spent(&mut self, now: DateTime<Utc>) {
        let elapsed = (now - self.start_time).num_seconds().max(0) as u64;
        self.analytics.time_spent = self.analytics.time_spent.max(elapsed);
    }
}

/// Derives the display id from a one-way hash of the wall-clock time.
///
/// Collisions are possible in principle and are not guarded against; sessions are
/// keyed by an opaque token, not by this id.
pub fn derive_user_id(now: DateTime<Utc>) -> String {
    let stamp = now
        .timestamp_nanos_opt()
        .map(|n| n.to_string())
        .unwrap_or_else(|| now.to_rfc3339());
    let digest = Sha256::digest(stamp.as_bytes());
    hex::encode(digest)[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Clause, RiskLevel};
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_754_900_000 + secs, 0).unwrap()
    }

    #[test]
    fn new_session_starts_zeroed() {
        let session = Session::new(at(0));
        assert_eq!(session.free_summary_count, 0);
        assert_eq!(session.analytics, Analytics::default());
        assert!(!session.subscribed);
        assert!(session.subscription.is_none());
        assert_eq!(session.start_time, at(0));
        assert_eq!(session.free_summaries_remaining(), 3);
    }

    #[test]
    fn user_id_is_eight_lowercase_hex_chars() {
        let id = derive_user_id(at(0));
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id, derive_user_id(at(0)));
        assert_ne!(id, derive_user_id(at(1)));
    }

    #[test]
    fn recording_a_summary_bumps_both_counters() {
        let mut session = Session::new(at(0));
        session.record_summary("short".to_string());
        session.record_summary("second".to_string());
        assert_eq!(session.free_summary_count, 2);
        assert_eq!(session.analytics.summaries, 2);
        assert_eq!(session.last_summary.as_deref(), Some("second"));
        assert_eq!(session.free_summaries_remaining(), 1);
    }

    #[test]
    fn remaining_never_underflows() {
        let mut session = Session::new(at(0));
        for _ in 0..5 {
            session.record_summary(String::new());
        }
        assert_eq!(session.free_summaries_remaining(), 0);
    }

    #[test]
    fn contract_and_research_counters() {
        let mut session = Session::new(at(0));
        let finding = ClauseFinding {
            clause: Clause::Payment,
            risk: RiskLevel::Low,
            score: 0.5,
            suggestion: "Standard clause".to_string(),
        };
        session.record_contract_analysis(vec![finding.clone()]);
        session.record_research();
        session.record_research();
        assert_eq!(session.analytics.contracts, 1);
        assert_eq!(session.analytics.research, 2);
        assert_eq!(session.last_analysis, Some(vec![finding]));
    }

    #[test]
    fn subscription_is_one_way() {
        let mut session = Session::new(at(0));
        let first = Subscription {
            status: "active".to_string(),
            plan: "unlimited".to_string(),
            cost: "$99/month".to_string(),
        };
        session.activate_subscription(first.clone());
        session.activate_subscription(Subscription {
            plan: "other".to_string(),
            ..first.clone()
        });
        assert!(session.subscribed);
        assert_eq!(session.subscription, Some(first));
    }

    #[test]
    fn time_spent_is_monotonic() {
        let mut session = Session::new(at(0));
        session.refresh_time_spent(at(42));
        assert_eq!(session.analytics.time_spent, 42);
        session.refresh_time_spent(at(0) + Duration::seconds(10));
        assert_eq!(session.analytics.time_spent, 42);
        session.refresh_time_spent(at(-5));
        assert_eq!(session.analytics.time_spent, 42);
    }
}
