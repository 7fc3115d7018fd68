//! crates/lexinary_core/src/quota.rs
//!
//! The free-tier gate. Only summaries are metered; contract analysis and case
//! research are unlimited for every session.

use crate::domain::Feature;
use crate::session::Session;

/// Summaries a session may generate before it has to subscribe.
pub const FREE_SUMMARY_LIMIT: u32 = 3;

pub fn can_run(session: &Session, feature: Feature) -> bool {
    match feature {
        Feature::Summary => session.subscribed || session.free_summary_count < FREE_SUMMARY_LIMIT,
        Feature::ContractAnalysis | Feature::CaseResearch => true,
    }
}
