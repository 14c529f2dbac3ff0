//! Work-profile spoofing.
//!
//! Keyed by the call kind alone: when active, both profile-ownership and
//! admin-mode queries report "not managed". Off by default.

use devcloak_core::flags::{FlagSnapshot, PolicyFlag};
use devcloak_core::types::{ProfileQuery, PropValue};

use crate::decision::{DecisionAction, PolicyDecision};

const LABEL: &str = "Work profile";

pub fn evaluate_work_profile(query: ProfileQuery, snapshot: &FlagSnapshot) -> PolicyDecision {
    if !snapshot.is_enabled(PolicyFlag::SpoofWorkProfile) {
        return PolicyDecision {
            action: DecisionAction::PassThrough,
            reason: "Work-profile spoofing disabled".to_string(),
            policy_label: Some(LABEL.to_string()),
        };
    }

    PolicyDecision {
        action: DecisionAction::ReplaceReturn(PropValue::Bool(false)),
        reason: format!("Reported as unmanaged for {query}"),
        policy_label: Some(LABEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let snapshot = FlagSnapshot::defaults();
        let decision = evaluate_work_profile(ProfileQuery::IsProfileOwner, &snapshot);
        assert_eq!(decision.action, DecisionAction::PassThrough);
    }

    #[test]
    fn test_spoof_reports_unmanaged_for_both_queries() {
        let snapshot = FlagSnapshot::defaults().with_flag(PolicyFlag::SpoofWorkProfile, true);
        for query in [ProfileQuery::IsProfileOwner, ProfileQuery::IsInAdminMode] {
            let decision = evaluate_work_profile(query, &snapshot);
            assert_eq!(
                decision.action,
                DecisionAction::ReplaceReturn(PropValue::Bool(false))
            );
        }
    }
}
