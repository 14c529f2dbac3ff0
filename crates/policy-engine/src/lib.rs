use devcloak_core::flags::FlagSnapshot;
use devcloak_core::types::{CallTarget, InterceptedCall};

mod decision;
pub mod overrides;
pub mod rules;

pub use decision::{DecisionAction, PolicyDecision};
pub use overrides::{coerce, OverrideTable};
pub use rules::settings::banned_settings_keys;

/// Decision engine for intercepted calls.
///
/// Holds only the immutable override table; every other input arrives per
/// call, so `decide` is a pure function of (call, snapshot) and a shared
/// `&PolicyEngine` is safe to use from concurrently intercepted calls. The
/// engine classifies only; it never invokes the original call and never
/// returns an error to its caller.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    overrides: OverrideTable,
}

impl PolicyEngine {
    pub fn new() -> Self {
        Self::with_overrides(OverrideTable::builtin())
    }

    pub fn with_overrides(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Produces the single verdict for one intercepted call.
    pub fn decide(&self, call: &InterceptedCall, snapshot: &FlagSnapshot) -> PolicyDecision {
        match &call.target {
            CallTarget::Settings { key } => {
                let banned = rules::settings::banned_settings_keys(snapshot);
                rules::settings::evaluate_settings(key, &banned)
            }
            CallTarget::SystemProperty { key, return_type } => {
                rules::properties::evaluate_property(key, *return_type, snapshot, &self.overrides)
            }
            CallTarget::ProcessStart { command } => rules::process::evaluate_process_start(
                command,
                call.timestamp,
                snapshot,
                &self.overrides,
            ),
            CallTarget::WorkProfile(query) => {
                rules::work_profile::evaluate_work_profile(*query, snapshot)
            }
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcloak_core::flags::PolicyFlag;
    use devcloak_core::types::{ProfileQuery, PropValue, ReturnType};
    use time::macros::datetime;

    fn call(target: CallTarget) -> InterceptedCall {
        InterceptedCall {
            timestamp: datetime!(2024-06-01 12:00:00 UTC),
            target,
            note: None,
        }
    }

    #[test]
    fn test_settings_lookup() {
        let engine = PolicyEngine::new();
        let snapshot = FlagSnapshot::defaults();
        let decision = engine.decide(
            &call(CallTarget::Settings {
                key: "adb_enabled".to_string(),
            }),
            &snapshot,
        );
        assert_eq!(
            decision.action,
            DecisionAction::ReplaceReturn(PropValue::Str("0".to_string()))
        );
    }

    #[test]
    fn test_property_read_typed_by_accessor() {
        let engine = PolicyEngine::with_overrides(OverrideTable::from_pairs(&[(
            "sys.usb.config",
            "mtp",
        )]));
        let snapshot = FlagSnapshot::defaults();

        let decision = engine.decide(
            &call(CallTarget::SystemProperty {
                key: "sys.usb.config".to_string(),
                return_type: ReturnType::String,
            }),
            &snapshot,
        );
        assert_eq!(
            decision.action,
            DecisionAction::ReplaceReturn(PropValue::Str("mtp".to_string()))
        );

        // Same key through the int accessor: coercion fails silently.
        let decision = engine.decide(
            &call(CallTarget::SystemProperty {
                key: "sys.usb.config".to_string(),
                return_type: ReturnType::Int,
            }),
            &snapshot,
        );
        assert_eq!(decision.action, DecisionAction::PassThrough);
    }

    #[test]
    fn test_process_start() {
        let engine = PolicyEngine::new();
        let snapshot = FlagSnapshot::defaults();
        let decision = engine.decide(
            &call(CallTarget::ProcessStart {
                command: vec!["getprop".to_string(), "sys.usb.state".to_string()],
            }),
            &snapshot,
        );
        assert!(matches!(
            decision.action,
            DecisionAction::ReplaceArgument { index: 1, .. }
        ));
    }

    #[test]
    fn test_work_profile_query() {
        let engine = PolicyEngine::new();
        let snapshot = FlagSnapshot::defaults().with_flag(PolicyFlag::SpoofWorkProfile, true);
        let decision = engine.decide(
            &call(CallTarget::WorkProfile(ProfileQuery::IsInAdminMode)),
            &snapshot,
        );
        assert_eq!(
            decision.action,
            DecisionAction::ReplaceReturn(PropValue::Bool(false))
        );
    }

    #[test]
    fn test_decide_is_idempotent_for_fixed_snapshot() {
        let engine = PolicyEngine::new();
        let snapshot = FlagSnapshot::defaults();
        let calls = [
            call(CallTarget::Settings {
                key: "development_settings_enabled".to_string(),
            }),
            call(CallTarget::SystemProperty {
                key: "init.svc.adbd".to_string(),
                return_type: ReturnType::String,
            }),
            call(CallTarget::ProcessStart {
                command: vec!["getprop".to_string(), "sys.usb.config".to_string()],
            }),
            call(CallTarget::WorkProfile(ProfileQuery::IsProfileOwner)),
        ];
        for intercepted in &calls {
            let first = engine.decide(intercepted, &snapshot);
            let second = engine.decide(intercepted, &snapshot);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_banned_set_agrees_with_decide_for_one_snapshot() {
        let engine = PolicyEngine::new();
        let snapshot = FlagSnapshot::defaults().with_flag(PolicyFlag::HideUsbDebug, false);
        let banned = banned_settings_keys(&snapshot);
        for key in ["development_settings_enabled", "adb_enabled", "adb_wifi_enabled"] {
            let decision = engine.decide(
                &call(CallTarget::Settings {
                    key: key.to_string(),
                }),
                &snapshot,
            );
            let intercepted = !decision.action.is_pass_through();
            assert_eq!(intercepted, banned.contains(key));
        }
    }
}
