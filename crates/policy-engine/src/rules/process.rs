//! Process spawn concealment.
//!
//! An app can bypass the property accessors by shelling out to
//! `getprop <key>`. When the queried key is covered by the override table,
//! the query argument is rewritten to a nonexistent property name so the
//! spawned process observes an empty result instead of the real value. The
//! rewritten name is salted with the call's timestamp so an observer cannot
//! pre-register the dummy property; it is obfuscation, not a uniqueness
//! guarantee.

use time::OffsetDateTime;

use devcloak_core::flags::{FlagSnapshot, PolicyFlag};

use crate::decision::{DecisionAction, PolicyDecision};
use crate::overrides::OverrideTable;

const GETPROP: &str = "getprop";
const LABEL: &str = "Process concealment";

pub fn evaluate_process_start(
    command: &[String],
    timestamp: OffsetDateTime,
    snapshot: &FlagSnapshot,
    overrides: &OverrideTable,
) -> PolicyDecision {
    if !snapshot.is_enabled(PolicyFlag::HideDebugProperties) {
        return PolicyDecision {
            action: DecisionAction::PassThrough,
            reason: "Property concealment disabled".to_string(),
            policy_label: Some(LABEL.to_string()),
        };
    }

    let first = command.first().map(String::as_str);
    let second = command.get(1).map(String::as_str);
    if first == Some(GETPROP) {
        if let Some(key) = second {
            if overrides.contains(key) {
                let millis = timestamp.unix_timestamp_nanos() / 1_000_000;
                return PolicyDecision {
                    action: DecisionAction::ReplaceArgument {
                        index: 1,
                        value: format!("Dummy{millis}"),
                    },
                    reason: format!("getprop query corrupted: {key}"),
                    policy_label: Some(LABEL.to_string()),
                };
            }
        }
    }

    PolicyDecision {
        action: DecisionAction::PassThrough,
        reason: "Command does not query a concealed property".to_string(),
        policy_label: Some(LABEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn test_getprop_on_concealed_key_is_corrupted() {
        let overrides = OverrideTable::builtin();
        let snapshot = FlagSnapshot::defaults();
        let at = datetime!(2024-06-01 12:00:00 UTC);

        let decision = evaluate_process_start(
            &command(&["getprop", "sys.usb.state"]),
            at,
            &snapshot,
            &overrides,
        );
        let DecisionAction::ReplaceArgument { index, value } = decision.action else {
            panic!("expected argument replacement, got {:?}", decision.action);
        };
        assert_eq!(index, 1);
        assert_ne!(value, "sys.usb.state");
        let suffix = value.strip_prefix("Dummy").unwrap();
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_guard_disabled_passes_through() {
        let overrides = OverrideTable::builtin();
        let snapshot = FlagSnapshot::defaults().with_flag(PolicyFlag::HideDebugProperties, false);
        let decision = evaluate_process_start(
            &command(&["getprop", "sys.usb.state"]),
            OffsetDateTime::UNIX_EPOCH,
            &snapshot,
            &overrides,
        );
        assert_eq!(decision.action, DecisionAction::PassThrough);
    }

    #[test]
    fn test_unconcealed_key_passes_through() {
        let overrides = OverrideTable::builtin();
        let snapshot = FlagSnapshot::defaults();
        let decision = evaluate_process_start(
            &command(&["getprop", "ro.product.model"]),
            OffsetDateTime::UNIX_EPOCH,
            &snapshot,
            &overrides,
        );
        assert_eq!(decision.action, DecisionAction::PassThrough);
    }

    #[test]
    fn test_other_commands_pass_through() {
        let overrides = OverrideTable::builtin();
        let snapshot = FlagSnapshot::defaults();
        for argv in [
            command(&["ls", "sys.usb.state"]),
            command(&["getprop"]),
            command(&[]),
        ] {
            let decision = evaluate_process_start(
                &argv,
                OffsetDateTime::UNIX_EPOCH,
                &snapshot,
                &overrides,
            );
            assert_eq!(decision.action, DecisionAction::PassThrough);
        }
    }

    #[test]
    fn test_corruption_tracks_call_timestamp() {
        let overrides = OverrideTable::builtin();
        let snapshot = FlagSnapshot::defaults();
        let argv = command(&["getprop", "init.svc.adbd"]);

        let first = evaluate_process_start(
            &argv,
            datetime!(2024-06-01 12:00:00 UTC),
            &snapshot,
            &overrides,
        );
        let second = evaluate_process_start(
            &argv,
            datetime!(2024-06-01 12:00:01 UTC),
            &snapshot,
            &overrides,
        );
        assert_ne!(first.action, second.action);

        // Identical inputs give an identical verdict.
        let replay = evaluate_process_start(
            &argv,
            datetime!(2024-06-01 12:00:00 UTC),
            &snapshot,
            &overrides,
        );
        assert_eq!(first.action, replay.action);
    }
}
