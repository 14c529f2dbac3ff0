//! System property concealment.
//!
//! Four physical accessor variants exist, one per return type; they collapse
//! into one rule keyed by the declared return type. Ordering matters and is
//! observable: the flag guard first, then the table lookup, then coercion.

use devcloak_core::flags::{FlagSnapshot, PolicyFlag};
use devcloak_core::types::ReturnType;

use crate::decision::{DecisionAction, PolicyDecision};
use crate::overrides::{coerce, OverrideTable};

const LABEL: &str = "Debug properties";

pub fn evaluate_property(
    key: &str,
    return_type: ReturnType,
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

    let Some(value) = overrides.lookup(key) else {
        return PolicyDecision {
            action: DecisionAction::PassThrough,
            reason: format!("No override for property: {key}"),
            policy_label: Some(LABEL.to_string()),
        };
    };

    if return_type == ReturnType::Other {
        return PolicyDecision {
            action: DecisionAction::PassThrough,
            reason: format!("Unsupported accessor return type for {key}"),
            policy_label: Some(LABEL.to_string()),
        };
    }

    match coerce(value, return_type) {
        Ok(typed) => PolicyDecision {
            action: DecisionAction::ReplaceReturn(typed),
            reason: format!("Property {key} overridden as {return_type}"),
            policy_label: Some(LABEL.to_string()),
        },
        // The override exists but cannot take the accessor's shape; defer
        // to the real value rather than surface an error to the caller.
        Err(err) => PolicyDecision {
            action: DecisionAction::PassThrough,
            reason: format!("Override for {key} not usable: {err}"),
            policy_label: Some(LABEL.to_string()),
        },
    }
}
