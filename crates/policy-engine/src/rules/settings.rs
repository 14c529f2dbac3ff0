//! Developer/debug settings concealment.
//!
//! Each enabled flag contributes one settings key to a banned set; a lookup
//! of a banned key reads as the disabled sentinel. The set is computed
//! deterministically from a flag snapshot, so a key cannot flip between
//! banned and allowed within one resolved session.

use std::collections::BTreeSet;

use devcloak_core::flags::{FlagSnapshot, PolicyFlag};
use devcloak_core::types::PropValue;

use crate::decision::{DecisionAction, PolicyDecision};

pub const DEVELOPMENT_SETTINGS_ENABLED: &str = "development_settings_enabled";
pub const ADB_ENABLED: &str = "adb_enabled";
pub const ADB_WIFI_ENABLED: &str = "adb_wifi_enabled";

/// Canonical "disabled" value for this settings namespace. The hooked call
/// site returns the raw setting string, so the sentinel stays a string even
/// for settings that are numeric underneath.
pub const DISABLED_SENTINEL: &str = "0";

/// Settings keys that must read as disabled under the given snapshot. An
/// empty set means no settings hook needs installing at all.
pub fn banned_settings_keys(snapshot: &FlagSnapshot) -> BTreeSet<&'static str> {
    let mut keys = BTreeSet::new();
    if snapshot.is_enabled(PolicyFlag::HideDeveloperMode) {
        keys.insert(DEVELOPMENT_SETTINGS_ENABLED);
    }
    if snapshot.is_enabled(PolicyFlag::HideUsbDebug) {
        keys.insert(ADB_ENABLED);
    }
    if snapshot.is_enabled(PolicyFlag::HideWirelessDebug) {
        keys.insert(ADB_WIFI_ENABLED);
    }
    keys
}

pub fn evaluate_settings(key: &str, banned: &BTreeSet<&'static str>) -> PolicyDecision {
    if banned.contains(key) {
        return PolicyDecision {
            action: DecisionAction::ReplaceReturn(PropValue::Str(DISABLED_SENTINEL.to_string())),
            reason: format!("Setting read as disabled: {key}"),
            policy_label: Some("Settings concealment".to_string()),
        };
    }

    PolicyDecision {
        action: DecisionAction::PassThrough,
        reason: format!("Setting not concealed: {key}"),
        policy_label: Some("Settings concealment".to_string()),
    }
}
