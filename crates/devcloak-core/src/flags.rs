use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store key for the native-layer property hook. It only gates the external
/// native library and never reaches the decision engine, but the preference
/// store and CLI round-trip it alongside the engine flags.
pub const HIDE_DEBUG_PROPERTIES_IN_NATIVE: &str = "hide_debug_properties_in_native";

/// One concealment category the user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFlag {
    HideDebugProperties,
    HideDeveloperMode,
    HideUsbDebug,
    HideWirelessDebug,
    SpoofWorkProfile,
}

impl PolicyFlag {
    pub const ALL: [PolicyFlag; 5] = [
        PolicyFlag::HideDebugProperties,
        PolicyFlag::HideDeveloperMode,
        PolicyFlag::HideUsbDebug,
        PolicyFlag::HideWirelessDebug,
        PolicyFlag::SpoofWorkProfile,
    ];

    /// Key under which the flag lives in the preference store.
    pub fn key(&self) -> &'static str {
        match self {
            PolicyFlag::HideDebugProperties => "hide_debug_properties",
            PolicyFlag::HideDeveloperMode => "hide_developer_mode",
            PolicyFlag::HideUsbDebug => "hide_usb_debug",
            PolicyFlag::HideWirelessDebug => "hide_wireless_debug",
            PolicyFlag::SpoofWorkProfile => "spoof_work_profile",
        }
    }

    /// Effective value when the store has no entry for the flag.
    pub fn default_value(&self) -> bool {
        !matches!(self, PolicyFlag::SpoofWorkProfile)
    }
}

impl FromStr for PolicyFlag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PolicyFlag::ALL
            .into_iter()
            .find(|flag| flag.key() == value)
            .ok_or_else(|| format!("unknown policy flag: {value}"))
    }
}

impl fmt::Display for PolicyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// External boolean store the flags are resolved from. `None` means the key
/// is absent or the store is unreadable; both read as the flag's default.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<bool>;
}

/// Immutable per-request resolution of every flag. Resolved fresh for each
/// decision-triggering event and passed by value into the engine, so a
/// verdict is a pure function of its inputs even while the store is being
/// rewritten concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSnapshot {
    hide_debug_properties: bool,
    hide_developer_mode: bool,
    hide_usb_debug: bool,
    hide_wireless_debug: bool,
    spoof_work_profile: bool,
}

impl FlagSnapshot {
    pub fn resolve(store: &dyn FlagStore) -> Self {
        let read = |flag: PolicyFlag| store.get(flag.key()).unwrap_or(flag.default_value());
        Self {
            hide_debug_properties: read(PolicyFlag::HideDebugProperties),
            hide_developer_mode: read(PolicyFlag::HideDeveloperMode),
            hide_usb_debug: read(PolicyFlag::HideUsbDebug),
            hide_wireless_debug: read(PolicyFlag::HideWirelessDebug),
            spoof_work_profile: read(PolicyFlag::SpoofWorkProfile),
        }
    }

    pub fn defaults() -> Self {
        struct Empty;
        impl FlagStore for Empty {
            fn get(&self, _key: &str) -> Option<bool> {
                None
            }
        }
        Self::resolve(&Empty)
    }

    pub fn is_enabled(&self, flag: PolicyFlag) -> bool {
        match flag {
            PolicyFlag::HideDebugProperties => self.hide_debug_properties,
            PolicyFlag::HideDeveloperMode => self.hide_developer_mode,
            PolicyFlag::HideUsbDebug => self.hide_usb_debug,
            PolicyFlag::HideWirelessDebug => self.hide_wireless_debug,
            PolicyFlag::SpoofWorkProfile => self.spoof_work_profile,
        }
    }

    pub fn with_flag(mut self, flag: PolicyFlag, value: bool) -> Self {
        match flag {
            PolicyFlag::HideDebugProperties => self.hide_debug_properties = value,
            PolicyFlag::HideDeveloperMode => self.hide_developer_mode = value,
            PolicyFlag::HideUsbDebug => self.hide_usb_debug = value,
            PolicyFlag::HideWirelessDebug => self.hide_wireless_debug = value,
            PolicyFlag::SpoofWorkProfile => self.spoof_work_profile = value,
        }
        self
    }
}

impl Default for FlagSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}
