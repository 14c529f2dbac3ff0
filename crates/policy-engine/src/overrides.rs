//! Property override table and value coercion.
//!
//! The table maps a system property key to the replacement string every
//! concealed read should observe. Lookups are exact; there is no prefix or
//! wildcard matching. Coercion converts a replacement string into the type
//! a hooked accessor variant declares.

use std::collections::HashMap;

use devcloak_core::error::CoercionError;
use devcloak_core::types::{PropValue, ReturnType};

/// Immutable key → replacement mapping, built once and shared read-only
/// across all decisions.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    /// The fixed overrides for USB/adb debug properties.
    pub fn builtin() -> Self {
        Self::from_pairs(&[
            ("sys.usb.ffs.ready", "0"),
            ("sys.usb.config", "mtp"),
            ("persist.sys.usb.config", "mtp"),
            ("sys.usb.state", "mtp"),
            ("init.svc.adbd", "stopped"),
        ])
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Converts a replacement string into the accessor's declared return type.
pub fn coerce(value: &str, target: ReturnType) -> Result<PropValue, CoercionError> {
    match target {
        ReturnType::String => Ok(PropValue::Str(value.to_string())),
        ReturnType::Int => value
            .parse::<i32>()
            .map(PropValue::Int)
            .map_err(|_| CoercionError::NotANumber(value.to_string())),
        ReturnType::Long => value
            .parse::<i64>()
            .map(PropValue::Long)
            .map_err(|_| CoercionError::NotANumber(value.to_string())),
        ReturnType::Boolean => coerce_bool(value),
        ReturnType::Other => Err(CoercionError::UnsupportedType),
    }
}

fn coerce_bool(value: &str) -> Result<PropValue, CoercionError> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Ok(PropValue::Bool(true))
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Ok(PropValue::Bool(false))
    } else {
        Err(CoercionError::NotABoolean(value.to_string()))
    }
}
