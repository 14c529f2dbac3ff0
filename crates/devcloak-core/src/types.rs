use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One intercepted invocation, as described by the hooking mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptedCall {
    pub timestamp: OffsetDateTime,
    pub target: CallTarget,
    pub note: Option<String>,
}

/// What the intercepted call was doing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CallTarget {
    /// Settings lookup; the call site returns the raw setting string.
    Settings { key: String },
    /// System property read through one of the typed accessor variants.
    SystemProperty { key: String, return_type: ReturnType },
    /// Process spawn with its command array.
    ProcessStart { command: Vec<String> },
    /// Profile-ownership or admin-mode query.
    WorkProfile(ProfileQuery),
}

/// Declared return type of a hooked property accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    String,
    Int,
    Long,
    Boolean,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileQuery {
    IsProfileOwner,
    IsInAdminMode,
}

/// Replacement value carried by a verdict, typed to match the accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    Str(String),
    Int(i32),
    Long(i64),
    Bool(bool),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(value) => write!(f, "{value}"),
            PropValue::Int(value) => write!(f, "{value}"),
            PropValue::Long(value) => write!(f, "{value}"),
            PropValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for ReturnType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "string" => Ok(ReturnType::String),
            "int" => Ok(ReturnType::Int),
            "long" => Ok(ReturnType::Long),
            "boolean" | "bool" => Ok(ReturnType::Boolean),
            "other" => Ok(ReturnType::Other),
            _ => Err(format!("unknown return type: {value}")),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ReturnType::String => "string",
            ReturnType::Int => "int",
            ReturnType::Long => "long",
            ReturnType::Boolean => "boolean",
            ReturnType::Other => "other",
        };
        write!(f, "{value}")
    }
}

impl FromStr for ProfileQuery {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "profile-owner" | "is-profile-owner" => Ok(ProfileQuery::IsProfileOwner),
            "admin-mode" | "is-in-admin-mode" => Ok(ProfileQuery::IsInAdminMode),
            _ => Err(format!("unknown profile query: {value}")),
        }
    }
}

impl fmt::Display for ProfileQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ProfileQuery::IsProfileOwner => "profile-owner",
            ProfileQuery::IsInAdminMode => "admin-mode",
        };
        write!(f, "{value}")
    }
}
