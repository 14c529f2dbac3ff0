use thiserror::Error;

/// An override value was found but could not be converted to the return
/// type the call site demands. Never escapes the engine; the affected
/// verdict degrades to pass-through and the reason rides along for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("not a boolean: {0:?}")]
    NotABoolean(String),
    #[error("unsupported return type")]
    UnsupportedType,
}
