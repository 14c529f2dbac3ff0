use serde::{Deserialize, Serialize};

use devcloak_core::types::PropValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub action: DecisionAction,
    pub reason: String,
    pub policy_label: Option<String>,
}

/// What the hooking mechanism should do with the intercepted call. Exactly
/// one action per call; actions are never combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecisionAction {
    /// Let the original call proceed untouched.
    PassThrough,
    /// Return this value instead of invoking the original.
    ReplaceReturn(PropValue),
    /// Rewrite one argument, then let the original call proceed.
    ReplaceArgument { index: usize, value: String },
    /// Interception machinery failed; apply exactly like `PassThrough`.
    Fail(String),
}

impl DecisionAction {
    /// True when the original behavior is preserved, including fail-open.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, DecisionAction::PassThrough | DecisionAction::Fail(_))
    }
}
