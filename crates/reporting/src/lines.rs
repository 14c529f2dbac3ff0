//! One-line-per-decision rendering for the diagnostic channel.

use time::format_description::well_known::Rfc3339;

use devcloak_core::types::CallTarget;
use policy_engine::DecisionAction;

use crate::ReportEvent;

pub fn render_line(event: &ReportEvent) -> String {
    let timestamp = event
        .call
        .timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| "-".to_string());
    let mut line = format!(
        "{timestamp} {target} -> {action} ({reason})",
        target = describe_target(&event.call.target),
        action = describe_action(&event.decision.action),
        reason = event.decision.reason,
    );
    if let Some(note) = &event.call.note {
        line.push_str(&format!(" [{note}]"));
    }
    line
}

fn describe_target(target: &CallTarget) -> String {
    match target {
        CallTarget::Settings { key } => format!("settings:{key}"),
        CallTarget::SystemProperty { key, return_type } => format!("prop:{key}:{return_type}"),
        CallTarget::ProcessStart { command } => format!("exec:[{}]", command.join(" ")),
        CallTarget::WorkProfile(query) => format!("profile:{query}"),
    }
}

fn describe_action(action: &DecisionAction) -> String {
    match action {
        DecisionAction::PassThrough => "pass-through".to_string(),
        DecisionAction::ReplaceReturn(value) => format!("replace-return:{value}"),
        DecisionAction::ReplaceArgument { index, value } => {
            format!("replace-arg:{index}:{value}")
        }
        DecisionAction::Fail(reason) => format!("fail-open:{reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcloak_core::types::{InterceptedCall, PropValue, ReturnType};
    use policy_engine::PolicyDecision;
    use time::macros::datetime;

    #[test]
    fn test_render_line_shows_target_and_verdict() {
        let event = ReportEvent {
            call: InterceptedCall {
                timestamp: datetime!(2024-06-01 12:00:00 UTC),
                target: CallTarget::SystemProperty {
                    key: "sys.usb.config".to_string(),
                    return_type: ReturnType::String,
                },
                note: Some("hooked native_get".to_string()),
            },
            decision: PolicyDecision {
                action: DecisionAction::ReplaceReturn(PropValue::Str("mtp".to_string())),
                reason: "Property sys.usb.config overridden as string".to_string(),
                policy_label: Some("Debug properties".to_string()),
            },
        };
        let line = render_line(&event);
        assert!(line.contains("prop:sys.usb.config:string"));
        assert!(line.contains("replace-return:mtp"));
        assert!(line.contains("[hooked native_get]"));
    }

    #[test]
    fn test_exec_target_renders_command() {
        let event = ReportEvent {
            call: InterceptedCall {
                timestamp: datetime!(2024-06-01 12:00:00 UTC),
                target: CallTarget::ProcessStart {
                    command: vec!["getprop".to_string(), "sys.usb.state".to_string()],
                },
                note: None,
            },
            decision: PolicyDecision {
                action: DecisionAction::PassThrough,
                reason: "test".to_string(),
                policy_label: None,
            },
        };
        assert!(render_line(&event).contains("exec:[getprop sys.usb.state]"));
    }
}
