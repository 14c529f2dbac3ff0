use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use devcloak_core::types::{CallTarget, InterceptedCall};
use policy_engine::{DecisionAction, PolicyDecision};

pub mod json;
pub mod lines;

/// One evaluated call: the descriptor and the verdict the engine computed
/// for it. Advisory only; recording an event never feeds back into later
/// decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEvent {
    pub call: InterceptedCall,
    pub decision: PolicyDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_calls: u32,
    pub passed_through: u32,
    pub replaced_returns: u32,
    pub replaced_arguments: u32,
    pub failed_open: u32,
    pub settings_calls: u32,
    pub property_calls: u32,
    pub process_calls: u32,
    pub profile_calls: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
    pub events: Vec<ReportEvent>,
    pub stats: ReportStats,
}

impl SessionReport {
    pub fn new(
        started_at: OffsetDateTime,
        ended_at: Option<OffsetDateTime>,
        events: Vec<ReportEvent>,
    ) -> Self {
        let stats = ReportStats::from_events(&events);
        Self {
            session_id: Uuid::new_v4(),
            started_at,
            ended_at,
            events,
            stats,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        let end = self.ended_at?;
        Some(end - self.started_at)
    }

    pub fn human_summary(&self) -> String {
        let concealed = self
            .stats
            .replaced_returns
            .saturating_add(self.stats.replaced_arguments);
        let concealed_line = if concealed == 0 {
            "No intercepted calls needed concealment.".to_string()
        } else {
            format!("{concealed} intercepted calls were concealed.")
        };
        let fail_line = if self.stats.failed_open == 0 {
            String::new()
        } else {
            format!(
                "\n{} calls failed open to original behavior.",
                self.stats.failed_open
            )
        };
        format!(
            "{total} calls evaluated.\n{concealed_line}{fail_line}",
            total = self.stats.total_calls
        )
    }
}

impl ReportStats {
    pub fn from_events(events: &[ReportEvent]) -> Self {
        let mut stats = ReportStats {
            total_calls: 0,
            passed_through: 0,
            replaced_returns: 0,
            replaced_arguments: 0,
            failed_open: 0,
            settings_calls: 0,
            property_calls: 0,
            process_calls: 0,
            profile_calls: 0,
        };

        for event in events {
            stats.total_calls = stats.total_calls.saturating_add(1);
            match event.call.target {
                CallTarget::Settings { .. } => {
                    stats.settings_calls = stats.settings_calls.saturating_add(1)
                }
                CallTarget::SystemProperty { .. } => {
                    stats.property_calls = stats.property_calls.saturating_add(1)
                }
                CallTarget::ProcessStart { .. } => {
                    stats.process_calls = stats.process_calls.saturating_add(1)
                }
                CallTarget::WorkProfile(_) => {
                    stats.profile_calls = stats.profile_calls.saturating_add(1)
                }
            }
            match event.decision.action {
                DecisionAction::PassThrough => {
                    stats.passed_through = stats.passed_through.saturating_add(1)
                }
                DecisionAction::ReplaceReturn(_) => {
                    stats.replaced_returns = stats.replaced_returns.saturating_add(1)
                }
                DecisionAction::ReplaceArgument { .. } => {
                    stats.replaced_arguments = stats.replaced_arguments.saturating_add(1)
                }
                DecisionAction::Fail(_) => stats.failed_open = stats.failed_open.saturating_add(1),
            }
        }

        stats
    }
}
