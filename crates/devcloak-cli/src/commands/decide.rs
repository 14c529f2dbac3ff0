use std::path::PathBuf;

use anyhow::Result;
use time::OffsetDateTime;

use devcloak_core::flags::FlagSnapshot;
use devcloak_core::types::{CallTarget, InterceptedCall};
use policy_engine::PolicyEngine;
use reporting::{lines, ReportEvent};

pub fn run(config_path: Option<PathBuf>, target: CallTarget, json: bool) -> Result<()> {
    let store = super::flag_store(config_path)?;
    let snapshot = FlagSnapshot::resolve(&store);
    let engine = PolicyEngine::new();

    let call = InterceptedCall {
        timestamp: OffsetDateTime::now_utc(),
        target,
        note: None,
    };
    let decision = engine.decide(&call, &snapshot);
    let event = ReportEvent { call, decision };

    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("{}", lines::render_line(&event));
    }
    Ok(())
}
