use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use devcloak_core::config::{Config, ConfigPaths, ReportConfig};
use devcloak_core::flags::FlagSnapshot;
use devcloak_core::types::InterceptedCall;
use policy_engine::PolicyEngine;
use reporting::{json, lines, ReportEvent, SessionReport};

#[derive(Debug, PartialEq, Eq)]
enum OutputMode {
    Json,
    Lines { with_summary: bool },
}

/// `--json` always wins; otherwise the reporting config decides. A config
/// with only `structured_json` set emits JSON, anything else emits lines,
/// with the human summary appended when `human_summary` is set.
fn output_mode(force_json: bool, reporting: &ReportConfig) -> OutputMode {
    if force_json || (reporting.structured_json && !reporting.human_summary) {
        return OutputMode::Json;
    }
    OutputMode::Lines {
        with_summary: reporting.human_summary,
    }
}

/// Re-evaluates a recorded call log under the current preferences. One
/// snapshot is resolved for the whole replay, so every call sees the same
/// flag values.
pub fn run(config_path: Option<PathBuf>, input: &Path, as_json: bool) -> Result<()> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("read call log {}", input.display()))?;
    let calls: Vec<InterceptedCall> =
        serde_json::from_str(&contents).context("parse call log JSON")?;

    let path = super::effective_config_path(config_path)?;
    let config = if path.exists() {
        Config::load(&path).with_context(|| format!("load config {}", path.display()))?
    } else {
        Config::default_config()
    };
    let snapshot = FlagSnapshot::resolve(&config);
    let engine = PolicyEngine::new();

    let started_at = calls.first().map(|call| call.timestamp);
    let ended_at = calls.last().map(|call| call.timestamp);
    let events: Vec<ReportEvent> = calls
        .into_iter()
        .map(|call| {
            let decision = engine.decide(&call, &snapshot);
            ReportEvent { call, decision }
        })
        .collect();

    let report = SessionReport::new(
        started_at.unwrap_or_else(time::OffsetDateTime::now_utc),
        ended_at,
        events,
    );

    match output_mode(as_json, &config.reporting) {
        OutputMode::Json => println!("{}", json::render_json(&report)),
        OutputMode::Lines { with_summary } => {
            for event in &report.events {
                println!("{}", lines::render_line(event));
            }
            if with_summary {
                println!();
                println!("{}", report.human_summary());
            }
        }
    }

    if config.reporting.store_reports {
        let report_path = stored_report_path(&ConfigPaths::resolve()?.report_dir, &report);
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create report dir {}", parent.display()))?;
        }
        fs::write(&report_path, json::render_json(&report))
            .with_context(|| format!("write report {}", report_path.display()))?;
        eprintln!("stored {}", report_path.display());
    }

    Ok(())
}

fn stored_report_path(report_dir: &Path, report: &SessionReport) -> PathBuf {
    report_dir.join(format!("session-{}.json", report.session_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_overrides_config() {
        let reporting = ReportConfig {
            store_reports: false,
            human_summary: true,
            structured_json: false,
        };
        assert_eq!(output_mode(true, &reporting), OutputMode::Json);
    }

    #[test]
    fn test_structured_json_only_config_emits_json() {
        let reporting = ReportConfig {
            store_reports: false,
            human_summary: false,
            structured_json: true,
        };
        assert_eq!(output_mode(false, &reporting), OutputMode::Json);
    }

    #[test]
    fn test_human_summary_config_emits_lines_with_summary() {
        let reporting = ReportConfig::default();
        assert_eq!(
            output_mode(false, &reporting),
            OutputMode::Lines { with_summary: true }
        );

        let quiet = ReportConfig {
            store_reports: false,
            human_summary: false,
            structured_json: false,
        };
        assert_eq!(
            output_mode(false, &quiet),
            OutputMode::Lines {
                with_summary: false
            }
        );
    }

    #[test]
    fn test_stored_report_path_uses_session_id() {
        let report = SessionReport::new(time::OffsetDateTime::UNIX_EPOCH, None, Vec::new());
        let path = stored_report_path(Path::new("/tmp/reports"), &report);
        assert_eq!(
            path,
            Path::new("/tmp/reports").join(format!("session-{}.json", report.session_id))
        );
    }
}
