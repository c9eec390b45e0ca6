//! Structured event lines on stderr, one JSON object per event.

use indicatif::ProgressBar;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Warn => Some("warn"),
            Self::Error => Some("error"),
        }
    }
}

pub fn event_line(component: &str, level: Level, event: &str, details: Value) -> String {
    let mut line = json!({
        "component": component,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    });
    if let Some(level) = level.as_str() {
        line["level"] = Value::from(level);
    }
    line.to_string()
}

pub fn log_info(component: &str, event: &str, details: Value) {
    emit(None, event_line(component, Level::Info, event, details));
}

pub fn log_warn(component: &str, event: &str, details: Value) {
    emit(None, event_line(component, Level::Warn, event, details));
}

pub fn log_error(component: &str, event: &str, details: Value) {
    emit(None, event_line(component, Level::Error, event, details));
}

/// Writes an event without tearing an active progress bar.
pub fn log_with_progress(
    progress: Option<&ProgressBar>,
    component: &str,
    level: Level,
    event: &str,
    details: Value,
) {
    emit(progress, event_line(component, level, event, details));
}

fn emit(progress: Option<&ProgressBar>, line: String) {
    match progress {
        Some(bar) => bar.suspend(|| eprintln!("{line}")),
        None => eprintln!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_omit_level() {
        let line = event_line("enumerator", Level::Info, "region_started", json!({"region": "us-east-1"}));
        let parsed: Value = serde_json::from_str(&line).expect("line should be json");

        assert_eq!(parsed["component"], "enumerator");
        assert_eq!(parsed["event"], "region_started");
        assert_eq!(parsed["details"]["region"], "us-east-1");
        assert!(parsed.get("level").is_none());
        assert!(parsed["timestamp"].as_str().is_some());
    }

    #[test]
    fn error_lines_carry_level() {
        let line = event_line("enumerator", Level::Error, "region_failed", json!({}));
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "error");
    }
}
