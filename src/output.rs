// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines, results and timings.
    Normal,
    /// Results, warnings and errors only.
    Quiet,
    /// One JSON document per event or result.
    Json,
}

/// Routes command feedback according to the selected mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
    started: Option<Instant>,
}

#[derive(Serialize)]
struct Event<'a> {
    event: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            started: None,
        }
    }

    /// Start timing a long-running stack operation.
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Seconds since `start_timer`, or `None` when no timer runs.
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.started.map(|t| t.elapsed().as_secs_f64())
    }

    fn event_json(&self, event: &'static str, message: &str) -> Option<String> {
        let duration_secs = match event {
            "warning" => None,
            _ => self.elapsed_secs(),
        };
        serde_json::to_string(&Event {
            event,
            message,
            duration_secs,
        })
        .ok()
    }

    /// Print a progress line. Normal mode only.
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print the final message of a command.
    pub fn success(&self, message: &str) {
        match (self.mode, self.elapsed_secs()) {
            (OutputMode::Normal, Some(secs)) => println!("{message} ({secs:.1}s)"),
            (OutputMode::Normal | OutputMode::Quiet, _) => println!("{message}"),
            (OutputMode::Json, _) => {
                if let Some(json) = self.event_json("success", message) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a non-fatal warning to stderr.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => {
                if let Some(json) = self.event_json("warning", message) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a command result: plain lines, or one JSON document in JSON mode.
    pub fn result<T: Serialize>(&self, lines: &[String], value: &T) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                for line in lines {
                    println!("{line}");
                }
            }
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(value) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a fatal error to stderr.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => {
                if let Some(json) = self.event_json("error", message) {
                    eprintln!("{json}");
                }
            }
        }
    }
}
