#[cfg(test)]
use std::sync::{Arc, Mutex};

use std::process::ExitCode;

use splitgate_common::{ReconcileReport, SplitgateError, SplitgateResult, UpdateOutcome};
use uuid::Uuid;

use crate::args::OutputFormat;

#[derive(Debug, Clone)]
enum Sink {
    Stdout,
    Stderr,
    #[cfg(test)]
    Captured(Arc<Mutex<Vec<String>>>),
}

/// Destination for the human-readable progress stream (🔹 / ✅ / ❌ lines).
#[derive(Debug, Clone)]
pub struct Progress {
    sink: Sink,
}

impl Progress {
    /// Progress shares stdout with a text report; a JSON report owns stdout,
    /// so progress moves to stderr.
    pub fn for_format(format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Text => Sink::Stdout,
            OutputFormat::Json => Sink::Stderr,
        };
        Self { sink }
    }

    /// Keep lines in memory instead of printing them.
    #[cfg(test)]
    pub fn captured() -> Self {
        Self {
            sink: Sink::Captured(Arc::default()),
        }
    }

    /// Lines recorded by a [`Progress::captured`] sink.
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Sink::Captured(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn step(&self, message: impl AsRef<str>) {
        self.emit("🔹", message.as_ref());
    }

    pub fn ok(&self, message: impl AsRef<str>) {
        self.emit("✅", message.as_ref());
    }

    pub fn fail(&self, message: impl AsRef<str>) {
        self.emit("❌", message.as_ref());
    }

    fn emit(&self, marker: &str, message: &str) {
        match &self.sink {
            Sink::Stdout => println!("{marker} {message}"),
            Sink::Stderr => eprintln!("{marker} {message}"),
            #[cfg(test)]
            Sink::Captured(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(format!("{marker} {message}"));
                }
            }
        }
    }
}

/// Report the abort on the progress stream, plus a workflow-command
/// annotation on stdout so CI runners surface it on the job summary.
///
/// The control-plane detail of a gate failure was already printed by the
/// verifier.
pub fn print_action_failed(progress: &Progress, err: &SplitgateError) {
    progress.fail(err.to_string());
    println!("::error::❌ Action failed: {err}");
}

/// Print the outcome of a run and pick the process exit code.
///
/// Never fails, so the caller always reaches telemetry shutdown.
pub fn conclude(
    result: SplitgateResult<ReconcileReport>,
    format: OutputFormat,
    progress: &Progress,
    run_id: Uuid,
) -> ExitCode {
    match result {
        Ok(report) => match print_report(&report, format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(%run_id, error = %err, "failed to render report");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            tracing::error!(%run_id, error = %err, "run aborted");
            print_action_failed(progress, &err);
            ExitCode::FAILURE
        }
    }
}

pub fn print_report(report: &ReconcileReport, format: OutputFormat) -> serde_json::Result<()> {
    print!("{}", render_report(report, format)?);
    Ok(())
}

pub fn render_report(report: &ReconcileReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
        OutputFormat::Text => Ok(render_report_text(report)),
    }
}

fn render_report_text(report: &ReconcileReport) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(512);
    let _ = writeln!(out, "\n=== Traffic Update Report ({}) ===\n", report.run_id);
    if report.updates.is_empty() {
        let _ = writeln!(out, "No deployments were named in the traffic specification.");
    } else {
        let _ = writeln!(
            out,
            "{:<12} {:<30} {:<8} {:<10}",
            "Kind", "Deployment", "Weight", "Status"
        );
        let _ = writeln!(out, "{:-<70}", "");
        for u in &report.updates {
            let status = match &u.outcome {
                UpdateOutcome::Updated => "updated".to_string(),
                UpdateOutcome::UpdateFailed { error, .. } => {
                    format!("FAILED ({})", first_line(error))
                }
            };
            let _ = writeln!(
                out,
                "{:<12} {:<30} {:<8} {}",
                u.kind.label(),
                u.deployment,
                u.weight,
                status
            );
        }
    }
    let _ = writeln!(out);

    let failed = report.updates.len() - report.succeeded_count();
    if failed == 0 {
        let _ = writeln!(out, "✅ Deployment traffic updated successfully.");
    } else {
        let _ = writeln!(out, "⚠ Deployment traffic updated with {failed} failure(s).");
    }
    out
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
