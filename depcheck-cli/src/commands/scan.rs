//! `depcheck scan` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use depcheck_core::config::DepCheckConfig;
use depcheck_core::pipeline::MemorySink;
use depcheck_core::types::{Issue, MeasureScope, MeasureValue, MetricKey, Severity};
use depcheck_report::{DependencyCheckSensor, ReportScannerConfig, RunOutcome, RunSummary};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::fs_index::FsSourceIndex;
use crate::output::{OutputWriter, Render};

/// Execute the `scan` command.
pub async fn execute(
    args: ScanArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = DepCheckConfig::load_or_default(config_path).await?;
    let scanner_config = build_scanner_config(&config, &args)?;
    let sensor = DependencyCheckSensor::new(scanner_config)?;

    info!(
        base_dir = %sensor.config().base_dir.display(),
        report = %sensor.config().report_path,
        "starting report scan"
    );

    let (summary, sink) = tokio::task::spawn_blocking(move || {
        let index = FsSourceIndex::new(&sensor.config().base_dir);
        let mut sink = MemorySink::new();
        sensor
            .execute(&index, &mut sink)
            .map(|summary| (summary, sink))
    })
    .await
    .map_err(|e| CliError::Command(format!("scan task failed: {}", e)))??;

    let report = build_scan_report(summary, sink);
    writer.render(&report)?;

    if let Some(gate) = args.fail_on {
        let matched = report.issues_at_or_above(gate);
        if matched > 0 {
            return Err(CliError::Scan(format!(
                "found {} issue(s) at or above {} severity",
                matched,
                gate.as_label()
            )));
        }
    }

    Ok(())
}

/// Merge CLI overrides into the `[report]` section and build the scanner config.
fn build_scanner_config(
    config: &DepCheckConfig,
    args: &ScanArgs,
) -> Result<ReportScannerConfig, CliError> {
    let mut scanner_config = ReportScannerConfig::from_core(&config.report);

    if let Some(ref base_dir) = args.base_dir {
        scanner_config.base_dir = base_dir.clone();
    }
    if let Some(ref report) = args.report {
        scanner_config.report_path = report.clone();
    }
    if let Some(ref html) = args.html_report {
        scanner_config.html_report_path = if html.trim().is_empty() {
            None
        } else {
            Some(html.clone())
        };
    }
    if let Some(critical) = args.critical {
        scanner_config.severity_critical = critical;
    }
    if let Some(major) = args.major {
        scanner_config.severity_major = major;
    }

    scanner_config.validate()?;
    Ok(scanner_config)
}

fn build_scan_report(summary: RunSummary, sink: MemorySink) -> ScanReport {
    let html_report_bytes = match sink.project_measure(MetricKey::Report) {
        Some(MeasureValue::Text(html)) => Some(html.len()),
        _ => None,
    };

    let (issues, measures) = sink.into_parts();

    let project_measures = measures
        .into_iter()
        .filter(|m| m.scope == MeasureScope::Project && m.metric != MetricKey::Report)
        .map(|m| MeasureEntry {
            metric: m.metric.key().to_owned(),
            value: m.value.to_string(),
        })
        .collect();

    ScanReport {
        summary,
        html_report_bytes,
        project_measures,
        issues: issues.into_iter().map(IssueEntry::from).collect(),
    }
}

/// Result of a single `scan` invocation.
#[derive(Serialize)]
pub struct ScanReport {
    /// Run summary as returned by the sensor
    pub summary: RunSummary,
    /// Size of the attached HTML report, when one was found
    pub html_report_bytes: Option<usize>,
    /// Project-level measures in emission order
    pub project_measures: Vec<MeasureEntry>,
    /// Emitted issues
    pub issues: Vec<IssueEntry>,
}

impl ScanReport {
    /// Number of issues at or above the gate severity.
    pub fn issues_at_or_above(&self, threshold: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity >= threshold).count()
    }
}

#[derive(Serialize)]
pub struct MeasureEntry {
    pub metric: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct IssueEntry {
    pub file: String,
    pub line: u32,
    pub severity: Severity,
    pub message: String,
}

impl From<Issue> for IssueEntry {
    fn from(issue: Issue) -> Self {
        Self {
            file: issue.file.to_string(),
            line: issue.range.start_line,
            severity: issue.severity,
            message: issue.message,
        }
    }
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let summary = &self.summary;
        writeln!(w, "Report: {}", summary.report_path.bold())?;

        if summary.outcome == RunOutcome::ReportMissing {
            writeln!(w, "{}", "Report not found, nothing to do.".yellow())?;
            return Ok(());
        }

        let metrics = &summary.metrics;
        writeln!(
            w,
            "Dependencies: {} ({} vulnerable)",
            metrics.total_dependencies, metrics.vulnerable_dependencies
        )?;

        let vuln_str = format!(
            "{} total (C:{} M:{} m:{})",
            metrics.vulnerability_count,
            metrics.critical_issues,
            metrics.major_issues,
            metrics.minor_issues
        );
        if metrics.vulnerability_count > 0 {
            writeln!(w, "Vulnerabilities: {}", vuln_str.red().bold())?;
        } else {
            writeln!(w, "Vulnerabilities: {}", vuln_str.green().bold())?;
        }
        writeln!(
            w,
            "Inherited risk score: {}  Vulnerable component ratio: {:.2}",
            metrics.inherited_risk_score, metrics.vulnerable_component_ratio
        )?;
        match self.html_report_bytes {
            Some(bytes) => writeln!(w, "HTML report: attached ({} bytes)", bytes)?,
            None => writeln!(w, "HTML report: {}", "not attached".dimmed())?,
        }

        for warning in &summary.warnings {
            writeln!(w, "{} {}", "warning:".yellow().bold(), warning)?;
        }

        writeln!(w)?;

        if self.issues.is_empty() {
            writeln!(w, "{}", "No vulnerable dependencies found.".green())?;
        } else {
            writeln!(w, "{:<10} {:<32} {:<6} Message", "Severity", "File", "Line")?;
            writeln!(w, "{}", "-".repeat(80))?;

            for issue in &self.issues {
                let label = issue.severity.as_label();
                let severity_colored = match issue.severity {
                    Severity::Critical => label.red().bold(),
                    Severity::Major => label.yellow(),
                    Severity::Minor => label.normal(),
                };
                writeln!(
                    w,
                    "{:<10} {:<32} {:<6} {}",
                    severity_colored, issue.file, issue.line, issue.message
                )?;
            }
        }

        Ok(())
    }
}
