#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ReportScannerError`)
//! - [`config`]: Sensor configuration (`ReportScannerConfig`, builder)
//! - [`types`]: Decoded report model (`Analysis`, `Dependency`, `Vulnerability`)
//! - [`parser`]: Report decoders (`ReportDecoder` trait, `XmlReportDecoder`, `JsonReportDecoder`)
//! - [`path`]: Reserved-character path normalization
//! - [`severity`]: CVSS score classification (`SeverityClassifier`)
//! - [`issue`]: Issue generation (`IssueGenerator`, message format)
//! - [`aggregate`]: Risk metrics (`MetricsAccumulator`, `MetricsSummary`)
//! - [`sensor`]: Main orchestrator (`DependencyCheckSensor`, `RunSummary`)

pub mod aggregate;
pub mod config;
pub mod error;
pub mod issue;
pub mod parser;
pub mod path;
pub mod sensor;
pub mod severity;
pub mod types;

// --- Public API Re-exports ---

// Sensor (main orchestrator)
pub use sensor::{DependencyCheckSensor, RunOutcome, RunSummary, RunWarning, SENSOR_NAME};

// Configuration
pub use config::{ReportScannerConfig, ReportScannerConfigBuilder};

// Error
pub use error::ReportScannerError;

// Types
pub use types::{Analysis, Dependency, ReportFormat, SchemaVersion, Vulnerability};

// Parser
pub use parser::{JsonReportDecoder, ReportDecoder, ReportParser, XmlReportDecoder, detect_format};

// Classification, issues, metrics
pub use aggregate::{MetricsAccumulator, MetricsSummary};
pub use issue::{IssueGenerator, format_message};
pub use path::normalize;
pub use severity::SeverityClassifier;
