#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, DepCheckError, ReportError};

// 설정
pub use config::DepCheckConfig;

// 협력자 trait
pub use pipeline::{IssueSink, MeasureSink, MemorySink, SourceIndex};

// 도메인 타입
pub use types::{
    FileId, Issue, Measure, MeasureScope, MeasureValue, MetricKey, RuleKey, Severity, TextRange,
};
