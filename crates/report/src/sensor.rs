//! Dependency-Check 센서 -- 한 번의 리포트 처리 실행
//!
//! [`DependencyCheckSensor`]는 리포트를 읽어 디코딩한 뒤, 의존성마다 경로를
//! 정규화하여 소스 인덱스에서 찾고, 이슈와 측정값을 싱크에 기록합니다.
//!
//! # 실행 흐름
//!
//! ```text
//! report file --> read (size bound) --> ReportParser --> Analysis
//!                                                          |
//!         for each dependency: normalize --> SourceIndex --+--> file measures
//!                                                          +--> IssueGenerator --> IssueSink
//!                                                          |
//!                                 MetricsAccumulator --> project measures --> MeasureSink
//!                                                          |
//!                                           companion HTML --> `report` measure
//! ```
//!
//! 디코딩이 끝나기 전에는 아무것도 기록하지 않습니다.
//! 리포트 파일이 없으면 아무것도 기록하지 않고 정상 종료합니다.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use depcheck_core::metrics as m;
use depcheck_core::pipeline::{IssueSink, MeasureSink, SourceIndex};
use depcheck_core::types::{Measure, MeasureValue, MetricKey};

use crate::aggregate::{MetricsAccumulator, MetricsSummary, record_file_measures};
use crate::config::ReportScannerConfig;
use crate::error::ReportScannerError;
use crate::issue::IssueGenerator;
use crate::parser::{ReportParser, detect_format};
use crate::path::normalize;
use crate::severity::SeverityClassifier;
use crate::types::Analysis;

/// 센서 이름
pub const SENSOR_NAME: &str = "Dependency-Check";

/// 실행을 멈추지 않는 경고
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// Major 임계값이 Critical보다 큼
    InvertedThresholds { critical: f64, major: f64 },
    /// 리포트 파일 자체를 소스 인덱스에서 찾지 못함
    UnresolvedReportFile { path: String },
    /// 의존성 경로를 소스 인덱스에서 찾지 못함
    UnresolvedDependency { file_name: String, path: String },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedThresholds { critical, major } => write!(
                f,
                "severity thresholds inverted (critical {critical} < major {major})"
            ),
            Self::UnresolvedReportFile { path } => {
                write!(f, "report file '{path}' is not part of the project")
            }
            Self::UnresolvedDependency { file_name, path } => {
                write!(f, "dependency '{file_name}' not found at '{path}'")
            }
        }
    }
}

/// 실행 결과 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// 리포트를 처리함
    Completed,
    /// 리포트 파일이 없어 아무것도 하지 않음
    ReportMissing,
}

/// 한 번의 실행 요약
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// 로그 상관관계용 실행 ID (UUID v4)
    pub run_id: String,
    /// 읽은 리포트 경로
    pub report_path: String,
    /// 실행 결과 구분
    pub outcome: RunOutcome,
    /// 확정된 지표
    pub metrics: MetricsSummary,
    /// 실행 중 발생한 경고
    pub warnings: Vec<RunWarning>,
    /// 기록된 이슈 수
    pub issues_emitted: usize,
    /// 소요 시간
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Dependency-Check 리포트 센서
///
/// 실행마다 새 [`MetricsAccumulator`]를 사용하므로 같은 센서로 여러 번 실행해도
/// 결과가 섞이지 않습니다.
pub struct DependencyCheckSensor {
    config: ReportScannerConfig,
    parser: ReportParser,
}

impl DependencyCheckSensor {
    /// 설정을 검증하고 센서를 생성합니다.
    pub fn new(config: ReportScannerConfig) -> Result<Self, ReportScannerError> {
        config.validate()?;
        Ok(Self {
            config,
            parser: ReportParser::new(),
        })
    }

    /// 센서 이름
    pub fn name(&self) -> &'static str {
        SENSOR_NAME
    }

    /// 센서 설정
    pub fn config(&self) -> &ReportScannerConfig {
        &self.config
    }

    /// 리포트를 읽어 디코딩만 합니다 (기록 없음).
    pub fn load_analysis(&self) -> Result<Analysis, ReportScannerError> {
        let path = self.config.resolved_report_path();
        let display = path.display().to_string();
        let bytes = read_report(&path, self.config.max_report_size)?;

        self.parser.parse_bytes(&bytes, &display).inspect_err(|_| {
            let format = std::str::from_utf8(&bytes)
                .ok()
                .and_then(detect_format)
                .map_or("unknown", |f| f.as_str());
            metrics::counter!(m::REPORT_PARSE_ERRORS_TOTAL, m::LABEL_FORMAT => format)
                .increment(1);
        })
    }

    /// 리포트 하나를 처리합니다.
    ///
    /// - 리포트 없음 → 기록 없이 `RunOutcome::ReportMissing`
    /// - 읽기/디코딩 실패 → 기록 없이 에러
    /// - 조회 실패 → 해당 의존성의 파일 측정값과 이슈만 건너뛰고 경고로 남김
    pub fn execute<S>(
        &self,
        index: &dyn SourceIndex,
        sink: &mut S,
    ) -> Result<RunSummary, ReportScannerError>
    where
        S: IssueSink + MeasureSink + ?Sized,
    {
        let started = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let report_path = self.config.resolved_report_path().display().to_string();
        info!(run_id = %run_id, sensor = SENSOR_NAME, report = %report_path, "processing dependency-check report");

        let mut warnings = Vec::new();
        let classifier =
            SeverityClassifier::new(self.config.severity_critical, self.config.severity_major);
        if classifier.is_inverted() {
            warnings.push(RunWarning::InvertedThresholds {
                critical: classifier.critical(),
                major: classifier.major(),
            });
        }

        let analysis = match self.load_analysis() {
            Ok(analysis) => analysis,
            Err(ReportScannerError::ReportNotFound { path }) => {
                debug!(run_id = %run_id, path = %path, "analysis aborted due to missing report file");
                let elapsed = finish_timer(started, "skipped");
                return Ok(RunSummary {
                    run_id,
                    report_path,
                    outcome: RunOutcome::ReportMissing,
                    metrics: MetricsSummary::default(),
                    warnings,
                    issues_emitted: 0,
                    elapsed,
                });
            }
            Err(e) => {
                warn!(run_id = %run_id, error = %e, "can not process dependency-check report");
                finish_timer(started, "failure");
                return Err(e);
            }
        };

        let mut acc = MetricsAccumulator::new();
        acc.add_dependencies(analysis.dependency_count());

        let mut issues_emitted = 0;
        match index.resolve(&self.config.report_path) {
            Some(report_file) => {
                let generator = IssueGenerator::new(classifier, report_file);
                for dependency in &analysis.dependencies {
                    debug!(
                        file_name = %dependency.file_name,
                        file_path = %dependency.file_path,
                        "processing dependency"
                    );
                    // 조회 실패와 무관하게 프로젝트 카운터에 반영
                    let count = dependency.vulnerabilities.len();
                    if count > 0 {
                        acc.record_vulnerable_dependency();
                    }

                    let lookup = normalize(&dependency.file_path);
                    let Some(file) = index.resolve(&lookup) else {
                        warn!(
                            run_id = %run_id,
                            file_name = %dependency.file_name,
                            path = %lookup,
                            "skipping file measures and issues, file is not part of the project"
                        );
                        metrics::counter!(m::REPORT_LOOKUP_MISSES_TOTAL).increment(1);
                        warnings.push(RunWarning::UnresolvedDependency {
                            file_name: dependency.file_name.clone(),
                            path: lookup,
                        });
                        continue;
                    };

                    record_file_measures(&mut *sink, &file, count);

                    for issue in generator.issues_for(dependency) {
                        acc.record_issue(issue.severity);
                        metrics::counter!(
                            m::REPORT_ISSUES_TOTAL,
                            m::LABEL_SEVERITY => issue.severity.as_label()
                        )
                        .increment(1);
                        sink.save_issue(issue);
                        issues_emitted += 1;
                    }
                }
            }
            None => {
                warn!(
                    run_id = %run_id,
                    path = %self.config.report_path,
                    dependencies = analysis.dependency_count(),
                    "skipping dependencies, no input file could be established for the report"
                );
                warnings.push(RunWarning::UnresolvedReportFile {
                    path: self.config.report_path.clone(),
                });
            }
        }

        let metrics = acc.finish();
        for measure in metrics.project_measures() {
            sink.save_measure(measure);
        }

        if let Some(html) = self.read_html_report() {
            sink.save_measure(Measure::on_project(
                MetricKey::Report,
                MeasureValue::Text(html),
            ));
        }

        let elapsed = finish_timer(started, "success");
        info!(
            run_id = %run_id,
            elapsed_ms = elapsed.as_millis() as u64,
            issues = issues_emitted,
            risk_score = metrics.inherited_risk_score,
            warnings = warnings.len(),
            "dependency-check report processed"
        );

        Ok(RunSummary {
            run_id,
            report_path,
            outcome: RunOutcome::Completed,
            metrics,
            warnings,
            issues_emitted,
            elapsed,
        })
    }

    /// HTML 리포트를 읽습니다. 어떤 실패도 실행을 멈추지 않습니다.
    fn read_html_report(&self) -> Option<String> {
        let path = self.config.resolved_html_report_path()?;
        match read_companion(&path, self.config.max_report_size) {
            Ok(Some(html)) => Some(html),
            Ok(None) => {
                debug!(path = %path.display(), "html report not found, skipping");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read html report, skipping");
                None
            }
        }
    }
}

impl fmt::Display for DependencyCheckSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SENSOR_NAME)
    }
}

fn finish_timer(started: Instant, result: &'static str) -> Duration {
    let elapsed = started.elapsed();
    metrics::counter!(m::REPORT_RUNS_TOTAL, m::LABEL_RESULT => result).increment(1);
    metrics::histogram!(m::REPORT_RUN_DURATION_SECONDS).record(elapsed.as_secs_f64());
    elapsed
}

/// 리포트 파일을 읽습니다 (동기 I/O).
///
/// 파일이 없거나 일반 파일이 아니면 `ReportNotFound`입니다.
fn read_report(path: &Path, max_size: usize) -> Result<Vec<u8>, ReportScannerError> {
    let display = path.display().to_string();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReportScannerError::ReportNotFound { path: display });
        }
        Err(e) => {
            return Err(ReportScannerError::Io {
                path: display,
                source: e,
            });
        }
    };
    if !metadata.is_file() {
        return Err(ReportScannerError::ReportNotFound { path: display });
    }
    check_size(&display, metadata.len(), max_size)?;

    std::fs::read(path).map_err(|e| ReportScannerError::Io {
        path: display,
        source: e,
    })
}

/// HTML 리포트를 파일 길이만큼의 버퍼 하나로 읽습니다.
///
/// 파일이 없으면 `Ok(None)`입니다.
fn read_companion(path: &Path, max_size: usize) -> Result<Option<String>, ReportScannerError> {
    let display = path.display().to_string();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ReportScannerError::Io {
                path: display,
                source: e,
            });
        }
    };
    let len = metadata.len();
    check_size(&display, len, max_size)?;

    let io_err = |e| ReportScannerError::Io {
        path: display.clone(),
        source: e,
    };
    let file = File::open(path).map_err(io_err)?;
    let mut buffer = Vec::with_capacity(usize::try_from(len).unwrap_or(max_size));
    file.take(len).read_to_end(&mut buffer).map_err(io_err)?;
    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}

fn check_size(path: &str, size: u64, max: usize) -> Result<(), ReportScannerError> {
    if size > max as u64 {
        return Err(ReportScannerError::FileTooBig {
            path: path.to_owned(),
            size,
            max,
        });
    }
    Ok(())
}
