//! 리포트 센서 설정
//!
//! [`ReportScannerConfig`]는 core의 [`ReportConfig`](depcheck_core::config::ReportConfig)를
//! 센서가 바로 쓸 수 있는 형태로 옮긴 것입니다. 빈 HTML 경로는 `None`이 됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use depcheck_report::ReportScannerConfigBuilder;
//!
//! let config = ReportScannerConfigBuilder::new()
//!     .base_dir("/work/project")
//!     .report_path("target/dependency-check-report.json")
//!     .html_report_path(None::<String>)
//!     .build()
//!     .unwrap();
//! assert!(config.html_report_path.is_none());
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportScannerError;

/// 설정 상한값 상수
const MAX_REPORT_SIZE_LIMIT: usize = 512 * 1024 * 1024; // 512 MB
const MAX_PATH_LEN: usize = 4096;

/// 리포트 센서 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportScannerConfig {
    /// 상대 경로 해석 기준 디렉토리
    pub base_dir: PathBuf,
    /// Dependency-Check 리포트 경로
    pub report_path: String,
    /// 함께 전달할 HTML 리포트 경로. `None`이면 전달하지 않음
    pub html_report_path: Option<String>,
    /// Critical 임계값
    pub severity_critical: f64,
    /// Major 임계값
    pub severity_major: f64,
    /// 리포트 최대 허용 크기 (바이트). HTML 리포트에도 적용
    pub max_report_size: usize,
}

impl Default for ReportScannerConfig {
    fn default() -> Self {
        Self::from_core(&depcheck_core::config::ReportConfig::default())
    }
}

impl ReportScannerConfig {
    /// core의 `ReportConfig`에서 센서 설정을 생성합니다.
    pub fn from_core(core: &depcheck_core::config::ReportConfig) -> Self {
        let html_report_path = Some(core.html_report_path.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        Self {
            base_dir: PathBuf::from(&core.base_dir),
            report_path: core.report_path.clone(),
            html_report_path,
            severity_critical: core.severity_critical,
            severity_major: core.severity_major,
            max_report_size: core.max_report_size,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - 임계값: 유한한 0.0-10.0 (뒤집힌 순서는 허용, 실행 시 경고)
    /// - `report_path`: 비어 있으면 안 됨
    /// - 리포트/HTML 경로: 4096자 이하 (`..` 허용)
    /// - `max_report_size`: 1-536870912 (512MB)
    pub fn validate(&self) -> Result<(), ReportScannerError> {
        validate_threshold("severity_critical", self.severity_critical)?;
        validate_threshold("severity_major", self.severity_major)?;

        if self.report_path.trim().is_empty() {
            return Err(ReportScannerError::Config {
                field: "report_path".to_owned(),
                reason: "report path must not be empty".to_owned(),
            });
        }
        validate_path("report_path", &self.report_path)?;

        if let Some(html) = &self.html_report_path {
            validate_path("html_report_path", html)?;
        }

        if self.max_report_size == 0 || self.max_report_size > MAX_REPORT_SIZE_LIMIT {
            return Err(ReportScannerError::Config {
                field: "max_report_size".to_owned(),
                reason: format!("must be 1-{MAX_REPORT_SIZE_LIMIT}"),
            });
        }

        Ok(())
    }

    /// 리포트 파일의 실제 경로 (상대 경로면 `base_dir` 기준)
    pub fn resolved_report_path(&self) -> PathBuf {
        self.resolve(&self.report_path)
    }

    /// HTML 리포트의 실제 경로
    pub fn resolved_html_report_path(&self) -> Option<PathBuf> {
        self.html_report_path.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn validate_threshold(field: &str, value: f64) -> Result<(), ReportScannerError> {
    if !value.is_finite() || !(0.0..=10.0).contains(&value) {
        return Err(ReportScannerError::Config {
            field: field.to_owned(),
            reason: format!("must be a finite score in 0.0-10.0, got {value}"),
        });
    }
    Ok(())
}

fn validate_path(field: &str, path: &str) -> Result<(), ReportScannerError> {
    if path.len() > MAX_PATH_LEN {
        return Err(ReportScannerError::Config {
            field: field.to_owned(),
            reason: format!("path exceeds maximum length {MAX_PATH_LEN}"),
        });
    }
    Ok(())
}

/// 리포트 센서 설정 빌더
#[derive(Debug, Default)]
pub struct ReportScannerConfigBuilder {
    config: ReportScannerConfig,
}

impl ReportScannerConfigBuilder {
    /// 기본값으로 시작하는 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기준 디렉토리를 설정합니다.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = dir.into();
        self
    }

    /// 리포트 경로를 설정합니다.
    pub fn report_path(mut self, path: impl Into<String>) -> Self {
        self.config.report_path = path.into();
        self
    }

    /// HTML 리포트 경로를 설정합니다. `None`이면 전달하지 않습니다.
    pub fn html_report_path(mut self, path: Option<impl Into<String>>) -> Self {
        self.config.html_report_path = path.map(Into::into);
        self
    }

    /// Critical 임계값을 설정합니다.
    pub fn severity_critical(mut self, score: f64) -> Self {
        self.config.severity_critical = score;
        self
    }

    /// Major 임계값을 설정합니다.
    pub fn severity_major(mut self, score: f64) -> Self {
        self.config.severity_major = score;
        self
    }

    /// 리포트 최대 크기를 설정합니다.
    pub fn max_report_size(mut self, bytes: usize) -> Self {
        self.config.max_report_size = bytes;
        self
    }

    /// 설정을 검증하고 반환합니다.
    pub fn build(self) -> Result<ReportScannerConfig, ReportScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
