//! 설정 관리 -- depcheck.toml 파싱 및 런타임 설정
//!
//! [`DepCheckConfig`]는 모든 섹션의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DEPCHECK_REPORT_SEVERITY_CRITICAL=8.0` 형식)
//! 3. 설정 파일 (`depcheck.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), depcheck_core::error::DepCheckError> {
//! use depcheck_core::config::DepCheckConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DepCheckConfig::load("depcheck.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DepCheckConfig::parse("[report]\nseverity_critical = 8.0")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DepCheckError};

/// 리포트 최대 크기 상한 (512 MB)
const MAX_REPORT_SIZE_LIMIT: usize = 512 * 1024 * 1024;

/// CVSS 점수 범위
const CVSS_MIN: f64 = 0.0;
const CVSS_MAX: f64 = 10.0;

/// depcheck 통합 설정
///
/// `depcheck.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepCheckConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 리포트 처리 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl DepCheckConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DepCheckError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에서 시작하는 [`load`](Self::load)입니다.
    ///
    /// 파일이 존재하지만 읽거나 파싱할 수 없으면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DepCheckError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(DepCheckError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    ///
    /// 검증하지 않습니다. 오버라이드 적용 후 [`validate`](Self::validate)를 호출하세요.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DepCheckError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DepCheckError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DepCheckError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DepCheckError> {
        toml::from_str(toml_str).map_err(|e| {
            DepCheckError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DEPCHECK_{SECTION}_{FIELD}`
    /// 예: `DEPCHECK_REPORT_REPORT_PATH=target/dependency-check-report.json`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "DEPCHECK_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "DEPCHECK_GENERAL_LOG_FORMAT");

        // Report
        override_string(&mut self.report.base_dir, "DEPCHECK_REPORT_BASE_DIR");
        override_string(&mut self.report.report_path, "DEPCHECK_REPORT_REPORT_PATH");
        override_string(
            &mut self.report.html_report_path,
            "DEPCHECK_REPORT_HTML_REPORT_PATH",
        );
        override_f64(
            &mut self.report.severity_critical,
            "DEPCHECK_REPORT_SEVERITY_CRITICAL",
        );
        override_f64(
            &mut self.report.severity_major,
            "DEPCHECK_REPORT_SEVERITY_MAJOR",
        );
        override_usize(
            &mut self.report.max_report_size,
            "DEPCHECK_REPORT_MAX_REPORT_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 임계값 역전(`severity_major > severity_critical`)은 여기서 거부하지 않습니다.
    /// 분류기가 실행 시점에 한 번 경고하고 결정적으로 동작합니다.
    pub fn validate(&self) -> Result<(), DepCheckError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        validate_threshold("report.severity_critical", self.report.severity_critical)?;
        validate_threshold("report.severity_major", self.report.severity_major)?;

        if self.report.report_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.report_path".to_owned(),
                reason: "report path must not be empty".to_owned(),
            }
            .into());
        }

        validate_relative_path("report.report_path", &self.report.report_path)?;
        validate_relative_path("report.html_report_path", &self.report.html_report_path)?;

        if self.report.max_report_size == 0 || self.report.max_report_size > MAX_REPORT_SIZE_LIMIT
        {
            return Err(ConfigError::InvalidValue {
                field: "report.max_report_size".to_owned(),
                reason: format!("must be 1-{MAX_REPORT_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }
}

fn validate_threshold(field: &str, value: f64) -> Result<(), DepCheckError> {
    if !value.is_finite() || !(CVSS_MIN..=CVSS_MAX).contains(&value) {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: format!("must be a CVSS score within {CVSS_MIN}-{CVSS_MAX}"),
        }
        .into());
    }
    Ok(())
}

// `..` 허용 (예: `../target/dependency-check-report.xml`)
fn validate_relative_path(field: &str, path: &str) -> Result<(), DepCheckError> {
    const MAX_PATH_LEN: usize = 4096;
    if path.len() > MAX_PATH_LEN {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: format!("path exceeds maximum length {MAX_PATH_LEN}"),
        }
        .into());
    }

    Ok(())
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 리포트 처리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 프로젝트 기준 디렉토리. 상대 경로는 모두 여기서 해석합니다.
    pub base_dir: String,
    /// Dependency-Check 리포트 경로 (XML 또는 JSON)
    pub report_path: String,
    /// 함께 전달할 HTML 리포트 경로. 빈 문자열이면 전달하지 않습니다.
    pub html_report_path: String,
    /// 이 점수 이상이면 Critical
    pub severity_critical: f64,
    /// 이 점수 이상이면 Major
    pub severity_major: f64,
    /// 리포트 파일 최대 크기 (바이트)
    pub max_report_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_owned(),
            report_path: "dependency-check-report.xml".to_owned(),
            html_report_path: "dependency-check-report.html".to_owned(),
            severity_critical: 7.0,
            severity_major: 4.0,
            max_report_size: 50 * 1024 * 1024, // 50 MB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_f64(target: &mut f64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<f64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
