//! 리포트 처리 에러 타입
//!
//! [`ReportScannerError`]는 리포트 읽기, 형식 판별, 디코딩, 설정 검증 중
//! 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ReportScannerError> for DepCheckError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **리포트 위치**: `ReportNotFound`
//! - **디코딩**: `UnsupportedFormat`, `Json`, `Xml`, `Schema`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`, `FileTooBig`

use depcheck_core::error::{DepCheckError, ReportError};

/// 리포트 처리 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ReportScannerError {
    /// 리포트 파일이 없음
    ///
    /// 센서는 이 에러를 "아무것도 하지 않는 실행"으로 처리합니다.
    #[error("report not found: {path}")]
    ReportNotFound {
        /// 찾은 경로
        path: String,
    },

    /// XML도 JSON도 아닌 입력
    #[error("unsupported report format: {path}: {reason}")]
    UnsupportedFormat {
        /// 리포트 경로
        path: String,
        /// 판별 실패 사유
        reason: String,
    },

    /// JSON 문법 에러
    #[error("json report parse error: {path}: {source}")]
    Json {
        /// 리포트 경로
        path: String,
        /// 원본 serde_json 에러 (줄/열 포함)
        source: serde_json::Error,
    },

    /// XML 문법 에러
    #[error("xml report parse error: {path}: {source}")]
    Xml {
        /// 리포트 경로
        path: String,
        /// 원본 roxmltree 에러 (줄/열 포함)
        source: roxmltree::Error,
    },

    /// 문법은 맞지만 구조가 리포트 스키마와 다름
    #[error("report schema violation: {path}: {reason}")]
    Schema {
        /// 리포트 경로
        path: String,
        /// 위반 내용
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },
}

impl ReportScannerError {
    /// 리포트 내용을 해석하지 못한 에러인지 확인합니다.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::Json { .. } | Self::Xml { .. } | Self::Schema { .. }
        )
    }

    /// 스키마 위반 에러를 만듭니다.
    pub(crate) fn schema(path: &str, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<ReportScannerError> for DepCheckError {
    fn from(err: ReportScannerError) -> Self {
        match err {
            ReportScannerError::ReportNotFound { path } => {
                DepCheckError::Report(ReportError::NotFound(path))
            }
            e @ (ReportScannerError::UnsupportedFormat { .. }
            | ReportScannerError::Json { .. }
            | ReportScannerError::Xml { .. }
            | ReportScannerError::Schema { .. }) => {
                DepCheckError::Report(ReportError::ParseFailed(e.to_string()))
            }
            e @ (ReportScannerError::Io { .. } | ReportScannerError::FileTooBig { .. }) => {
                DepCheckError::Report(ReportError::ReadFailed(e.to_string()))
            }
            ReportScannerError::Config { field, reason } => {
                DepCheckError::Config(depcheck_core::error::ConfigError::InvalidValue {
                    field,
                    reason,
                })
            }
        }
    }
}
