//! 에러 타입 -- 도메인별 에러 정의

/// depcheck 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum DepCheckError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 리포트 처리 에러
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 리포트 처리 에러
///
/// 리포트 크레이트의 세부 에러가 최상위로 올라올 때 사용하는 요약 형태입니다.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 리포트 파일 없음
    #[error("report not found: {0}")]
    NotFound(String),

    /// 리포트 구조/스키마 위반
    #[error("report parse failed: {0}")]
    ParseFailed(String),

    /// 리포트 읽기 실패
    #[error("report read failed: {0}")]
    ReadFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: DepCheckError = ConfigError::InvalidValue {
            field: "report.severity_major".to_owned(),
            reason: "must be finite".to_owned(),
        }
        .into();
        assert!(matches!(err, DepCheckError::Config(_)));
        assert!(err.to_string().contains("report.severity_major"));
    }

    #[test]
    fn report_error_display() {
        let err = ReportError::ParseFailed("unexpected end of input".to_owned());
        assert!(err.to_string().contains("unexpected end of input"));

        let err: DepCheckError = ReportError::NotFound("report.xml".to_owned()).into();
        assert!(err.to_string().starts_with("report error"));
    }

    #[test]
    fn io_error_converts_to_top_level() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DepCheckError = io.into();
        assert!(matches!(err, DepCheckError::Io(_)));
    }
}
