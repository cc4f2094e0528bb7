//! 리포트 디코더 -- XML, JSON
//!
//! [`ReportDecoder`] trait은 각 리포트 형식의 디코더가 구현해야 하는 인터페이스입니다.
//! [`ReportParser`]는 입력의 첫 바이트로 형식을 판별하여 알맞은 디코더에 넘깁니다.
//!
//! # 지원 형식
//!
//! - XML (`<`로 시작) -- [`XmlReportDecoder`]
//! - JSON (`{`로 시작) -- [`JsonReportDecoder`]
//!
//! 두 디코더 모두 스키마 세대([`SchemaVersion`])를 감지한 뒤
//! 세대별 위치에서 CVSS 점수와 CWE를 읽습니다.
//!
//! 파싱은 전부 끝난 뒤에야 결과를 돌려줍니다. 중간에 실패하면 부분 결과는 없습니다.

pub mod json;
pub mod xml;

pub use json::JsonReportDecoder;
pub use xml::XmlReportDecoder;

use crate::error::ReportScannerError;
use crate::types::{Analysis, ReportFormat, SchemaVersion};

/// 허용되는 CVSS 점수 범위
const CVSS_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// UTF-8 BOM
const UTF8_BOM: char = '\u{feff}';

/// 리포트 디코더 trait
///
/// 한 가지 직렬화 형식의 리포트를 [`Analysis`]로 디코딩합니다.
pub trait ReportDecoder: Send + Sync {
    /// 이 디코더가 담당하는 형식을 반환합니다.
    fn format(&self) -> ReportFormat;

    /// 리포트 내용을 디코딩합니다.
    ///
    /// # Arguments
    ///
    /// - `content`: 리포트 내용 (UTF-8 문자열, BOM 제거됨)
    /// - `source_path`: 원본 파일 경로 (에러 메시지용)
    fn decode(&self, content: &str, source_path: &str) -> Result<Analysis, ReportScannerError>;
}

/// 리포트 내용의 형식을 판별합니다.
///
/// BOM과 앞쪽 공백을 건너뛴 첫 글자가 `<`이면 XML, `{`이면 JSON입니다.
pub fn detect_format(content: &str) -> Option<ReportFormat> {
    match strip_bom(content).trim_start().chars().next()? {
        '<' => Some(ReportFormat::Xml),
        '{' => Some(ReportFormat::Json),
        _ => None,
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// 형식 판별 + 디코딩 진입점
///
/// 등록된 디코더 중 판별된 형식을 담당하는 것을 골라 실행합니다.
pub struct ReportParser {
    decoders: Vec<Box<dyn ReportDecoder>>,
}

impl ReportParser {
    /// XML, JSON 디코더를 등록한 파서를 생성합니다.
    pub fn new() -> Self {
        Self {
            decoders: vec![Box::new(XmlReportDecoder), Box::new(JsonReportDecoder)],
        }
    }

    /// 원시 바이트를 디코딩합니다.
    ///
    /// UTF-8이 아닌 입력은 [`ReportScannerError::UnsupportedFormat`]입니다.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        source_path: &str,
    ) -> Result<Analysis, ReportScannerError> {
        let content =
            std::str::from_utf8(bytes).map_err(|e| ReportScannerError::UnsupportedFormat {
                path: source_path.to_owned(),
                reason: format!("report is not valid UTF-8: {e}"),
            })?;
        self.parse(content, source_path)
    }

    /// 문자열 리포트를 디코딩합니다.
    pub fn parse(&self, content: &str, source_path: &str) -> Result<Analysis, ReportScannerError> {
        let content = strip_bom(content);
        let format = detect_format(content).ok_or_else(|| ReportScannerError::UnsupportedFormat {
            path: source_path.to_owned(),
            reason: "expected an XML or JSON document".to_owned(),
        })?;

        let decoder = self
            .decoders
            .iter()
            .find(|d| d.format() == format)
            .ok_or_else(|| ReportScannerError::UnsupportedFormat {
                path: source_path.to_owned(),
                reason: format!("no decoder registered for {format}"),
            })?;

        let analysis = decoder.decode(content, source_path)?;
        tracing::debug!(
            path = source_path,
            format = %analysis.format,
            schema = %analysis.schema,
            dependencies = analysis.dependency_count(),
            vulnerabilities = analysis.vulnerability_count(),
            "decoded dependency-check report"
        );
        Ok(analysis)
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

// --- 디코더 공용 헬퍼 ---

/// 공백만 있는 문자열은 값이 없는 것으로 취급합니다.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// 점수 문자열을 해석하고 범위를 검사합니다.
pub(crate) fn parse_score(
    raw: &str,
    vulnerability: &str,
    source_path: &str,
) -> Result<f64, ReportScannerError> {
    let score = raw.trim().parse::<f64>().map_err(|_| {
        ReportScannerError::schema(
            source_path,
            format!("vulnerability '{vulnerability}': cvss score '{raw}' is not a number"),
        )
    })?;
    check_score(score, vulnerability, source_path)
}

/// 점수가 유한하고 0.0 ~ 10.0 범위인지 검사합니다.
pub(crate) fn check_score(
    score: f64,
    vulnerability: &str,
    source_path: &str,
) -> Result<f64, ReportScannerError> {
    if score.is_finite() && CVSS_RANGE.contains(&score) {
        Ok(score)
    } else {
        Err(ReportScannerError::schema(
            source_path,
            format!("vulnerability '{vulnerability}': cvss score {score} is outside 0.0-10.0"),
        ))
    }
}

/// 스키마 세대 감지 결과를 로그로 남깁니다.
pub(crate) fn log_schema(source_path: &str, format: ReportFormat, schema: SchemaVersion) {
    tracing::trace!(path = source_path, %format, %schema, "detected report schema");
}
