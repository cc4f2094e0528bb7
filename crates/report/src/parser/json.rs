//! JSON 리포트 디코더
//!
//! `serde`로 느슨한 원시 구조체에 먼저 역직렬화한 뒤,
//! 스키마 세대에 맞춰 도메인 타입으로 옮깁니다.
//!
//! 최상위에 `reportSchema`가 있으면 Modern, 없으면 Legacy로 봅니다.
//! 의존성 목록은 최상위 `dependencies` 또는 `analysis.dependencies`에 올 수 있습니다.
//! 알 수 없는 필드는 무시합니다.

use serde::Deserialize;

use super::{ReportDecoder, check_score, log_schema, non_blank, parse_score};
use crate::error::ReportScannerError;
use crate::types::{Analysis, Dependency, ReportFormat, SchemaVersion, Vulnerability};

/// JSON 리포트 디코더
pub struct JsonReportDecoder;

impl ReportDecoder for JsonReportDecoder {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn decode(&self, content: &str, source_path: &str) -> Result<Analysis, ReportScannerError> {
        let raw: RawReport =
            serde_json::from_str(content).map_err(|e| ReportScannerError::Json {
                path: source_path.to_owned(),
                source: e,
            })?;

        let schema = if raw.report_schema.is_some() {
            SchemaVersion::Modern
        } else {
            SchemaVersion::Legacy
        };
        log_schema(source_path, ReportFormat::Json, schema);

        let raw_dependencies = raw
            .dependencies
            .or_else(|| raw.analysis.and_then(|a| a.dependencies))
            .unwrap_or_default();

        let dependencies = raw_dependencies
            .into_iter()
            .map(|d| convert_dependency(d, schema, source_path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analysis {
            format: ReportFormat::Json,
            schema,
            dependencies,
        })
    }
}

// --- 원시 구조 ---

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(rename = "reportSchema")]
    report_schema: Option<String>,
    dependencies: Option<Vec<RawDependency>>,
    analysis: Option<RawAnalysis>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    dependencies: Option<Vec<RawDependency>>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    #[serde(rename = "fileName")]
    file_name: Option<String>,
    #[serde(rename = "filePath")]
    file_path: Option<String>,
    vulnerabilities: Option<Vec<RawVulnerability>>,
}

#[derive(Debug, Deserialize)]
struct RawVulnerability {
    name: Option<String>,
    #[serde(rename = "cvssScore")]
    cvss_score: Option<RawScore>,
    #[serde(alias = "cvssV2")]
    cvssv2: Option<RawCvssV2>,
    #[serde(alias = "cvssV3")]
    cvssv3: Option<RawCvssV3>,
    cwe: Option<String>,
    cwes: Option<RawCwes>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCvssV2 {
    score: Option<RawScore>,
}

#[derive(Debug, Deserialize)]
struct RawCvssV3 {
    #[serde(rename = "baseScore")]
    base_score: Option<RawScore>,
}

/// 숫자 또는 숫자 문자열로 기록된 점수
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

/// CWE 목록 또는 단일 문자열
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCwes {
    List(Vec<String>),
    Single(String),
}

impl RawCwes {
    fn first_non_blank(&self) -> Option<String> {
        match self {
            Self::List(items) => items.iter().find_map(|c| non_blank(Some(c.as_str()))),
            Self::Single(item) => non_blank(Some(item.as_str())),
        }
    }
}

fn convert_dependency(
    raw: RawDependency,
    schema: SchemaVersion,
    source_path: &str,
) -> Result<Dependency, ReportScannerError> {
    let file_name = non_blank(raw.file_name.as_deref()).ok_or_else(|| {
        ReportScannerError::schema(source_path, "dependency: missing fileName")
    })?;
    let file_path = non_blank(raw.file_path.as_deref()).ok_or_else(|| {
        ReportScannerError::schema(source_path, format!("{file_name}: missing filePath"))
    })?;

    let vulnerabilities = raw
        .vulnerabilities
        .unwrap_or_default()
        .into_iter()
        .map(|v| convert_vulnerability(v, schema, source_path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dependency {
        file_name,
        file_path,
        vulnerabilities,
    })
}

fn convert_vulnerability(
    raw: RawVulnerability,
    schema: SchemaVersion,
    source_path: &str,
) -> Result<Vulnerability, ReportScannerError> {
    let name = non_blank(raw.name.as_deref()).ok_or_else(|| {
        ReportScannerError::schema(source_path, "vulnerability: missing name")
    })?;

    let score = match schema {
        SchemaVersion::Legacy => raw.cvss_score.as_ref(),
        SchemaVersion::Modern => raw
            .cvssv3
            .as_ref()
            .and_then(|v3| v3.base_score.as_ref())
            .or_else(|| raw.cvssv2.as_ref().and_then(|v2| v2.score.as_ref()))
            .or(raw.cvss_score.as_ref()),
    };
    let cvss_score = match score {
        Some(RawScore::Number(n)) => check_score(*n, &name, source_path)?,
        Some(RawScore::Text(s)) => parse_score(s, &name, source_path)?,
        None => {
            return Err(ReportScannerError::schema(
                source_path,
                format!("vulnerability '{name}': missing cvss score"),
            ));
        }
    };

    let cwe = match schema {
        SchemaVersion::Legacy => non_blank(raw.cwe.as_deref()),
        SchemaVersion::Modern => raw
            .cwes
            .as_ref()
            .and_then(RawCwes::first_non_blank)
            .or_else(|| non_blank(raw.cwe.as_deref())),
    };

    Ok(Vulnerability {
        name,
        cvss_score,
        cwe,
        description: raw
            .description
            .map(|d| d.trim().to_owned())
            .unwrap_or_default(),
        report_line: None,
    })
}
