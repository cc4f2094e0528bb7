//! 리포트 도메인 타입
//!
//! 디코딩이 끝난 리포트는 형식(XML/JSON)과 스키마 버전에 관계없이
//! 아래 타입으로 표현됩니다. 선택 필드가 없으면 빈 문자열이 아니라 `None`입니다.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// 리포트 직렬화 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// XML 리포트
    Xml,
    /// JSON 리포트
    Json,
}

impl ReportFormat {
    /// 메트릭 레이블 등에 쓰는 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 리포트 스키마 세대
///
/// 세대에 따라 CVSS 점수와 CWE를 읽는 위치가 다릅니다.
///
/// - **Legacy**: 취약점 바로 아래 `cvssScore`, `cwe`
/// - **Modern**: `cvssV3.baseScore` → `cvssV2.score` → `cvssScore`, `cwes` → `cwe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    Legacy,
    Modern,
}

impl SchemaVersion {
    /// Modern 레이아웃이 시작된 XML 스키마 버전 (major, minor)
    pub const MODERN_XML_SCHEMA: (u32, u32) = (1, 6);

    /// XSD 버전 번호에서 스키마 세대를 결정합니다.
    pub fn from_xsd_version(major: u32, minor: u32) -> Self {
        if (major, minor) >= Self::MODERN_XML_SCHEMA {
            Self::Modern
        } else {
            Self::Legacy
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Modern => f.write_str("modern"),
        }
    }
}

/// 디코딩된 리포트 전체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// 원본 형식
    pub format: ReportFormat,
    /// 감지된 스키마 세대
    pub schema: SchemaVersion,
    /// 리포트에 나온 순서 그대로의 의존성 목록
    pub dependencies: Vec<Dependency>,
}

impl Analysis {
    /// 의존성 수
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// 전체 취약점 수
    pub fn vulnerability_count(&self) -> usize {
        self.dependencies.iter().map(|d| d.vulnerabilities.len()).sum()
    }

    /// 취약점이 하나 이상 있는 의존성만 순회합니다.
    pub fn vulnerable_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_vulnerable())
    }
}

/// 분석 대상 의존성 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// 파일 이름 (예: `log4j-core-2.14.1.jar`)
    pub file_name: String,
    /// 리포트에 기록된 파일 경로 (정규화 전)
    pub file_path: String,
    /// 발견된 취약점
    pub vulnerabilities: Vec<Vulnerability>,
}

impl Dependency {
    /// 취약점이 하나 이상 있는지 확인합니다.
    pub fn is_vulnerable(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}

/// 취약점 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// 식별자 (예: `CVE-2021-44228`)
    pub name: String,
    /// CVSS 점수, 0.0 ~ 10.0
    pub cvss_score: f64,
    /// CWE 분류. 없으면 `None`
    pub cwe: Option<String>,
    /// 설명
    pub description: String,
    /// 리포트 안에서 이 취약점이 시작되는 줄 (XML만 제공)
    pub report_line: Option<NonZeroU32>,
}
