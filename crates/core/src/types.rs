//! 도메인 타입 -- 워크스페이스 전역에서 사용되는 공통 타입
//!
//! 이슈, 측정값, 심각도 등 리포트 처리 결과를 외부 싱크로 전달할 때
//! 사용하는 데이터 구조를 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 이슈 심각도
///
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Minor < Major < Critical`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// 낮은 심각도
    Minor,
    /// 중간 심각도
    Major,
    /// 치명적 -- 즉시 대응 필요
    Critical,
}

impl Severity {
    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minor" | "low" => Some(Self::Minor),
            "major" | "medium" | "med" => Some(Self::Major),
            "critical" | "crit" | "high" => Some(Self::Critical),
            _ => None,
        }
    }

    /// 메트릭 레이블에 쓰는 소문자 이름을 반환합니다.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "MINOR"),
            Self::Major => write!(f, "MAJOR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// 소스 인덱스가 돌려주는 파일 식별자
///
/// 호스트 환경이 파일을 구분하는 키입니다. 이 크레이트는 내용을 해석하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FileId {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for FileId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 파일 내 줄 범위 (1부터 시작, 양 끝 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    /// 시작 줄
    pub start_line: u32,
    /// 끝 줄
    pub end_line: u32,
}

impl TextRange {
    /// 한 줄 전체를 가리키는 범위를 생성합니다.
    ///
    /// 줄 번호 0은 1로 올려 잡습니다.
    pub fn line(line: u32) -> Self {
        let line = line.max(1);
        Self {
            start_line: line,
            end_line: line,
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "L{}", self.start_line)
        } else {
            write!(f, "L{}-L{}", self.start_line, self.end_line)
        }
    }
}

/// 규칙 키 (저장소 + 규칙 이름)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    /// 규칙 저장소 키
    pub repository: String,
    /// 저장소 내 규칙 키
    pub rule: String,
}

impl RuleKey {
    pub fn new(repository: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.rule)
    }
}

/// 이슈 레코드
///
/// 하나의 취약점 발견 항목이 호스트에 기록되는 형태입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// 규칙 키
    pub rule_key: RuleKey,
    /// 이슈가 걸리는 파일
    pub file: FileId,
    /// 파일 내 위치
    pub range: TextRange,
    /// 이슈 메시지
    pub message: String,
    /// 심각도
    pub severity: Severity,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}:{} {}",
            self.severity, self.file, self.range, self.message,
        )
    }
}

/// 측정 지표 키
///
/// 파일/프로젝트 단위로 기록되는 모든 지표를 나열합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Critical 등급 취약점 수
    HighSeverityVulns,
    /// Major 등급 취약점 수
    MediumSeverityVulns,
    /// Minor 등급 취약점 수
    LowSeverityVulns,
    /// 전체 의존성 수
    TotalDependencies,
    /// 취약한 의존성 수
    VulnerableDependencies,
    /// 전체 취약점 수
    TotalVulnerabilities,
    /// 상속 위험 점수
    InheritedRiskScore,
    /// 취약 컴포넌트 비율
    VulnerableComponentRatio,
    /// 렌더링된 HTML 리포트 원문
    Report,
}

impl MetricKey {
    /// 모든 지표 키
    pub const ALL: [MetricKey; 9] = [
        Self::HighSeverityVulns,
        Self::MediumSeverityVulns,
        Self::LowSeverityVulns,
        Self::TotalDependencies,
        Self::VulnerableDependencies,
        Self::TotalVulnerabilities,
        Self::InheritedRiskScore,
        Self::VulnerableComponentRatio,
        Self::Report,
    ];

    /// 호스트에 저장할 때 쓰는 지표 키 문자열을 반환합니다.
    pub fn key(&self) -> &'static str {
        match self {
            Self::HighSeverityVulns => "high_severity_vulns",
            Self::MediumSeverityVulns => "medium_severity_vulns",
            Self::LowSeverityVulns => "low_severity_vulns",
            Self::TotalDependencies => "total_dependencies",
            Self::VulnerableDependencies => "vulnerable_dependencies",
            Self::TotalVulnerabilities => "total_vulnerabilities",
            Self::InheritedRiskScore => "inherited_risk_score",
            Self::VulnerableComponentRatio => "vulnerable_component_ratio",
            Self::Report => "report",
        }
    }

    /// 사람이 읽는 지표 이름을 반환합니다.
    pub fn title(&self) -> &'static str {
        match self {
            Self::HighSeverityVulns => "High Severity Vulnerabilities",
            Self::MediumSeverityVulns => "Medium Severity Vulnerabilities",
            Self::LowSeverityVulns => "Low Severity Vulnerabilities",
            Self::TotalDependencies => "Total Dependencies",
            Self::VulnerableDependencies => "Vulnerable Dependencies",
            Self::TotalVulnerabilities => "Total Vulnerabilities",
            Self::InheritedRiskScore => "Inherited Risk Score",
            Self::VulnerableComponentRatio => "Vulnerable Component Ratio",
            Self::Report => "Dependency-Check Report",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 측정값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasureValue {
    /// 정수 카운터
    Int(u64),
    /// 실수 점수/비율
    Float(f64),
    /// 원문 텍스트
    Text(String),
}

impl fmt::Display for MeasureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// 측정값이 걸리는 범위
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureScope {
    /// 프로젝트 전체
    Project,
    /// 개별 파일
    File(FileId),
}

/// 측정 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// 지표 키
    pub metric: MetricKey,
    /// 범위
    pub scope: MeasureScope,
    /// 값
    pub value: MeasureValue,
}

impl Measure {
    /// 프로젝트 범위 측정값을 생성합니다.
    pub fn on_project(metric: MetricKey, value: MeasureValue) -> Self {
        Self {
            metric,
            scope: MeasureScope::Project,
            value,
        }
    }

    /// 파일 범위 측정값을 생성합니다.
    pub fn on_file(file: FileId, metric: MetricKey, value: MeasureValue) -> Self {
        Self {
            metric,
            scope: MeasureScope::File(file),
            value,
        }
    }
}
