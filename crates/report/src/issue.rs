//! 취약점 → 이슈 변환
//!
//! 취약점 하나는 이슈 하나가 됩니다. 이슈는 리포트 파일 자체에 걸리며,
//! 위치는 리포트 안에서 취약점이 시작되는 줄입니다 (알 수 없으면 1행).

use depcheck_core::types::{FileId, Issue, RuleKey, TextRange};

use crate::severity::SeverityClassifier;
use crate::types::{Dependency, Vulnerability};

/// 규칙 저장소 키
pub const REPOSITORY_KEY: &str = "OWASP";

/// 규칙 키
pub const RULE_KEY: &str = "UsingComponentWithKnownVulnerability";

/// 메시지 필드 구분자
const FIELD_SEPARATOR: &str = " | ";

/// 모든 이슈가 공유하는 규칙 키
pub fn rule_key() -> RuleKey {
    RuleKey::new(REPOSITORY_KEY, RULE_KEY)
}

/// 이슈 메시지를 만듭니다.
///
/// `Filename: .. | Reference: .. | CVSS Score: .. | [Category: .. | ]<description>`
///
/// `Category`는 CWE가 있을 때만 들어갑니다.
pub fn format_message(dependency: &Dependency, vulnerability: &Vulnerability) -> String {
    let mut message = String::with_capacity(128 + vulnerability.description.len());
    message.push_str("Filename: ");
    message.push_str(&dependency.file_name);
    message.push_str(FIELD_SEPARATOR);
    message.push_str("Reference: ");
    message.push_str(&vulnerability.name);
    message.push_str(FIELD_SEPARATOR);
    message.push_str("CVSS Score: ");
    message.push_str(&format_score(vulnerability.cvss_score));
    message.push_str(FIELD_SEPARATOR);
    if let Some(cwe) = vulnerability.cwe.as_deref().filter(|c| !c.trim().is_empty()) {
        message.push_str("Category: ");
        message.push_str(cwe);
        message.push_str(FIELD_SEPARATOR);
    }
    message.push_str(&vulnerability.description);
    message
}

/// 점수를 최소 소수점 한 자리로 표기합니다 (`10` → `10.0`, `7.5` → `7.5`).
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}

/// 리포트 파일에 이슈를 거는 생성기
#[derive(Debug, Clone)]
pub struct IssueGenerator {
    classifier: SeverityClassifier,
    report_file: FileId,
    rule_key: RuleKey,
}

impl IssueGenerator {
    pub fn new(classifier: SeverityClassifier, report_file: FileId) -> Self {
        Self {
            classifier,
            report_file,
            rule_key: rule_key(),
        }
    }

    /// 취약점 하나에 대한 이슈를 만듭니다.
    pub fn issue_for(&self, dependency: &Dependency, vulnerability: &Vulnerability) -> Issue {
        let line = vulnerability.report_line.map_or(1, |l| l.get());
        Issue {
            rule_key: self.rule_key.clone(),
            file: self.report_file.clone(),
            range: TextRange::line(line),
            message: format_message(dependency, vulnerability),
            severity: self.classifier.classify(vulnerability.cvss_score),
        }
    }

    /// 의존성의 모든 취약점에 대한 이슈를 리포트 순서대로 만듭니다.
    pub fn issues_for<'a>(&'a self, dependency: &'a Dependency) -> impl Iterator<Item = Issue> + 'a {
        dependency
            .vulnerabilities
            .iter()
            .map(move |v| self.issue_for(dependency, v))
    }
}
