//! CVSS 점수 → 심각도 분류

use depcheck_core::types::Severity;
use tracing::warn;

/// 두 임계값으로 CVSS 점수를 [`Severity`]로 나누는 분류기
///
/// - `score >= critical` → Critical
/// - `score >= major` → Major
/// - 그 외 → Minor
///
/// 두 경계 모두 포함(inclusive)입니다. `major > critical`인 설정도 허용하며,
/// 이때는 Critical 범위를 먼저 검사하므로 Major가 나오지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityClassifier {
    critical: f64,
    major: f64,
}

impl SeverityClassifier {
    /// 분류기를 생성합니다. 임계값이 뒤집혀 있으면 경고를 한 번 남깁니다.
    pub fn new(critical: f64, major: f64) -> Self {
        let classifier = Self { critical, major };
        if classifier.is_inverted() {
            warn!(
                critical,
                major, "severity thresholds are inverted; scores will never classify as major"
            );
        }
        classifier
    }

    /// Critical 임계값
    pub fn critical(&self) -> f64 {
        self.critical
    }

    /// Major 임계값
    pub fn major(&self) -> f64 {
        self.major
    }

    /// Major 임계값이 Critical보다 큰지 확인합니다.
    pub fn is_inverted(&self) -> bool {
        self.major > self.critical
    }

    /// 점수를 분류합니다.
    pub fn classify(&self, score: f64) -> Severity {
        if score >= self.critical {
            Severity::Critical
        } else if score >= self.major {
            Severity::Major
        } else {
            Severity::Minor
        }
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self {
            critical: 7.0,
            major: 4.0,
        }
    }
}
