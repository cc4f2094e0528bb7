//! 위험 지표 집계
//!
//! [`MetricsAccumulator`]는 한 번의 실행 동안 카운터를 모으고,
//! 실행이 끝나면 [`MetricsSummary`]로 확정되어 파생 점수와 함께 기록됩니다.

use serde::Serialize;

use depcheck_core::pipeline::MeasureSink;
use depcheck_core::types::{FileId, Measure, MeasureValue, MetricKey, Severity};

/// Critical 이슈 하나의 위험 가중치
pub const CRITICAL_WEIGHT: u64 = 10;
/// Major 이슈 하나의 위험 가중치
pub const MAJOR_WEIGHT: u64 = 5;
/// Minor 이슈 하나의 위험 가중치
pub const MINOR_WEIGHT: u64 = 1;

/// 심각도별 이슈 수에 가중치를 곱해 합산합니다.
pub fn inherited_risk_score(critical: u64, major: u64, minor: u64) -> u64 {
    critical * CRITICAL_WEIGHT + major * MAJOR_WEIGHT + minor * MINOR_WEIGHT
}

/// 취약 컴포넌트 비율 (`vulnerable_components / vulnerabilities`)
///
/// 취약점이 없으면 0.0입니다.
pub fn vulnerable_component_ratio(vulnerabilities: u64, vulnerable_components: u64) -> f64 {
    if vulnerabilities == 0 {
        0.0
    } else {
        vulnerable_components as f64 / vulnerabilities as f64
    }
}

/// 실행 중 카운터 누적기
///
/// 모든 카운터는 증가만 합니다. 실행마다 새로 만듭니다.
#[derive(Debug, Clone, Default)]
pub struct MetricsAccumulator {
    critical_issues: u64,
    major_issues: u64,
    minor_issues: u64,
    total_dependencies: u64,
    vulnerable_dependencies: u64,
    vulnerability_count: u64,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 리포트에 있는 의존성 수를 더합니다.
    pub fn add_dependencies(&mut self, count: usize) {
        self.total_dependencies += count as u64;
    }

    /// 취약점이 있는 의존성 하나를 기록합니다.
    pub fn record_vulnerable_dependency(&mut self) {
        self.vulnerable_dependencies += 1;
    }

    /// 생성된 이슈 하나를 기록합니다.
    pub fn record_issue(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical_issues += 1,
            Severity::Major => self.major_issues += 1,
            Severity::Minor => self.minor_issues += 1,
        }
        self.vulnerability_count += 1;
    }

    /// 카운터를 확정하고 파생 점수를 계산합니다.
    pub fn finish(self) -> MetricsSummary {
        MetricsSummary {
            critical_issues: self.critical_issues,
            major_issues: self.major_issues,
            minor_issues: self.minor_issues,
            total_dependencies: self.total_dependencies,
            vulnerable_dependencies: self.vulnerable_dependencies,
            vulnerability_count: self.vulnerability_count,
            inherited_risk_score: inherited_risk_score(
                self.critical_issues,
                self.major_issues,
                self.minor_issues,
            ),
            vulnerable_component_ratio: vulnerable_component_ratio(
                self.vulnerability_count,
                self.vulnerable_dependencies,
            ),
        }
    }
}

/// 실행 결과 지표
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsSummary {
    pub critical_issues: u64,
    pub major_issues: u64,
    pub minor_issues: u64,
    pub total_dependencies: u64,
    pub vulnerable_dependencies: u64,
    pub vulnerability_count: u64,
    pub inherited_risk_score: u64,
    pub vulnerable_component_ratio: f64,
}

impl MetricsSummary {
    /// 프로젝트 범위 측정값 8개를 고정된 순서로 만듭니다.
    pub fn project_measures(&self) -> Vec<Measure> {
        [
            (MetricKey::HighSeverityVulns, MeasureValue::Int(self.critical_issues)),
            (MetricKey::MediumSeverityVulns, MeasureValue::Int(self.major_issues)),
            (MetricKey::LowSeverityVulns, MeasureValue::Int(self.minor_issues)),
            (MetricKey::TotalDependencies, MeasureValue::Int(self.total_dependencies)),
            (
                MetricKey::VulnerableDependencies,
                MeasureValue::Int(self.vulnerable_dependencies),
            ),
            (
                MetricKey::TotalVulnerabilities,
                MeasureValue::Int(self.vulnerability_count),
            ),
            (
                MetricKey::InheritedRiskScore,
                MeasureValue::Int(self.inherited_risk_score),
            ),
            (
                MetricKey::VulnerableComponentRatio,
                MeasureValue::Float(self.vulnerable_component_ratio),
            ),
        ]
        .into_iter()
        .map(|(metric, value)| Measure::on_project(metric, value))
        .collect()
    }
}

/// 의존성 파일 하나에 대한 측정값을 기록합니다.
pub fn record_file_measures<S>(sink: &mut S, file: &FileId, vulnerabilities: usize)
where
    S: MeasureSink + ?Sized,
{
    let count = MeasureValue::Int(vulnerabilities as u64);
    if vulnerabilities > 0 {
        sink.save_measure(Measure::on_file(
            file.clone(),
            MetricKey::VulnerableDependencies,
            count.clone(),
        ));
    }
    sink.save_measure(Measure::on_file(
        file.clone(),
        MetricKey::TotalVulnerabilities,
        count.clone(),
    ));
    // NOTE: 파일 단위 total_dependencies 값은 의존성 수가 아니라 취약점 수 (기존 동작 유지)
    sink.save_measure(Measure::on_file(
        file.clone(),
        MetricKey::TotalDependencies,
        count,
    ));
}

#[cfg(test)]
mod tests {
    use depcheck_core::pipeline::MemorySink;

    use super::*;

    #[test]
    fn risk_score_uses_weights() {
        assert_eq!(inherited_risk_score(0, 0, 0), 0);
        assert_eq!(inherited_risk_score(1, 1, 0), 15);
        assert_eq!(inherited_risk_score(2, 3, 4), 20 + 15 + 4);
    }

    #[test]
    fn ratio_guards_zero_vulnerabilities() {
        assert_eq!(vulnerable_component_ratio(0, 0), 0.0);
        assert_eq!(vulnerable_component_ratio(2, 1), 0.5);
        assert_eq!(vulnerable_component_ratio(4, 4), 1.0);
    }

    #[test]
    fn accumulator_counts_by_severity() {
        let mut acc = MetricsAccumulator::new();
        acc.add_dependencies(2);
        acc.record_vulnerable_dependency();
        acc.record_issue(Severity::Critical);
        acc.record_issue(Severity::Major);

        let summary = acc.finish();
        assert_eq!(summary.total_dependencies, 2);
        assert_eq!(summary.vulnerable_dependencies, 1);
        assert_eq!(summary.vulnerability_count, 2);
        assert_eq!(summary.critical_issues, 1);
        assert_eq!(summary.major_issues, 1);
        assert_eq!(summary.minor_issues, 0);
        assert_eq!(summary.inherited_risk_score, 15);
        assert_eq!(summary.vulnerable_component_ratio, 0.5);
    }

    #[test]
    fn empty_accumulator_is_all_zero() {
        let summary = MetricsAccumulator::new().finish();
        assert_eq!(summary, MetricsSummary::default());
    }

    #[test]
    fn project_measures_cover_all_numeric_keys() {
        let measures = MetricsSummary::default().project_measures();
        assert_eq!(measures.len(), 8);
        let keys: Vec<_> = measures.iter().map(|m| m.metric).collect();
        for key in MetricKey::ALL.iter().filter(|k| **k != MetricKey::Report) {
            assert!(keys.contains(key), "missing {key}");
        }
    }

    #[test]
    fn file_measures_for_vulnerable_file() {
        let mut sink = MemorySink::new();
        let file = FileId::new("lib/a.jar");
        record_file_measures(&mut sink, &file, 3);

        let measures: Vec<_> = sink.file_measures(&file).collect();
        assert_eq!(measures.len(), 3);
        assert!(
            measures
                .iter()
                .all(|m| m.value == MeasureValue::Int(3))
        );
        assert!(
            measures
                .iter()
                .any(|m| m.metric == MetricKey::TotalDependencies)
        );
    }

    #[test]
    fn file_measures_for_clean_file() {
        let mut sink = MemorySink::new();
        let file = FileId::new("lib/clean.jar");
        record_file_measures(&mut sink, &file, 0);

        let metrics: Vec<_> = sink.file_measures(&file).map(|m| m.metric).collect();
        assert_eq!(
            metrics,
            vec![MetricKey::TotalVulnerabilities, MetricKey::TotalDependencies]
        );
    }
}
