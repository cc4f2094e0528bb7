//! 메트릭 상수 및 설명 등록
//!
//! 실행 텔레메트리 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 리포트 크레이트는 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다. 익스포터 설치는 호스트의 몫입니다.
//!
//! 호스트에 저장되는 도메인 측정값([`MetricKey`](crate::types::MetricKey))과는
//! 별개입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `depcheck_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 심각도 레이블 키 (minor, major, critical)
pub const LABEL_SEVERITY: &str = "severity";

/// 리포트 형식 레이블 키 (xml, json)
pub const LABEL_FORMAT: &str = "format";

/// 결과 레이블 키 (success, skipped, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Report 메트릭 ─────────────────────────────────────────────────

/// Report: 실행 횟수 (counter, label: result)
pub const REPORT_RUNS_TOTAL: &str = "depcheck_report_runs_total";

/// Report: 생성된 이슈 수 (counter, label: severity)
pub const REPORT_ISSUES_TOTAL: &str = "depcheck_report_issues_total";

/// Report: 소스 인덱스 조회 실패 수 (counter)
pub const REPORT_LOOKUP_MISSES_TOTAL: &str = "depcheck_report_lookup_misses_total";

/// Report: 리포트 파싱 실패 수 (counter, label: format)
pub const REPORT_PARSE_ERRORS_TOTAL: &str = "depcheck_report_parse_errors_total";

/// Report: 실행 소요 시간 (histogram, 초)
pub const REPORT_RUN_DURATION_SECONDS: &str = "depcheck_report_run_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번 호출합니다. 레코더가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        REPORT_RUNS_TOTAL,
        "Total number of report processing runs by result"
    );
    describe_counter!(
        REPORT_ISSUES_TOTAL,
        "Total number of issues emitted by severity level"
    );
    describe_counter!(
        REPORT_LOOKUP_MISSES_TOTAL,
        "Total number of dependency paths that did not resolve against the source index"
    );
    describe_counter!(
        REPORT_PARSE_ERRORS_TOTAL,
        "Total number of reports that failed to decode"
    );
    describe_histogram!(
        REPORT_RUN_DURATION_SECONDS,
        "Time to process a single report in seconds"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METRIC_NAMES: &[&str] = &[
        REPORT_RUNS_TOTAL,
        REPORT_ISSUES_TOTAL,
        REPORT_LOOKUP_MISSES_TOTAL,
        REPORT_PARSE_ERRORS_TOTAL,
        REPORT_RUN_DURATION_SECONDS,
    ];

    #[test]
    fn all_metrics_start_with_depcheck_prefix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.starts_with("depcheck_"),
                "Metric '{}' does not start with 'depcheck_' prefix",
                name
            );
        }
    }

    #[test]
    fn describe_all_does_not_panic() {
        describe_all();
    }

    #[test]
    fn label_keys_are_lowercase() {
        for label in [LABEL_SEVERITY, LABEL_FORMAT, LABEL_RESULT] {
            assert_eq!(label.to_lowercase(), label);
        }
    }
}
