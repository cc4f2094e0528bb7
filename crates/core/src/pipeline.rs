//! 협력자 trait -- 호스트 환경과의 경계 정의
//!
//! 리포트 처리 코어는 호스트 런타임에 직접 의존하지 않고
//! 아래 세 가지 좁은 인터페이스에만 의존합니다.
//!
//! - [`SourceIndex`]: 경로 → 파일 식별자 조회
//! - [`MeasureSink`]: 측정값 기록
//! - [`IssueSink`]: 이슈 기록
//!
//! [`MemorySink`]는 두 싱크를 메모리에 모아 두는 기본 구현으로,
//! CLI 출력과 테스트 대역으로 사용됩니다.

use std::collections::HashMap;

use crate::types::{FileId, Issue, Measure, MeasureScope, MeasureValue, MetricKey};

/// 경로를 호스트가 알고 있는 파일 식별자로 바꾸는 조회 trait
///
/// 조회 실패(`None`)는 에러가 아닙니다. 호출자가 해당 항목을 건너뜁니다.
pub trait SourceIndex: Send + Sync {
    /// 정규화된 경로에 해당하는 파일을 찾습니다.
    fn resolve(&self, path: &str) -> Option<FileId>;
}

/// 측정값을 기록하는 trait
pub trait MeasureSink {
    fn save_measure(&mut self, measure: Measure);
}

/// 이슈를 기록하는 trait
pub trait IssueSink {
    fn save_issue(&mut self, issue: Issue);
}

impl SourceIndex for HashMap<String, FileId> {
    fn resolve(&self, path: &str) -> Option<FileId> {
        self.get(path).cloned()
    }
}

/// 이슈와 측정값을 기록 순서대로 보관하는 메모리 싱크
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    issues: Vec<Issue>,
    measures: Vec<Measure>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록된 이슈 목록
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// 기록된 측정값 목록
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// 아무것도 기록되지 않았는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.measures.is_empty()
    }

    /// 프로젝트 범위 측정값을 조회합니다 (같은 키가 여러 번이면 마지막 값).
    pub fn project_measure(&self, metric: MetricKey) -> Option<&MeasureValue> {
        self.measures
            .iter()
            .rev()
            .find(|m| m.metric == metric && m.scope == MeasureScope::Project)
            .map(|m| &m.value)
    }

    /// 특정 파일에 기록된 측정값을 모두 반환합니다.
    pub fn file_measures<'a>(&'a self, file: &'a FileId) -> impl Iterator<Item = &'a Measure> {
        self.measures
            .iter()
            .filter(move |m| matches!(&m.scope, MeasureScope::File(f) if f == file))
    }

    /// 싱크를 분해하여 (이슈, 측정값)을 돌려줍니다.
    pub fn into_parts(self) -> (Vec<Issue>, Vec<Measure>) {
        (self.issues, self.measures)
    }
}

impl MeasureSink for MemorySink {
    fn save_measure(&mut self, measure: Measure) {
        self.measures.push(measure);
    }
}

impl IssueSink for MemorySink {
    fn save_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }
}
