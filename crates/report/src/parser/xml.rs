//! XML 리포트 디코더
//!
//! `roxmltree`로 문서 전체를 읽은 뒤 `<analysis>` 트리를 순회합니다.
//! 스키마 세대는 루트 요소의 네임스페이스
//! (`.../dependency-check.<major>.<minor>.xsd`)에서 결정합니다.
//!
//! # 요소 구조
//!
//! ```text
//! analysis
//! └── dependencies
//!     └── dependency
//!         ├── fileName
//!         ├── filePath
//!         └── vulnerabilities
//!             └── vulnerability
//!                 ├── name
//!                 ├── cvssScore | cvssV2/score | cvssV3/baseScore
//!                 ├── cwe | cwes/cwe
//!                 └── description
//! ```

use std::num::NonZeroU32;

use roxmltree::{Document, Node};

use super::{ReportDecoder, log_schema, non_blank, parse_score};
use crate::error::ReportScannerError;
use crate::types::{Analysis, Dependency, ReportFormat, SchemaVersion, Vulnerability};

/// XML 리포트 디코더
pub struct XmlReportDecoder;

impl ReportDecoder for XmlReportDecoder {
    fn format(&self) -> ReportFormat {
        ReportFormat::Xml
    }

    fn decode(&self, content: &str, source_path: &str) -> Result<Analysis, ReportScannerError> {
        let doc = Document::parse(content).map_err(|e| ReportScannerError::Xml {
            path: source_path.to_owned(),
            source: e,
        })?;

        let root = doc.root_element();
        if root.tag_name().name() != "analysis" {
            return Err(ReportScannerError::schema(
                source_path,
                format!(
                    "root element must be <analysis>, found <{}>",
                    root.tag_name().name()
                ),
            ));
        }

        let schema = detect_schema(root.tag_name().namespace());
        log_schema(source_path, ReportFormat::Xml, schema);

        let decoder = TreeDecoder {
            doc: &doc,
            schema,
            source_path,
        };

        let mut dependencies = Vec::new();
        if let Some(list) = child(root, "dependencies") {
            for node in children(list, "dependency") {
                dependencies.push(decoder.dependency(node)?);
            }
        }

        Ok(Analysis {
            format: ReportFormat::Xml,
            schema,
            dependencies,
        })
    }
}

/// 루트 네임스페이스에서 스키마 세대를 결정합니다.
///
/// 네임스페이스가 없거나 XSD 버전을 읽을 수 없으면 Legacy입니다.
fn detect_schema(namespace: Option<&str>) -> SchemaVersion {
    match namespace.and_then(xsd_version) {
        Some((major, minor)) => SchemaVersion::from_xsd_version(major, minor),
        None => SchemaVersion::Legacy,
    }
}

fn xsd_version(namespace: &str) -> Option<(u32, u32)> {
    let file = namespace.rsplit('/').next()?;
    let version = file
        .strip_prefix("dependency-check.")?
        .strip_suffix(".xsd")?;
    let (major, minor) = version.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

struct TreeDecoder<'a, 'input> {
    doc: &'a Document<'input>,
    schema: SchemaVersion,
    source_path: &'a str,
}

impl TreeDecoder<'_, '_> {
    fn dependency(&self, node: Node<'_, '_>) -> Result<Dependency, ReportScannerError> {
        let file_name = self.required_text(node, "fileName", "dependency")?;
        let file_path = self.required_text(node, "filePath", &file_name)?;

        let mut vulnerabilities = Vec::new();
        if let Some(list) = child(node, "vulnerabilities") {
            for vuln in children(list, "vulnerability") {
                vulnerabilities.push(self.vulnerability(vuln)?);
            }
        }

        Ok(Dependency {
            file_name,
            file_path,
            vulnerabilities,
        })
    }

    fn vulnerability(&self, node: Node<'_, '_>) -> Result<Vulnerability, ReportScannerError> {
        let name = self.required_text(node, "name", "vulnerability")?;

        let raw_score = match self.schema {
            SchemaVersion::Legacy => child_text(node, "cvssScore"),
            SchemaVersion::Modern => child(node, "cvssV3")
                .and_then(|v3| child_text(v3, "baseScore"))
                .or_else(|| child(node, "cvssV2").and_then(|v2| child_text(v2, "score")))
                .or_else(|| child_text(node, "cvssScore")),
        };
        let raw_score = raw_score.ok_or_else(|| {
            ReportScannerError::schema(
                self.source_path,
                format!("vulnerability '{name}': missing cvss score"),
            )
        })?;
        let cvss_score = parse_score(raw_score, &name, self.source_path)?;

        let cwe = match self.schema {
            SchemaVersion::Legacy => non_blank(child_text(node, "cwe")),
            SchemaVersion::Modern => child(node, "cwes")
                .and_then(|cwes| {
                    children(cwes, "cwe").find_map(|c| non_blank(c.text()))
                })
                .or_else(|| non_blank(child_text(node, "cwe"))),
        };

        let description = child_text(node, "description")
            .map(|d| d.trim().to_owned())
            .unwrap_or_default();

        let row = self.doc.text_pos_at(node.range().start).row;

        Ok(Vulnerability {
            name,
            cvss_score,
            cwe,
            description,
            report_line: NonZeroU32::new(row),
        })
    }

    fn required_text(
        &self,
        node: Node<'_, '_>,
        name: &str,
        owner: &str,
    ) -> Result<String, ReportScannerError> {
        non_blank(child_text(node, name)).ok_or_else(|| {
            ReportScannerError::schema(
                self.source_path,
                format!("{owner}: missing <{name}>"),
            )
        })
    }
}

// --- 트리 탐색 헬퍼 (네임스페이스 무시, 로컬 이름 비교) ---

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|c| c.text())
}
