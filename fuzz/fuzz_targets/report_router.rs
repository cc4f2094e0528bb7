#![no_main]

use depcheck_report::ReportParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let parser = ReportParser::new();
    if let Ok(analysis) = parser.parse_bytes(data, "fuzz/report") {
        // 디코딩된 점수는 항상 CVSS 범위 안
        for dependency in &analysis.dependencies {
            for vulnerability in &dependency.vulnerabilities {
                assert!((0.0..=10.0).contains(&vulnerability.cvss_score));
            }
        }
    }
});
