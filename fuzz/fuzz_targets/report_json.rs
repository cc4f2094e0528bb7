#![no_main]

use depcheck_report::{JsonReportDecoder, ReportDecoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = JsonReportDecoder.decode(content, "fuzz/dependency-check-report.json");
    }
});
