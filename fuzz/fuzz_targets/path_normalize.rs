#![no_main]

use depcheck_report::normalize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let normalized = normalize(path);
        // 정규화는 멱등
        assert_eq!(normalize(&normalized), normalized);
    }
});
