#![no_main]
use libfuzzer_sys::fuzz_target;
use upalate_mongo::query::{FilterRequest, Operator, build_filter};

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // AND clause parsing and dispatch; should not panic
        let _ = build_filter(&FilterRequest::new(Operator::And, "", s));
    }
});
