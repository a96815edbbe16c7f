#![no_main]
use libfuzzer_sys::fuzz_target;
use upalate_mongo::query::{Filter, eval_filter};

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    // Filter documents as the in-process store reads them; should not panic
    if let Ok(doc) = bson::Document::from_reader(data) {
        if let Ok(f) = Filter::try_from(&doc) {
            let _ = eval_filter(&doc, &f);
        }
    }
});
