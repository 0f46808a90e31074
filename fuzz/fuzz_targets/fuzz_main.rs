#![no_main]

use libfuzzer_sys::fuzz_target;
use richdoc_core::{html_to_document, ParseConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(doc) = html_to_document(input, &ParseConfig::default()) {
            assert!(!doc.blocks.is_empty());
        }
    }
});
