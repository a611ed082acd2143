#![no_main]

use bin2coe::CoeDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = CoeDocument::parse(text);
    }
});
