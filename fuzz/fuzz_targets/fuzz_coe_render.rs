#![no_main]

use bin2coe::CoeDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let rendered = CoeDocument::new(data.to_vec()).to_string();
    let decoded = CoeDocument::parse(&rendered).expect("rendered document must parse");
    assert_eq!(decoded.as_bytes(), data);
});
