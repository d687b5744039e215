#![no_main]

use b64forge::domain::services::{FileTypeDetector, SignatureDetector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let detected = SignatureDetector::new().detect(data);
    assert!(!detected.extension().is_empty());
});
