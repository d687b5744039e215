//! Domain layer unit tests
//!
//! Tests for the signature table, detection pipeline and base64 helpers.

use b64forge::domain::entities::{DetectedType, Disambiguation, FileSignature};
use b64forge::domain::services::{
    DECODE_ENGINE, FileTypeDetector, SignatureDetector, SignatureRegistry, check_structure,
    encoded_len, is_valid_base64, preview_input_len, strip_whitespace,
};
use b64forge::format_file_size;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// Detection Tests
// ============================================================================

#[fixture]
fn detector() -> SignatureDetector {
    SignatureDetector::new()
}

fn with_tail(head: &[u8], tail_len: usize) -> Vec<u8> {
    let mut data = head.to_vec();
    data.extend(std::iter::repeat_n(0u8, tail_len));
    data
}

fn riff(form: &[u8; 4]) -> Vec<u8> {
    let mut data = b"RIFF\x10\x00\x00\x00".to_vec();
    data.extend_from_slice(form);
    data.extend_from_slice(&[0x00; 16]);
    data
}

#[rstest]
#[case::png(with_tail(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], 24), "png")]
#[case::jpeg(with_tail(&[0xFF, 0xD8, 0xFF, 0xE0], 16), "jpg")]
#[case::gif(b"GIF89a\x01\x00\x01\x00".to_vec(), "gif")]
#[case::pdf(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3".to_vec(), "pdf")]
#[case::webp(riff(b"WEBP"), "webp")]
#[case::wav(riff(b"WAVE"), "wav")]
#[case::avi(riff(b"AVI "), "avi")]
#[case::gzip(with_tail(&[0x1F, 0x8B, 0x08], 10), "gz")]
#[case::elf(with_tail(b"\x7FELF\x02\x01\x01", 9), "elf")]
#[case::webm_before_matroska(with_tail(&[0x1A, 0x45, 0xDF, 0xA3], 12), "webm")]
fn test_detects_binary_signatures(
    detector: SignatureDetector,
    #[case] data: Vec<u8>,
    #[case] extension: &str,
) {
    assert_eq!(detector.detect(&data).extension(), extension);
}

#[rstest]
fn test_detects_signature_at_offset(detector: SignatureDetector) {
    let mut mp4 = vec![0x00, 0x00, 0x00, 0x20];
    mp4.extend_from_slice(b"ftypisom");
    mp4.extend_from_slice(&[0x00; 20]);
    assert_eq!(detector.detect(&mp4).label(), "MP4 Video");

    let mut tar = vec![0u8; 512];
    tar[257..262].copy_from_slice(b"ustar");
    assert_eq!(detector.detect(&tar).extension(), "tar");
}

#[rstest]
fn test_unknown_riff_form_is_unknown(detector: SignatureDetector) {
    assert_eq!(detector.detect(&riff(b"XXXX")), DetectedType::UNKNOWN);
}

#[rstest]
fn test_short_riff_is_unknown(detector: SignatureDetector) {
    assert_eq!(detector.detect(b"RIFF\x00\x00"), DetectedType::UNKNOWN);
}

#[rstest]
fn test_all_zero_bytes_are_unknown(detector: SignatureDetector) {
    assert_eq!(detector.detect(&[0u8; 64]), DetectedType::UNKNOWN);
}

#[rstest]
fn test_empty_content(detector: SignatureDetector) {
    assert_eq!(detector.detect(&[]), DetectedType::EMPTY);
}

#[rstest]
#[case::docx(b"word/document.xml".as_slice(), "docx")]
#[case::xlsx(b"xl/workbook.xml".as_slice(), "xlsx")]
#[case::pptx(b"ppt/presentation.xml".as_slice(), "pptx")]
#[case::plain_zip(b"readme.txt".as_slice(), "zip")]
fn test_zip_disambiguation(
    detector: SignatureDetector,
    #[case] entry_name: &[u8],
    #[case] extension: &str,
) {
    let mut zip = b"PK\x03\x04\x14\x00\x00\x00\x08\x00".to_vec();
    zip.extend_from_slice(&[0u8; 20]);
    zip.extend_from_slice(entry_name);
    assert_eq!(detector.detect(&zip).extension(), extension);
}

#[rstest]
fn test_office_marker_priority_ignores_position(detector: SignatureDetector) {
    let mut zip = b"PK\x03\x04".to_vec();
    zip.extend_from_slice(b"ppt/slides/slide1.xml");
    zip.extend_from_slice(b"word/document.xml");
    assert_eq!(detector.detect(&zip).extension(), "docx");
}

#[rstest]
fn test_office_marker_past_window_is_plain_zip(detector: SignatureDetector) {
    let mut zip = b"PK\x03\x04".to_vec();
    zip.resize(600, 0);
    zip.extend_from_slice(b"word/document.xml");
    assert_eq!(detector.detect(&zip).label(), "ZIP Archive");
}

#[rstest]
#[case::utf8(&[0xEF, 0xBB, 0xBF, b'h', b'i'], "UTF-8 Text File")]
#[case::utf32_le(&[0xFF, 0xFE, 0x00, 0x00, b'h', 0x00, 0x00, 0x00], "UTF-32 LE Text File")]
#[case::utf16_le(&[0xFF, 0xFE, b'h', 0x00, b'i', 0x00], "UTF-16 LE Text File")]
#[case::utf16_be(&[0xFE, 0xFF, 0x00, b'h'], "UTF-16 BE Text File")]
#[case::utf32_be(&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x00, b'h'], "UTF-32 BE Text File")]
fn test_byte_order_marks(detector: SignatureDetector, #[case] data: &[u8], #[case] label: &str) {
    let detected = detector.detect(data);
    assert_eq!(detected.label(), label);
    assert_eq!(detected.extension(), "txt");
}

#[rstest]
#[case::html("<!DOCTYPE html><html><body></body></html>", "html")]
#[case::html_lowercase("  <html lang=\"en\">", "html")]
#[case::json_object("{\"name\": \"value\"}", "json")]
#[case::json_array("[1, 2, 3]", "json")]
#[case::xml("<?xml version=\"1.0\"?><root/>", "xml")]
#[case::svg("<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>", "svg")]
#[case::plain("Hello, world!\nSecond line.\n", "txt")]
fn test_text_refinement(detector: SignatureDetector, #[case] text: &str, #[case] extension: &str) {
    assert_eq!(detector.detect(text.as_bytes()).extension(), extension);
}

#[rstest]
fn test_mostly_binary_is_not_text(detector: SignatureDetector) {
    let data: Vec<u8> = (1..=31u8).cycle().take(100).collect();
    assert_eq!(detector.detect(&data), DetectedType::UNKNOWN);
}

// ============================================================================
// Signature Registry Tests
// ============================================================================

#[test]
fn test_custom_registry_order() {
    let mut registry = SignatureRegistry::new();
    registry.register(FileSignature::new(b"AB", "First", "one"));
    registry.register(FileSignature::new(b"ABC", "Second", "two"));

    assert_eq!(registry.signature_count(), 2);
    assert_eq!(registry.first_match(b"ABCD").unwrap().label(), "First");
}

#[test]
fn test_standard_table_shape() {
    let registry = SignatureRegistry::shared();
    let riff_entries = registry
        .signatures()
        .iter()
        .filter(|sig| sig.disambiguation() == Disambiguation::RiffContainer)
        .count();
    let zip_entries = registry
        .signatures()
        .iter()
        .filter(|sig| sig.disambiguation() == Disambiguation::ZipContainer)
        .count();

    assert_eq!(riff_entries, 1);
    assert_eq!(zip_entries, 3);
    assert!(registry.signatures().iter().all(|sig| !sig.header().is_empty()));
}

#[test]
fn test_browser_viewable_types() {
    let detector = SignatureDetector::new();
    assert!(detector.detect(b"%PDF-1.4").is_browser_viewable());
    assert!(!detector.detect(b"MZ\x90\x00").is_browser_viewable());
}

// ============================================================================
// Base64 Helper Tests
// ============================================================================

#[rstest]
#[case::padded("SGVsbG8=", true)]
#[case::with_line_breaks("SGVs\r\nbG8g\nd29y\tbGQ=", true)]
#[case::empty("", true)]
#[case::leading_bom("\u{feff}SGVsbG8=", true)]
#[case::missing_padding("SGVsbG8", false)]
#[case::bad_alphabet("SGVsbG8-", false)]
#[case::too_much_padding("SGV===", false)]
#[case::plain_words("Hello World!", false)]
fn test_is_valid_base64(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_valid_base64(text), expected);
}

#[rstest]
#[case::short("QR==", b"A".as_slice())]
#[case::after_full_block("SGVsQR==", b"HelA".as_slice())]
#[case::two_symbols_left("SGVsbG9=", b"Hello".as_slice())]
fn test_non_canonical_tail_is_accepted(#[case] text: &str, #[case] decoded: &[u8]) {
    assert!(is_valid_base64(text));
    assert!(check_structure(text).is_ok());
    assert_eq!(DECODE_ENGINE.decode(text).unwrap(), decoded);
}

#[rstest]
#[case::interior_padding("SG=sbG8=")]
#[case::bad_char("SGVs*G8=")]
#[case::bad_length("SGVsbG8")]
fn test_check_structure_rejects(#[case] cleaned: &str) {
    assert!(check_structure(cleaned).is_err());
}

#[rstest]
#[case(0, "0 bytes")]
#[case(512, "512 bytes")]
#[case(1024, "1.00 KB")]
#[case(1536, "1.50 KB")]
#[case(1_048_576, "1.00 MB")]
#[case(5_368_709_120, "5.00 GB")]
fn test_format_file_size(#[case] bytes: u64, #[case] expected: &str) {
    assert_eq!(format_file_size(bytes), expected);
}

#[test]
fn test_preview_budget() {
    assert_eq!(preview_input_len(100), 75);
    assert_eq!(encoded_len(75), 100);
}

proptest! {
    #[test]
    fn prop_encoded_len_matches_engine(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        prop_assert_eq!(STANDARD.encode(&data).len() as u64, encoded_len(data.len() as u64));
    }

    #[test]
    fn prop_encoded_text_is_valid(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let text = STANDARD.encode(&data);
        prop_assert!(is_valid_base64(&text));
        prop_assert!(check_structure(&text).is_ok());
    }

    #[test]
    fn prop_whitespace_is_ignored(data in proptest::collection::vec(any::<u8>(), 1..256), width in 1usize..80) {
        let text = STANDARD.encode(&data);
        let wrapped = text
            .as_bytes()
            .chunks(width)
            .map(|line| std::str::from_utf8(line).unwrap())
            .collect::<Vec<_>>()
            .join("\r\n");
        prop_assert_eq!(strip_whitespace(&wrapped), text);
    }

    #[test]
    fn prop_detection_never_panics(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let detected = SignatureDetector::new().detect(&data);
        prop_assert!(!detected.extension().is_empty());
    }
}
