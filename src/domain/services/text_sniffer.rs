//! Text classification for content that carries no binary signature
//!
//! Byte order marks first, then a printable-ratio heuristic, then a sniff of
//! the leading characters to tell HTML, JSON, XML and SVG from plain text.

use crate::domain::entities::DetectedType;

/// Number of leading bytes inspected when refining a text classification
const TEXT_SNIFF_LEN: usize = 256;

/// Minimum share of printable bytes, in percent, for content to count as text
const PRINTABLE_PERCENT: usize = 85;

/// Byte order marks in check order; UTF-32 LE must precede UTF-16 LE, which is its prefix
const BYTE_ORDER_MARKS: [(&[u8], DetectedType); 5] = [
    (&[0xEF, 0xBB, 0xBF], DetectedType::new("UTF-8 Text File", "txt")),
    (&[0xFF, 0xFE, 0x00, 0x00], DetectedType::new("UTF-32 LE Text File", "txt")),
    (&[0xFF, 0xFE], DetectedType::new("UTF-16 LE Text File", "txt")),
    (&[0xFE, 0xFF], DetectedType::new("UTF-16 BE Text File", "txt")),
    (&[0x00, 0x00, 0xFE, 0xFF], DetectedType::new("UTF-32 BE Text File", "txt")),
];

const HTML: DetectedType = DetectedType::new("HTML Document", "html");
const JSON: DetectedType = DetectedType::new("JSON File", "json");
const XML: DetectedType = DetectedType::new("XML Document", "xml");
const SVG: DetectedType = DetectedType::new("SVG Image", "svg");
const PLAIN_TEXT: DetectedType = DetectedType::new("Plain Text File", "txt");

/// Returns the encoding implied by a leading byte order mark, if any
pub fn byte_order_mark(data: &[u8]) -> Option<DetectedType> {
    BYTE_ORDER_MARKS
        .iter()
        .find(|(bom, _)| data.starts_with(bom))
        .map(|&(_, detected)| detected)
}

/// Heuristic text check
///
/// Any null byte means binary. Otherwise at least 85% of the bytes must be
/// tab, LF, CR, printable ASCII, or >= 0x80 (optimistically UTF-8).
pub fn is_likely_text(data: &[u8]) -> bool {
    if data.is_empty() || data.contains(&0) {
        return false;
    }

    let printable = data
        .iter()
        .filter(|&&b| matches!(b, 0x09 | 0x0A | 0x0D | 0x20..=0x7E | 0x80..=0xFF))
        .count();

    printable * 100 >= data.len() * PRINTABLE_PERCENT
}

/// Narrows text content down to a markup or data format
pub fn refine_text(data: &[u8]) -> DetectedType {
    let sample = String::from_utf8_lossy(&data[..data.len().min(TEXT_SNIFF_LEN)]);
    let trimmed = sample.trim_start();

    if starts_with_ignore_case(trimmed, "<!doctype html") || starts_with_ignore_case(trimmed, "<html") {
        HTML
    } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
        JSON
    } else if sample.contains("<?xml") {
        XML
    } else if trimmed.starts_with("<svg") {
        SVG
    } else {
        PLAIN_TEXT
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}
