//! Signature registry service
//!
//! Holds the ordered table of binary file signatures and resolves a content
//! prefix to the first signature that matches, applying the container
//! disambiguation rules for RIFF and ZIP.

use crate::domain::entities::{DetectedType, Disambiguation, FileSignature};
use aho_corasick::AhoCorasick;
use std::sync::LazyLock;

/// Entry paths that identify Office Open XML packages inside a ZIP, in priority order
const OFFICE_MARKERS: [&str; 3] = ["word/", "xl/", "ppt/"];

const OFFICE_TYPES: [DetectedType; 3] = [
    DetectedType::new("Microsoft Word Document", "docx"),
    DetectedType::new("Microsoft Excel Spreadsheet", "xlsx"),
    DetectedType::new("Microsoft PowerPoint Presentation", "pptx"),
];

/// SOI followed by the APPn/DQT markers seen in practice
const JPEG_HEADERS: [&[u8]; 7] = [
    &[0xFF, 0xD8, 0xFF, 0xDB],
    &[0xFF, 0xD8, 0xFF, 0xE0],
    &[0xFF, 0xD8, 0xFF, 0xE1],
    &[0xFF, 0xD8, 0xFF, 0xE2],
    &[0xFF, 0xD8, 0xFF, 0xE3],
    &[0xFF, 0xD8, 0xFF, 0xE8],
    &[0xFF, 0xD8, 0xFF, 0xEE],
];

const ZIP_ARCHIVE: DetectedType = DetectedType::new("ZIP Archive", "zip");

/// RIFF form types at offset 8
const RIFF_FORMS: [(&[u8; 4], DetectedType); 3] = [
    (b"WEBP", DetectedType::new("WebP Image", "webp")),
    (b"AVI ", DetectedType::new("AVI Video", "avi")),
    (b"WAVE", DetectedType::new("WAV Audio", "wav")),
];

static SHARED: LazyLock<SignatureRegistry> = LazyLock::new(SignatureRegistry::standard);

/// Ordered registry of file signatures
///
/// Signatures are tried in registration order; the first structural match
/// wins unless its disambiguation rule rejects it, in which case the scan
/// continues with the next entry.
///
/// # Example
///
/// ```
/// use b64forge::domain::services::SignatureRegistry;
///
/// let registry = SignatureRegistry::shared();
/// let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// let detected = registry.first_match(&png).unwrap();
/// assert_eq!(detected.extension(), "png");
/// ```
#[derive(Debug)]
pub struct SignatureRegistry {
    signatures: Vec<FileSignature>,
    /// Multi-pattern matcher for the Office markers inside ZIP content
    office_matcher: AhoCorasick,
}

impl SignatureRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            signatures: Vec::new(),
            office_matcher: AhoCorasick::new(OFFICE_MARKERS)
                .expect("static office markers are valid patterns"),
        }
    }

    /// The process-wide registry with the standard table, built on first use
    pub fn shared() -> &'static SignatureRegistry {
        &SHARED
    }

    /// Creates a registry with the standard signature table
    pub fn standard() -> Self {
        let mut registry = Self::new();

        // Images
        registry.register(FileSignature::new(
            &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            "PNG Image",
            "png",
        ));
        for header in JPEG_HEADERS {
            registry.register(FileSignature::new(header, "JPEG Image", "jpg"));
        }
        registry.register(FileSignature::new(b"GIF87a", "GIF Image", "gif"));
        registry.register(FileSignature::new(b"GIF89a", "GIF Image", "gif"));
        registry.register(
            FileSignature::new(b"RIFF", "RIFF Container", "riff")
                .with_disambiguation(Disambiguation::RiffContainer),
        );
        registry.register(FileSignature::new(b"BM", "BMP Image", "bmp"));
        registry.register(FileSignature::new(&[0x49, 0x49, 0x2A, 0x00], "TIFF Image", "tif"));
        registry.register(FileSignature::new(&[0x4D, 0x4D, 0x00, 0x2A], "TIFF Image", "tif"));
        registry.register(FileSignature::new(&[0x00, 0x00, 0x01, 0x00], "ICO Image", "ico"));

        // Documents
        registry.register(FileSignature::new(b"%PDF-", "PDF Document", "pdf"));
        registry.register(FileSignature::new(
            &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
            "Microsoft Office Document",
            "doc",
        ));
        // Local file header, empty archive, spanned archive
        for header in [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"] {
            registry.register(
                FileSignature::new(header, "ZIP Archive", "zip")
                    .with_disambiguation(Disambiguation::ZipContainer),
            );
        }
        registry.register(FileSignature::new(b"{\\rtf1", "Rich Text Format", "rtf"));

        // Fonts
        registry.register(FileSignature::new(
            &[0x00, 0x01, 0x00, 0x00, 0x00],
            "TrueType Font",
            "ttf",
        ));
        registry.register(FileSignature::new(b"OTTO", "OpenType Font", "otf"));
        registry.register(FileSignature::new(b"wOFF", "Web Open Font Format", "woff"));
        registry.register(FileSignature::new(b"wOF2", "Web Open Font Format 2", "woff2"));
        registry.register(
            FileSignature::new(b"LP", "Embedded OpenType Font", "eot").with_offset(34),
        );

        // Video
        for brand in [b"ftypisom", b"ftypMSNV", b"ftypmp42"] {
            registry.register(FileSignature::new(brand, "MP4 Video", "mp4").with_offset(4));
        }
        // EBML header; WebM and Matroska share it and WebM is listed first
        registry.register(FileSignature::new(&[0x1A, 0x45, 0xDF, 0xA3], "WebM Video", "webm"));
        registry.register(FileSignature::new(
            &[0x1A, 0x45, 0xDF, 0xA3],
            "Matroska Video",
            "mkv",
        ));
        registry.register(FileSignature::new(&[0x46, 0x4C, 0x56, 0x01], "Flash Video", "flv"));
        registry.register(FileSignature::new(b"ftypqt  ", "QuickTime Video", "mov").with_offset(4));
        registry.register(FileSignature::new(
            &[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9],
            "Windows Media Video",
            "wmv",
        ));
        registry.register(FileSignature::new(&[0x00, 0x00, 0x01, 0xBA], "MPEG Video", "mpg"));
        registry.register(FileSignature::new(&[0x00, 0x00, 0x01, 0xB3], "MPEG Video", "mpg"));

        // Audio
        registry.register(FileSignature::new(&[0xFF, 0xFB], "MP3 Audio", "mp3"));
        registry.register(FileSignature::new(&[0xFF, 0xF3], "MP3 Audio", "mp3"));
        registry.register(FileSignature::new(&[0xFF, 0xF2], "MP3 Audio", "mp3"));
        registry.register(FileSignature::new(b"ID3", "MP3 Audio", "mp3"));
        registry.register(FileSignature::new(b"OggS", "OGG Audio", "ogg"));
        registry.register(FileSignature::new(b"fLaC", "FLAC Audio", "flac"));

        // Archives
        registry.register(FileSignature::new(
            &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
            "7-Zip Archive",
            "7z",
        ));
        registry.register(FileSignature::new(b"Rar!\x1A\x07\x00", "RAR Archive", "rar"));
        registry.register(FileSignature::new(b"Rar!\x1A\x07\x01\x00", "RAR Archive", "rar"));
        registry.register(FileSignature::new(&[0x1F, 0x8B], "GZIP Archive", "gz"));
        registry.register(FileSignature::new(b"ustar", "TAR Archive", "tar").with_offset(257));

        // Executables
        registry.register(FileSignature::new(b"MZ", "Windows Executable", "exe"));
        registry.register(FileSignature::new(b"\x7FELF", "ELF Executable", "elf"));

        registry.register(FileSignature::new(b"<?xml ", "XML Document", "xml"));

        registry
    }

    /// Appends a signature; it is tried after every signature registered before it
    pub fn register(&mut self, signature: FileSignature) {
        self.signatures.push(signature);
    }

    /// Returns the signatures in priority order
    pub fn signatures(&self) -> &[FileSignature] {
        &self.signatures
    }

    /// Returns the number of registered signatures
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Resolves `data` to the first signature that matches and survives disambiguation
    pub fn first_match(&self, data: &[u8]) -> Option<DetectedType> {
        self.signatures
            .iter()
            .filter(|sig| sig.matches_header(data))
            .find_map(|sig| self.resolve(sig, data))
    }

    fn resolve(&self, signature: &FileSignature, data: &[u8]) -> Option<DetectedType> {
        match signature.disambiguation() {
            Disambiguation::Exact => Some(signature.detected()),
            Disambiguation::RiffContainer => riff_form(data),
            Disambiguation::ZipContainer => Some(self.zip_content(data)),
        }
    }

    /// Picks the Office format whose marker appears in the prefix, by marker priority
    fn zip_content(&self, data: &[u8]) -> DetectedType {
        self.office_matcher
            .find_overlapping_iter(data)
            .map(|mat| mat.pattern().as_usize())
            .min()
            .map(|idx| OFFICE_TYPES[idx])
            .unwrap_or(ZIP_ARCHIVE)
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Resolves the RIFF form type; an unrecognised or missing tag is not a match
fn riff_form(data: &[u8]) -> Option<DetectedType> {
    let tag = data.get(8..12)?;
    RIFF_FORMS
        .iter()
        .find(|(form, _)| tag == form.as_slice())
        .map(|&(_, detected)| detected)
}
