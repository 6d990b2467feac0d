//! Document format detection.
//!
//! The analysis service accepts PDF, PNG, JPEG and TIFF documents. The kind is
//! sniffed from the leading bytes and used as the staged object's content type.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fallback content type for unrecognized documents.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Document kinds the analysis service reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// TIFF image (either byte order)
    Tiff,
}

impl DocumentKind {
    /// MIME type for upload.
    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Png => "image/png",
            DocumentKind::Jpeg => "image/jpeg",
            DocumentKind::Tiff => "image/tiff",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Png => "PNG",
            DocumentKind::Jpeg => "JPEG",
            DocumentKind::Tiff => "TIFF",
        };
        f.write_str(name)
    }
}

const SIGNATURES: &[(&[u8], DocumentKind)] = &[
    (b"%PDF-", DocumentKind::Pdf),
    (b"\x89PNG\r\n\x1a\n", DocumentKind::Png),
    (b"\xff\xd8\xff", DocumentKind::Jpeg),
    (b"II*\x00", DocumentKind::Tiff),
    (b"MM\x00*", DocumentKind::Tiff),
];

/// Longest signature length.
const HEADER_LEN: usize = 8;

/// Detect the document kind from leading bytes.
///
/// # Returns
/// * `Ok(DocumentKind)` if a known signature matches
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<DocumentKind> {
    SIGNATURES
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map(|(_, kind)| *kind)
        .ok_or(Error::UnknownFormat)
}

/// Detect the document kind of a file.
///
/// # Example
/// ```no_run
/// use untable::detect::detect_kind_from_path;
///
/// let kind = detect_kind_from_path("survey.pdf").unwrap();
/// println!("{} ({})", kind, kind.content_type());
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentKind> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_kind_from_bytes(&header)
}

/// Content type for a file, falling back to [`OCTET_STREAM`].
pub fn content_type_for<P: AsRef<Path>>(path: P) -> &'static str {
    detect_kind_from_path(path)
        .map(|kind| kind.content_type())
        .unwrap_or(OCTET_STREAM)
}
