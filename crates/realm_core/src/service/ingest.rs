//! Image ingestion into opaque references.
//!
//! # Responsibility
//! - Encode user-selected image bytes as inline `data:` URLs.
//! - Read image files from disk into references.
//!
//! # Invariants
//! - Image payloads are never decoded or validated beyond being non-empty.

use crate::model::block::ImageRef;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug)]
pub enum IngestError {
    Io { path: PathBuf, source: io::Error },
    EmptyFile(PathBuf),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read image `{}`: {source}", path.display())
            }
            Self::EmptyFile(path) => write!(f, "image file `{}` is empty", path.display()),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::EmptyFile(_) => None,
        }
    }
}

/// Encodes `bytes` as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> ImageRef {
    ImageRef::new(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Guesses an image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        _ => FALLBACK_MIME,
    }
}

/// Reads the file at `path` into an inline image reference.
pub fn read_image_file(path: impl AsRef<Path>) -> Result<ImageRef, IngestError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| {
        error!(
            "event=image_ingest module=ingest status=error error_code=read_failed error={}",
            source
        );
        IngestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile(path.to_path_buf()));
    }

    let mime = mime_for_path(path);
    info!(
        "event=image_ingest module=ingest status=ok mime={} bytes={}",
        mime,
        bytes.len()
    );
    Ok(encode_data_url(mime, &bytes))
}
