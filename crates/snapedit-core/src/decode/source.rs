//! Input resolution for the editor.
//!
//! An editing session can be fed either encoded bytes (a `File`/`Blob` on the
//! JS side) or a reference string. References are resolved to bytes here so
//! the rest of the pipeline only ever sees a byte slice.

use std::borrow::Cow;
use std::path::Path;

use base64::Engine as _;
use image::ImageFormat;
use thiserror::Error;

use super::DecodeError;

/// Where the image to edit comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes, with the MIME type the caller declared (if any).
    Bytes {
        data: Vec<u8>,
        mime_type: Option<String>,
    },
    /// A `data:` URL, a `file://` URL or a local filesystem path.
    Reference(String),
}

impl ImageSource {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        ImageSource::Bytes {
            data: data.into(),
            mime_type: None,
        }
    }

    pub fn bytes_with_mime(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        ImageSource::Bytes {
            data: data.into(),
            mime_type: Some(mime_type.into()),
        }
    }

    pub fn reference(reference: impl Into<String>) -> Self {
        ImageSource::Reference(reference.into())
    }

    /// Resolve the source into encoded bytes plus the declared MIME type.
    ///
    /// Any file handle opened for a path reference is closed before this
    /// returns, on both the success and failure paths.
    pub fn resolve(&self) -> Result<ResolvedSource<'_>, SourceError> {
        match self {
            ImageSource::Bytes { data, mime_type } => Ok(ResolvedSource {
                bytes: Cow::Borrowed(data.as_slice()),
                declared_mime: mime_type.clone(),
            }),
            ImageSource::Reference(reference) => resolve_reference(reference),
        }
    }
}

/// Encoded bytes ready for validation and decoding.
#[derive(Debug)]
pub struct ResolvedSource<'a> {
    pub bytes: Cow<'a, [u8]>,
    pub declared_mime: Option<String>,
}

/// Errors raised while turning an `ImageSource` into bytes.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The reference is neither a data URL nor a readable local path.
    #[error("Unsupported image input: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn resolve_reference(reference: &str) -> Result<ResolvedSource<'static>, SourceError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(SourceError::Unsupported("empty reference".to_string()));
    }

    if let Some(rest) = reference.strip_prefix("data:") {
        return decode_data_url(rest);
    }

    let path = match reference.strip_prefix("file://") {
        Some(path) => path,
        None if has_url_scheme(reference) => {
            return Err(SourceError::Unsupported(format!(
                "cannot resolve remote reference '{reference}'"
            )));
        }
        None => reference,
    };

    read_path(Path::new(path))
}

/// `rest` is everything after the `data:` prefix.
fn decode_data_url(rest: &str) -> Result<ResolvedSource<'static>, SourceError> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let Some(mime) = header.strip_suffix(";base64") else {
        return Err(SourceError::Unsupported(
            "only base64-encoded data URLs carry image bytes".to_string(),
        ));
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidDataUrl(e.to_string()))?;

    Ok(ResolvedSource {
        bytes: Cow::Owned(bytes),
        declared_mime: (!mime.is_empty()).then(|| mime.to_string()),
    })
}

fn read_path(path: &Path) -> Result<ResolvedSource<'static>, SourceError> {
    if !path.is_file() {
        return Err(SourceError::Unsupported(format!(
            "'{}' is not a readable file",
            path.display()
        )));
    }
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    Ok(ResolvedSource {
        bytes: Cow::Owned(bytes),
        declared_mime: None,
    })
}

/// True for `scheme:` prefixes such as `http:` or `blob:`, but not for
/// Windows drive letters like `C:`.
fn has_url_scheme(reference: &str) -> bool {
    match reference.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Identify the MIME type of encoded bytes from their magic number.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP => {
            Some(format.to_mime_type())
        }
        _ => None,
    }
}
