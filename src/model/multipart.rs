/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! `multipart/form-data` encoding of file uploads
//!
//! An upload body carries exactly one part named `file`:
//!
//! ```text
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="file"; filename="{name}"\r\n
//! Content-Type: {mime}\r\n
//! Content-Transfer-Encoding: binary\r\n\r\n
//! {payload}\r\n
//! --{boundary}--\r\n\r\n
//! ```

use crate::constants::{
    BASE64_LINE_LENGTH, BOUNDARY_PREFIX, DEFAULT_MIME_TYPE, DEFAULT_UPLOAD_FILENAME,
    content_types,
};
use crate::error::AppError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::debug;

/// A file to upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartFile {
    /// File name, with or without the extension
    pub filename: Option<String>,
    /// Extension without the leading dot
    pub extension: Option<String>,
    /// Raw content
    pub content: Vec<u8>,
}

impl MultipartFile {
    /// Creates a file from its name, extension and content
    pub fn new(
        filename: impl Into<String>,
        extension: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: Some(filename.into()),
            extension: Some(extension.into()),
            content: content.into(),
        }
    }

    /// Creates a file named after the last component of `path`, whose extension is
    /// taken from that same component
    pub fn from_bytes(path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.as_ref();
        Self {
            filename: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string),
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_string),
            content: content.into(),
        }
    }

    /// Reads a file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(Self::from_bytes(path, content))
    }

    /// MIME type derived from the extension, `application/octet-stream` when unknown
    #[must_use]
    pub fn mime_type(&self) -> String {
        mime_type_for_extension(self.extension.as_deref().unwrap_or_default())
    }

    /// Name sent in the `Content-Disposition` header
    ///
    /// The extension is appended only when the name does not already end with it.
    #[must_use]
    pub fn upload_filename(&self) -> String {
        let name = self
            .filename
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_FILENAME);
        let ext = match self.extension.as_deref().map(str::trim) {
            Some(ext) if !ext.is_empty() => ext.trim_start_matches('.'),
            _ => return name.to_string(),
        };
        let suffix = format!(".{}", ext.to_ascii_lowercase());
        if name.to_ascii_lowercase().ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}.{ext}")
        }
    }
}

/// Resolves a MIME type from a file extension
///
/// Never fails: unknown or empty extensions map to `application/octet-stream`.
#[must_use]
pub fn mime_type_for_extension(extension: &str) -> String {
    mime_guess::from_ext(extension.trim_start_matches('.'))
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string())
}

/// How the file content is written inside its part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// Base64 wrapped at 64 characters with CRLF, the form the Copyleaks SDKs send
    #[default]
    Base64,
    /// Content bytes as-is
    Raw,
}

/// An encoded upload body together with its boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    /// Boundary separating the parts
    pub boundary: String,
    /// Encoded body
    pub body: Vec<u8>,
}

impl MultipartBody {
    /// Value of the `Content-Type` header for this body
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{};boundary={}", content_types::MULTIPART_FORM_DATA, self.boundary)
    }

    /// Body length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the body is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Encodes single file uploads
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipartEncoder {
    encoding: PayloadEncoding,
}

impl MultipartEncoder {
    /// Creates an encoder with the given payload encoding
    #[must_use]
    pub fn new(encoding: PayloadEncoding) -> Self {
        Self { encoding }
    }

    /// Payload encoding used by this encoder
    #[must_use]
    pub fn encoding(&self) -> PayloadEncoding {
        self.encoding
    }

    /// Encodes `file` with a freshly generated boundary
    #[must_use]
    pub fn encode(&self, file: &MultipartFile) -> MultipartBody {
        self.encode_with_boundary(file, generate_boundary())
    }

    /// Encodes `file` with a caller supplied boundary
    #[must_use]
    pub fn encode_with_boundary(&self, file: &MultipartFile, boundary: String) -> MultipartBody {
        let mut body = Vec::with_capacity(file.content.len() * 4 / 3 + 256);

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                escape_quoted(&file.upload_filename())
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n", file.mime_type()).as_bytes());
        body.extend_from_slice(b"Content-Transfer-Encoding: binary\r\n\r\n");
        match self.encoding {
            PayloadEncoding::Base64 => {
                body.extend_from_slice(wrapped_base64(&file.content).as_bytes());
            }
            PayloadEncoding::Raw => body.extend_from_slice(&file.content),
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{boundary}--\r\n\r\n").as_bytes());

        MultipartBody { boundary, body }
    }
}

/// Generates a boundary: a fixed namespace followed by two random 32-bit hex groups
#[must_use]
pub fn generate_boundary() -> String {
    format!(
        "{BOUNDARY_PREFIX}{:08x}{:08x}",
        rand::random::<u32>(),
        rand::random::<u32>()
    )
}

fn wrapped_base64(content: &[u8]) -> String {
    let encoded = STANDARD.encode(content);
    encoded
        .as_bytes()
        .chunks(BASE64_LINE_LENGTH)
        // base64 output is ASCII
        .map(|line| std::str::from_utf8(line).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\r\n")
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}
