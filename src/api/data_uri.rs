//! `data:<mime>;base64,<payload>` image references.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::str::FromStr;

/// Mime type assumed when the model omits one.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    /// Base64 text, kept as received
    pub payload: String,
}

impl DataUri {
    pub fn new(mime_type: Option<&str>, payload: impl Into<String>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);
        Self {
            mime_type: mime_type.to_string(),
            payload: payload.into(),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.payload.as_bytes())
    }

    /// Size of the decoded image, or `None` if the payload is not valid base64.
    pub fn decoded_len(&self) -> Option<usize> {
        self.decode().ok().map(|bytes| bytes.len())
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a base64 data URI")]
pub struct DataUriParseError;

impl FromStr for DataUri {
    type Err = DataUriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("data:").ok_or(DataUriParseError)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriParseError)?;
        let mime_type = header.strip_suffix(";base64").ok_or(DataUriParseError)?;
        if mime_type.is_empty() {
            return Err(DataUriParseError);
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }
}

/// Human-readable byte count for captions.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}
