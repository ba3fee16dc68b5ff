//! Image generation API
//!
//! # Module Structure
//!
//! - `gemini` - Gemini generateContent client
//! - `data_uri` - data URI formatting and decoding
//! - `http_client` - reqwest client construction

pub mod data_uri;
pub mod gemini;
pub mod http_client;

use async_trait::async_trait;

use crate::catalog::Style;
use crate::utils::error::GenerationError;

pub use data_uri::DataUri;
pub use gemini::GeminiClient;

/// Produces one image per call for a style.
///
/// Implementations make exactly one outbound attempt per call: no retries,
/// no caching. The returned string is a displayable image reference,
/// normally a `data:` URI.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, style: Style) -> Result<String, GenerationError>;
}
