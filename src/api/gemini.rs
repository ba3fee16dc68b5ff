//! Gemini `generateContent` client for image generation
//!
//! One request per call: the style's prompt goes out as a single text part,
//! and the first inline image part in the reply comes back as a data URI.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::data_uri::DataUri;
use super::http_client::{create_image_client, ImageClientConfig};
use super::ImageGenerator;
use crate::catalog::{PromptCatalog, Style};
use crate::debug_module;
use crate::utils::config::Config;
use crate::utils::debug::DebugTimer;
use crate::utils::error::{GenerationError, UpstreamError};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    /// First inline image across all candidates and parts, in order.
    pub fn first_image(&self) -> Option<DataUri> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.inline_data.as_ref())
            .find_map(|inline| {
                let data = inline.data.as_deref().filter(|d| !d.is_empty())?;
                Some(DataUri::new(inline.mime_type.as_deref(), data))
            })
    }

    /// Short explanation of why no image came back, for the log.
    fn describe_empty(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {}", reason);
        }
        let reasons: Vec<&str> = self
            .candidates
            .iter()
            .filter_map(|c| c.finish_reason.as_deref())
            .collect();
        format!(
            "{} candidate(s), finish reasons: [{}]",
            self.candidates.len(),
            reasons.join(", ")
        )
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    catalog: Arc<PromptCatalog>,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        catalog: Arc<PromptCatalog>,
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = create_image_client(ImageClientConfig::with_timeout(timeout))?;
        Ok(Self {
            http,
            catalog,
            api_url: api_url.into(),
            model: model.into(),
            api_key,
        })
    }

    pub fn from_config(config: &Config, catalog: Arc<PromptCatalog>) -> Result<Self, reqwest::Error> {
        Self::new(
            catalog,
            config.api_url.clone(),
            config.model.clone(),
            config.api_key(),
            config.request_timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, prompt: &str) -> Result<GenerateContentResponse, UpstreamError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let mut request = self.http.post(self.endpoint()).json(&body);
        // A missing key is left for the service to reject
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(UpstreamError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, style: Style) -> Result<String, GenerationError> {
        let entry = self
            .catalog
            .get(style)
            .ok_or_else(|| GenerationError::InvalidStyle(style.to_string()))?;

        debug_module!("API", "POST {} ({})", self.endpoint(), style);
        let timer = DebugTimer::new(format!("generateContent[{}]", style.key()));

        let response = self.send(&entry.prompt).await.map_err(|e| {
            crate::utils::logger::error(&format!("Gemini request for {} failed: {}", style, e));
            GenerationError::UpstreamFailure(e)
        })?;
        timer.finish();

        match response.first_image() {
            Some(uri) => Ok(uri.to_string()),
            None => {
                crate::utils::logger::warn(&format!(
                    "Gemini returned no image for {}: {}",
                    style,
                    response.describe_empty()
                ));
                Err(GenerationError::NoImageInResponse)
            }
        }
    }
}
