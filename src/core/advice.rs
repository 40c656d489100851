use crate::core::registry::BRANCHES;
use crate::domain::model::{AdviceRequest, AdviceResponse, Branch, Citation, Coordinate};
use crate::domain::ports::{AdviceService, ConfigProvider};
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Gemini generateContent wire types. Only the fields this client reads or writes.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_maps: GoogleMaps,
}

#[derive(Debug, Serialize)]
struct GoogleMaps {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: Coordinate,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    maps: Option<GroundingSource>,
    web: Option<GroundingSource>,
}

#[derive(Debug, Deserialize)]
struct GroundingSource {
    uri: Option<String>,
    title: Option<String>,
}

/// Builds the prompt sent to the model. The coordinate and distance hint are
/// copied in as given; the model decides what to do with them.
pub fn build_prompt(request: &AdviceRequest, branches: &[Branch]) -> String {
    let mut prompt = String::from(
        "You are a referral assistant for a dental clinic group in Malaysia. \
         Our branches are:\n",
    );

    for branch in branches {
        prompt.push_str(&format!(
            "- {} | {}, {} | lat {}, lng {}",
            branch.name,
            branch.address,
            branch.city,
            branch.coordinate.latitude,
            branch.coordinate.longitude
        ));
        if let Some(transport) = branch.transport {
            prompt.push_str(&format!(" | transit: {}", transport));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("\nPatient location: {}\n", request.query.trim()));
    if let Some(coordinate) = request.coordinate {
        prompt.push_str(&format!(
            "Patient coordinates: {}, {}\n",
            coordinate.latitude, coordinate.longitude
        ));
    }
    if let Some(hint) = &request.distance_hint {
        prompt.push_str(&format!("Straight-line distance to nearest branch: {}\n", hint));
    }

    prompt.push_str(
        "\nIdentify the single nearest branch and reply with at most six short lines, \
         one fact per line: the branch name, approximate distance in km, driving time and route, \
         public transport options (LRT/MRT/KTM/bus), and the full branch address.",
    );
    prompt
}

/// Picks the branch whose area name appears first in the message.
pub fn find_recommendation(message: &str, branches: &[Branch]) -> Option<String> {
    let lower = message.to_lowercase();
    branches
        .iter()
        .filter_map(|branch| {
            lower
                .find(&branch.area().to_lowercase())
                .map(|position| (position, branch))
        })
        .min_by_key(|(position, _)| *position)
        .map(|(_, branch)| branch.name.to_string())
}

#[derive(Debug, Clone)]
pub struct GeminiAdviceClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    branches: &'static [Branch],
}

impl GeminiAdviceClient {
    pub fn new(endpoint: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        validate_non_empty_string("advice.model", model)?;
        validate_non_empty_string("advice.api_key", api_key)?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            branches: BRANCHES,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config.api_key();
        let api_key = validate_required_field("advice.api_key", &api_key)?;
        Self::new(
            config.advice_endpoint(),
            config.model(),
            api_key,
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn build_body(&self, request: &AdviceRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: Some(build_prompt(request, self.branches)),
                }],
            }],
            tools: vec![Tool {
                google_maps: GoogleMaps {},
            }],
            tool_config: request.coordinate.map(|lat_lng| ToolConfig {
                retrieval_config: RetrievalConfig { lat_lng },
            }),
        }
    }

    fn parse_response(&self, body: &str) -> Result<AdviceResponse> {
        let parsed: GenerateContentResponse =
            serde_json::from_str(body).map_err(|e| LocatorError::MalformedAdviceResponse {
                message: e.to_string(),
            })?;

        let candidate = parsed.candidates.into_iter().next().ok_or_else(|| {
            LocatorError::MalformedAdviceResponse {
                message: "response contained no candidates".to_string(),
            }
        })?;

        let message: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(LocatorError::MalformedAdviceResponse {
                message: "candidate contained no text".to_string(),
            });
        }

        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.maps.or(chunk.web))
                    .filter_map(|source| {
                        let uri = source.uri?;
                        Some(Citation {
                            title: source.title.unwrap_or_else(|| uri.clone()),
                            uri,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(AdviceResponse {
            recommendation: find_recommendation(&message, self.branches),
            message,
            citations,
        })
    }
}

#[async_trait]
impl AdviceService for GeminiAdviceClient {
    async fn request_advice(&self, request: &AdviceRequest) -> Result<AdviceResponse> {
        let body = self.build_body(request);

        tracing::debug!("Making advice request to: {}", self.url());
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Advice response status: {}", status);
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LocatorError::AdviceServiceError {
                status: status.as_u16(),
                body: text,
            });
        }

        let advice = self.parse_response(&text)?;
        tracing::debug!(
            "Advice received: {} chars, {} citations",
            advice.message.len(),
            advice.citations.len()
        );
        Ok(advice)
    }
}

/// Stands in for the AI service when it is switched off or could not be configured.
/// Every request fails with the stored reason.
#[derive(Debug, Clone)]
pub struct UnavailableAdvice {
    reason: String,
}

impl UnavailableAdvice {
    pub fn offline() -> Self {
        Self {
            reason: "advice service is disabled (offline mode)".to_string(),
        }
    }

    pub fn from_error(error: &LocatorError) -> Self {
        Self {
            reason: error.to_string(),
        }
    }
}

#[async_trait]
impl AdviceService for UnavailableAdvice {
    async fn request_advice(&self, _request: &AdviceRequest) -> Result<AdviceResponse> {
        Err(LocatorError::AdviceRequestFailed {
            message: self.reason.clone(),
        })
    }
}
