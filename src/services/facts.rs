//! Display-only wildlife facts and travel tips from a generative text service

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use thiserror::Error;

use crate::{config::GeminiConfig, models::experience::ExperienceId};

pub const FACT_EMPTY_FALLBACK: &str = "Nature is waiting to surprise you at Sepilok.";
pub const FACT_ERROR_FALLBACK: &str =
    "Remember to stay quiet and keep a safe distance from the wildlife for the best experience.";
pub const TIP_EMPTY_FALLBACK: &str = "Wear comfortable shoes and carry a reusable water bottle.";
pub const TIP_ERROR_FALLBACK: &str = "Bring a raincoat and insect repellent for the jungle.";

#[derive(Error, Debug)]
pub enum FactError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Text generation seam
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, FactError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(self) -> Result<String, FactError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| FactError::InvalidResponse("No candidates in response".to_string()))?;

        Ok(candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

/// Gemini `generateContent` client. One instance is shared for the life of
/// the process.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, FactError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FactProvider for GeminiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, FactError> {
        if self.api_key.is_empty() {
            return Err(FactError::MissingApiKey);
        }

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        tracing::debug!("Sending prompt to {} (temperature {})", url, temperature);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FactError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<GenerateResponse>(&text)
            .map_err(|e| FactError::InvalidResponse(e.to_string()))?
            .text()
    }
}

/// Fact and optional tip shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Insights {
    pub fact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Wraps a [`FactProvider`] so every call resolves to displayable text.
#[derive(Clone)]
pub struct InsightsService {
    provider: Arc<dyn FactProvider>,
    fact_temperature: f32,
    tip_temperature: f32,
    travel_tips: bool,
}

impl InsightsService {
    pub fn new(provider: Arc<dyn FactProvider>, config: &GeminiConfig, travel_tips: bool) -> Self {
        Self {
            provider,
            fact_temperature: config.fact_temperature,
            tip_temperature: config.tip_temperature,
            travel_tips,
        }
    }

    pub fn fact_prompt(experience: ExperienceId) -> String {
        format!(
            "Provide a single, fascinating, 20-word educational fact or tip for a tourist visiting {}. \
             Keep it engaging and nature-focused.",
            experience.location()
        )
    }

    pub fn tip_prompt(date: NaiveDate) -> String {
        format!(
            "Give a very brief (10 words) travel advice for visiting Sepilok, Borneo on {}. \
             Mention weather or gear.",
            date.format("%Y-%m-%d")
        )
    }

    pub async fn wildlife_fact(&self, experience: ExperienceId) -> String {
        let prompt = Self::fact_prompt(experience);
        resolve(
            "fact",
            self.provider.generate(&prompt, self.fact_temperature).await,
            FACT_EMPTY_FALLBACK,
            FACT_ERROR_FALLBACK,
        )
    }

    pub async fn travel_tip(&self, date: NaiveDate) -> String {
        let prompt = Self::tip_prompt(date);
        resolve(
            "tip",
            self.provider.generate(&prompt, self.tip_temperature).await,
            TIP_EMPTY_FALLBACK,
            TIP_ERROR_FALLBACK,
        )
    }

    /// Fact and tip issued together; the result is returned only once both
    /// have resolved.
    pub async fn insights(&self, experience: ExperienceId, date: NaiveDate) -> Insights {
        if self.travel_tips {
            let (fact, tip) = tokio::join!(self.wildlife_fact(experience), self.travel_tip(date));
            Insights { fact, tip: Some(tip) }
        } else {
            Insights {
                fact: self.wildlife_fact(experience).await,
                tip: None,
            }
        }
    }
}

fn resolve(
    kind: &str,
    result: Result<String, FactError>,
    empty_fallback: &str,
    error_fallback: &str,
) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => empty_fallback.to_string(),
        Err(e) => {
            tracing::warn!("Falling back for {}: {}", kind, e);
            error_fallback.to_string()
        }
    }
}
