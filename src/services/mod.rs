//! Business logic services

pub mod booking;
pub mod facts;
pub mod notify;
pub mod session;
pub mod sessions;
pub mod submission;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub booking: booking::BookingService,
    pub insights: facts::InsightsService,
}

impl Services {
    /// Wire the production collaborators (spreadsheet webhook, Gemini)
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let logger = Arc::new(notify::WebhookLogger::new(&config.booking));
        let provider = facts::GeminiClient::new(&config.gemini)
            .map_err(|e| AppError::Internal(format!("Failed to create Gemini client: {}", e)))?;

        if config.gemini.api_key.is_empty() {
            tracing::warn!("No Gemini API key configured; facts and tips will use fallbacks");
        }

        Ok(Self::with_collaborators(config, logger, Arc::new(provider)))
    }

    pub fn with_collaborators(
        config: &AppConfig,
        logger: Arc<dyn notify::BookingLogger>,
        provider: Arc<dyn facts::FactProvider>,
    ) -> Self {
        Self {
            booking: booking::BookingService::new(&config.booking, logger),
            insights: facts::InsightsService::new(
                provider,
                &config.gemini,
                config.booking.travel_tips,
            ),
        }
    }
}
