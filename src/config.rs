//! Configuration management for the Sepilok booking server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::catalog;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Booking form and outbound notification settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    /// Host of the messaging deep link (`https://<domain>/<recipient>?text=...`)
    pub messaging_domain: String,
    /// Messaging recipient that receives the prefilled confirmation
    pub recipient: String,
    /// Spreadsheet collector receiving the booking log entry
    pub webhook_url: String,
    pub webhook_timeout_seconds: u64,
    /// Status label stamped on every logged attempt
    pub status_label: String,
    pub currency: String,
    /// Ask for (and require) the visitor's name before submission
    pub require_visitor_name: bool,
    /// Issue the travel-tip call alongside the wildlife fact
    pub travel_tips: bool,
    /// Sessions untouched for this long are evicted
    pub session_idle_minutes: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub fact_temperature: f32,
    pub tip_temperature: f32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // SEPILOK_BOOKING__WEBHOOK_URL, SEPILOK_GEMINI__MODEL, ...
            .add_source(
                Environment::with_prefix("SEPILOK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "gemini.api_key",
                env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")).ok(),
            )?
            .set_override_option(
                "booking.webhook_url",
                env::var("BOOKING_WEBHOOK_URL").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            messaging_domain: catalog::MESSAGING_DOMAIN.to_string(),
            recipient: catalog::WHATSAPP_NUMBER.to_string(),
            webhook_url: catalog::WEBHOOK_URL.to_string(),
            webhook_timeout_seconds: 10,
            status_label: catalog::PENDING_STATUS.to_string(),
            currency: "RM".to_string(),
            require_visitor_name: true,
            travel_tips: true,
            session_idle_minutes: 60,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout_seconds: 15,
            fact_temperature: 0.7,
            tip_temperature: 0.5,
        }
    }
}
