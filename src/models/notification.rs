//! Write-once artifacts produced by a submission

use chrono::NaiveDate;
use serde::Serialize;

use super::{booking::BookingSelection, experience::Experience};

const DIVIDER: &str = "----------------------------";

/// Row posted to the spreadsheet collector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLogEntry {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor_name: Option<String>,
    /// Experience display name
    pub attraction: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub adults: u32,
    pub children: u32,
    pub total_price: u64,
    pub status: String,
}

/// Human-readable confirmation handed to the messaging app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffMessage {
    text: String,
}

impl HandoffMessage {
    /// Assemble the multi-line confirmation. The name line appears only when
    /// names are collected.
    pub fn compose(
        selection: &BookingSelection,
        experience: &Experience,
        total: u64,
        currency: &str,
        include_name: bool,
    ) -> Self {
        let mut lines = vec![
            "Hello Sepilok Admin! I would like to book a visit:".to_string(),
            DIVIDER.to_string(),
        ];
        if include_name {
            lines.push(format!("👤 Name: {}", selection.visitor_name.trim()));
        }
        lines.push(format!("🌿 Attraction: {}", experience.name));
        lines.push(format!("📅 Date: {}", selection.date.format("%Y-%m-%d")));
        lines.push(format!("🕐 Time: {}", selection.timeslot));
        lines.push(format!(
            "👥 Visitors: {} Adult(s), {} Child(ren)",
            selection.adults, selection.children
        ));
        lines.push(format!("💰 Total: {} {}", currency, total));
        lines.push(DIVIDER.to_string());
        lines.push("Please confirm availability. Thank you!".to_string());

        Self { text: lines.join("\n") }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `https://<domain>/<recipient>?text=<percent-encoded message>`
    pub fn deep_link(&self, domain: &str, recipient: &str) -> String {
        format!(
            "https://{}/{}?text={}",
            domain,
            recipient,
            urlencoding::encode(&self.text)
        )
    }
}
