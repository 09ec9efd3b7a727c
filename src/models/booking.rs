//! Booking selection model and session request/response types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::experience::{ExperienceId, VisitorCategory};
use crate::catalog::TIME_SLOTS;

/// One of the fixed visit timeslots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Timeslot(&'static str);

impl Timeslot {
    /// Resolve a timeslot label; anything outside the fixed set is rejected
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        TIME_SLOTS.into_iter().find(|slot| *slot == label).map(Timeslot)
    }

    pub fn first() -> Self {
        Timeslot(TIME_SLOTS[0])
    }

    pub fn all() -> impl Iterator<Item = Timeslot> {
        TIME_SLOTS.into_iter().map(Timeslot)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl TryFrom<String> for Timeslot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timeslot::parse(&value).ok_or_else(|| format!("Unknown timeslot: {}", value))
    }
}

impl Serialize for Timeslot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// In-progress choices of one visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSelection {
    pub experience: ExperienceId,
    pub date: NaiveDate,
    pub timeslot: Timeslot,
    /// Lead visitors; never below one
    pub adults: u32,
    pub children: u32,
    /// May be empty while editing
    pub visitor_name: String,
}

impl BookingSelection {
    pub fn count(&self, category: VisitorCategory) -> u32 {
        match category {
            VisitorCategory::Adult => self.adults,
            VisitorCategory::Child => self.children,
        }
    }
}

/// Submission state machine: `Idle -> Validating -> Submitting -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Snapshot of a live session as seen by the page
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub id: Uuid,
    pub experience: ExperienceId,
    /// Display name of the selected experience
    pub experience_name: String,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:00 AM")]
    pub timeslot: Timeslot,
    pub adults: u32,
    pub children: u32,
    pub visitor_name: String,
    /// Derived total in whole currency units
    pub total: u64,
    pub currency: String,
    pub phase: SubmissionPhase,
}

/// Select experience request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectExperience {
    /// ORANGUTAN, SUNBEAR or COMBO
    pub experience: String,
}

/// Set visit date request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetDate {
    /// Visit date (YYYY-MM-DD), not earlier than today
    pub date: NaiveDate,
}

/// Set timeslot request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetTimeslot {
    #[schema(example = "11:00 AM")]
    pub timeslot: String,
}

/// Set visitor name request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetVisitorName {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    pub visitor_name: String,
}

/// Adjust visitor count request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustCount {
    pub category: VisitorCategory,
    /// Signed change, usually +1 or -1
    pub delta: i64,
}

/// Query parameters for a stateless price quote
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct QuoteQuery {
    pub experience: String,
    pub adults: Option<u32>,
    pub children: Option<u32>,
}

/// Stateless price quote
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub experience: ExperienceId,
    pub adults: u32,
    pub children: u32,
    pub total: u64,
    pub currency: String,
}

/// Outcome of a submission
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionReceipt {
    /// Messaging deep link the page opens in a new browsing context
    pub handoff_url: String,
    /// Plain confirmation text embedded in the link
    pub message: String,
    /// Whether the spreadsheet log was delivered (diagnostic only)
    pub logged: bool,
}
