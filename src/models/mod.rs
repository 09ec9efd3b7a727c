//! Data models for the booking server

pub mod booking;
pub mod experience;
pub mod notification;

pub use booking::{BookingSelection, SubmissionPhase, SubmissionReceipt, Timeslot};
pub use experience::{Experience, ExperienceId, PriceTable, VisitorCategory};
pub use notification::{BookingLogEntry, HandoffMessage};
