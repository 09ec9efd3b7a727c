//! Submission flow: validate, log the attempt, hand off to the messaging app

use chrono::{DateTime, Local};
use std::sync::Arc;

use super::{notify::BookingLogger, session::BookingSession};
use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::{SubmissionPhase, SubmissionReceipt},
        notification::{BookingLogEntry, HandoffMessage},
    },
};

pub const NAME_REQUIRED_PROMPT: &str = "Please enter your name before booking.";

/// Snapshot taken while the session is locked in `Submitting`
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub entry: BookingLogEntry,
    pub message: HandoffMessage,
}

/// Runs the two outbound effects of a booking in a fixed order.
#[derive(Clone)]
pub struct Submitter {
    logger: Arc<dyn BookingLogger>,
    messaging_domain: String,
    recipient: String,
    status_label: String,
    currency: String,
    require_visitor_name: bool,
}

impl Submitter {
    pub fn new(config: &BookingConfig, logger: Arc<dyn BookingLogger>) -> Self {
        Self {
            logger,
            messaging_domain: config.messaging_domain.clone(),
            recipient: config.recipient.clone(),
            status_label: config.status_label.clone(),
            currency: config.currency.clone(),
            require_visitor_name: config.require_visitor_name,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn requires_visitor_name(&self) -> bool {
        self.require_visitor_name
    }

    /// Validate and move the session into `Submitting`.
    ///
    /// A blank name (when names are collected) returns the session to `Idle`
    /// and yields a validation error; nothing is sent in that case.
    pub fn prepare(
        &self,
        session: &mut BookingSession,
        now: DateTime<Local>,
    ) -> AppResult<PreparedSubmission> {
        if !session.is_idle() {
            return Err(AppError::Conflict(
                "A submission is already in progress".to_string(),
            ));
        }

        session.set_phase(SubmissionPhase::Validating);
        let selection = session.selection();

        if self.require_visitor_name && selection.visitor_name.trim().is_empty() {
            session.set_phase(SubmissionPhase::Idle);
            return Err(AppError::Validation(NAME_REQUIRED_PROMPT.to_string()));
        }

        let experience = session.experience();
        let total = session.compute_total();

        let entry = BookingLogEntry {
            timestamp: now.to_rfc3339(),
            visitor_name: self
                .require_visitor_name
                .then(|| selection.visitor_name.trim().to_string()),
            attraction: experience.name.clone(),
            date: selection.date,
            time_slot: selection.timeslot.to_string(),
            adults: selection.adults,
            children: selection.children,
            total_price: total,
            status: self.status_label.clone(),
        };
        let message = HandoffMessage::compose(
            selection,
            experience,
            total,
            &self.currency,
            self.require_visitor_name,
        );

        session.set_phase(SubmissionPhase::Submitting);
        Ok(PreparedSubmission { entry, message })
    }

    /// Log the attempt, then build the handoff link.
    ///
    /// The link is produced whatever the log outcome; a failed log is only
    /// reported through tracing and `logged`.
    pub async fn dispatch(&self, prepared: PreparedSubmission) -> SubmissionReceipt {
        let logged = match self.logger.log(&prepared.entry).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Booking log not delivered: {}", e);
                false
            }
        };

        SubmissionReceipt {
            handoff_url: prepared
                .message
                .deep_link(&self.messaging_domain, &self.recipient),
            message: prepared.message.text().to_string(),
            logged,
        }
    }

    /// Return the session to `Idle` once the flow is over
    pub fn finish(&self, session: &mut BookingSession) {
        session.set_phase(SubmissionPhase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::experience::{ExperienceId, VisitorCategory},
        services::notify::{MockBookingLogger, NotifyError},
    };
    use chrono::NaiveDate;
    use std::time::Duration;

    fn session() -> BookingSession {
        let mut session = BookingSession::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        session.select_experience(ExperienceId::Orangutan);
        session.adjust_count(VisitorCategory::Adult, 1);
        session.adjust_count(VisitorCategory::Child, 1);
        session
    }

    fn submitter(logger: MockBookingLogger, require_visitor_name: bool) -> Submitter {
        let config = BookingConfig {
            require_visitor_name,
            ..BookingConfig::default()
        };
        Submitter::new(&config, Arc::new(logger))
    }

    #[tokio::test]
    async fn test_whitespace_name_aborts_without_calls() {
        let mut logger = MockBookingLogger::new();
        logger.expect_log().times(0);
        let submitter = submitter(logger, true);

        let mut session = session();
        session.set_visitor_name(" ");

        let result = submitter.prepare(&mut session, Local::now());
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, NAME_REQUIRED_PROMPT),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
        assert_eq!(session.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_name_not_required_skips_validation() {
        let mut logger = MockBookingLogger::new();
        logger.expect_log().times(1).returning(|_| Ok(()));
        let submitter = submitter(logger, false);

        let mut session = session();
        let prepared = submitter.prepare(&mut session, Local::now()).unwrap();
        assert!(prepared.entry.visitor_name.is_none());

        let receipt = submitter.dispatch(prepared).await;
        assert!(receipt.logged);
        assert!(!receipt.message.contains("Name:"));
    }

    #[tokio::test]
    async fn test_successful_submission_logs_snapshot() {
        let mut logger = MockBookingLogger::new();
        logger
            .expect_log()
            .withf(|entry| {
                entry.attraction == "Orangutan Sanctuary"
                    && entry.adults == 2
                    && entry.children == 1
                    && entry.total_price == 75
                    && entry.visitor_name.as_deref() == Some("Aminah")
                    && entry.status == "Pending WhatsApp Confirmation"
            })
            .times(1)
            .returning(|_| Ok(()));
        let submitter = submitter(logger, true);

        let mut session = session();
        session.set_visitor_name("Aminah");

        let prepared = submitter.prepare(&mut session, Local::now()).unwrap();
        assert_eq!(session.phase(), SubmissionPhase::Submitting);

        let receipt = submitter.dispatch(prepared).await;
        submitter.finish(&mut session);

        assert!(receipt.logged);
        assert!(receipt.handoff_url.starts_with("https://wa.me/60123109793?text="));
        assert!(receipt.message.contains("💰 Total: RM 75"));
        assert_eq!(session.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_failed_log_still_hands_off_same_link() {
        let mut ok_logger = MockBookingLogger::new();
        ok_logger.expect_log().returning(|_| Ok(()));
        let mut failing_logger = MockBookingLogger::new();
        failing_logger
            .expect_log()
            .times(1)
            .returning(|_| Err(NotifyError::Timeout(Duration::from_secs(10))));

        let now = Local::now();
        let mut session = session();
        session.set_visitor_name("Aminah");

        let ok = submitter(ok_logger, true);
        let prepared = ok.prepare(&mut session, now).unwrap();
        let ok_receipt = ok.dispatch(prepared).await;
        ok.finish(&mut session);

        let failing = submitter(failing_logger, true);
        let prepared = failing.prepare(&mut session, now).unwrap();
        let failed_receipt = failing.dispatch(prepared).await;
        failing.finish(&mut session);

        assert!(ok_receipt.logged);
        assert!(!failed_receipt.logged);
        assert_eq!(ok_receipt.handoff_url, failed_receipt.handoff_url);
        assert_eq!(ok_receipt.message, failed_receipt.message);
    }

    #[test]
    fn test_second_prepare_while_submitting_conflicts() {
        let submitter = submitter(MockBookingLogger::new(), true);
        let mut session = session();
        session.set_visitor_name("Aminah");

        assert!(submitter.prepare(&mut session, Local::now()).is_ok());
        assert!(matches!(
            submitter.prepare(&mut session, Local::now()),
            Err(AppError::Conflict(_))
        ));
    }
}
