//! Booking service: the form-facing operations on live sessions

use chrono::{Local, NaiveDate};
use std::{sync::Arc, time::Duration};
use uuid::Uuid;

use super::{
    notify::BookingLogger,
    session::BookingSession,
    sessions::SessionStore,
    submission::Submitter,
};
use crate::{
    catalog,
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::{QuoteResponse, SessionView, SubmissionReceipt, Timeslot},
        experience::{ExperienceId, VisitorCategory},
    },
};

#[derive(Clone)]
pub struct BookingService {
    store: SessionStore,
    submitter: Submitter,
    session_idle: Duration,
    stale_submission: Duration,
}

/// Extra time past the webhook timeout before a submission counts as stuck
const SUBMISSION_GRACE: Duration = Duration::from_secs(30);

impl BookingService {
    pub fn new(config: &BookingConfig, logger: Arc<dyn BookingLogger>) -> Self {
        Self {
            store: SessionStore::new(),
            submitter: Submitter::new(config, logger),
            session_idle: Duration::from_secs(config.session_idle_minutes * 60),
            stale_submission: Duration::from_secs(config.webhook_timeout_seconds) + SUBMISSION_GRACE,
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn currency(&self) -> &str {
        self.submitter.currency()
    }

    pub fn requires_visitor_name(&self) -> bool {
        self.submitter.requires_visitor_name()
    }

    fn view(&self, id: Uuid, session: &BookingSession) -> SessionView {
        let selection = session.selection();
        SessionView {
            id,
            experience: selection.experience,
            experience_name: session.experience().name.clone(),
            date: selection.date,
            timeslot: selection.timeslot,
            adults: selection.adults,
            children: selection.children,
            visitor_name: selection.visitor_name.clone(),
            total: session.compute_total(),
            currency: self.currency().to_string(),
            phase: session.phase(),
        }
    }

    pub async fn create_session(&self) -> SessionView {
        let session = BookingSession::new(Self::today());
        let id = self.store.insert(session.clone()).await;
        tracing::info!("Booking session {} started", id);
        self.view(id, &session)
    }

    pub async fn get_session(&self, id: Uuid) -> AppResult<SessionView> {
        let session = self.store.get(id).await?;
        Ok(self.view(id, &session))
    }

    pub async fn end_session(&self, id: Uuid) -> AppResult<()> {
        self.store.remove(id).await?;
        tracing::info!("Booking session {} ended", id);
        Ok(())
    }

    /// Apply a form edit; refused while a submission is in flight
    async fn edit(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingSession),
    ) -> AppResult<SessionView> {
        self.store
            .update(id, |session| {
                if !session.is_idle() {
                    return Err(AppError::Conflict(
                        "Booking is being submitted; try again shortly".to_string(),
                    ));
                }
                f(session);
                Ok(self.view(id, session))
            })
            .await
    }

    pub async fn restart(&self, id: Uuid) -> AppResult<SessionView> {
        let today = Self::today();
        self.edit(id, |session| session.restart(today)).await
    }

    pub async fn select_experience(&self, id: Uuid, experience: ExperienceId) -> AppResult<SessionView> {
        self.edit(id, |session| session.select_experience(experience)).await
    }

    /// Past dates are rejected here, before they reach the session
    pub async fn set_date(&self, id: Uuid, date: NaiveDate) -> AppResult<SessionView> {
        if date < Self::today() {
            return Err(AppError::BadRequest(format!(
                "Visit date {} is in the past",
                date
            )));
        }
        self.edit(id, |session| session.set_date(date)).await
    }

    pub async fn set_timeslot(&self, id: Uuid, label: &str) -> AppResult<SessionView> {
        let timeslot = Timeslot::parse(label)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown timeslot: {}", label)))?;
        self.edit(id, |session| session.set_timeslot(timeslot)).await
    }

    pub async fn set_visitor_name(&self, id: Uuid, name: String) -> AppResult<SessionView> {
        self.edit(id, |session| session.set_visitor_name(name)).await
    }

    pub async fn adjust_count(
        &self,
        id: Uuid,
        category: VisitorCategory,
        delta: i64,
    ) -> AppResult<SessionView> {
        self.edit(id, |session| session.adjust_count(category, delta)).await
    }

    /// Price a selection without a session, using the same clamping rules
    pub fn quote(&self, experience: ExperienceId, adults: u32, children: u32) -> AppResult<QuoteResponse> {
        let entry = catalog::find(experience)
            .ok_or_else(|| AppError::NotFound(format!("Experience {} not found", experience)))?;
        let adults = adults.max(VisitorCategory::Adult.floor());

        Ok(QuoteResponse {
            experience,
            adults,
            children,
            total: entry.prices.total(adults, children),
            currency: self.currency().to_string(),
        })
    }

    /// Validate, log, hand off. The session is back in `Idle` afterwards,
    /// whatever the log outcome.
    ///
    /// Logging and handoff run on their own task, so the session is released
    /// even when the caller stops waiting.
    pub async fn submit(&self, id: Uuid) -> AppResult<SubmissionReceipt> {
        let now = Local::now();
        let prepared = self
            .store
            .update(id, |session| self.submitter.prepare(session, now))
            .await?;

        let service = self.clone();
        let receipt = tokio::spawn(async move {
            let receipt = service.submitter.dispatch(prepared).await;
            service.release(id).await;
            receipt
        })
        .await
        .map_err(|e| AppError::Internal(format!("Submission task failed: {}", e)))?;

        tracing::info!(
            "Booking session {} submitted (logged: {})",
            id,
            receipt.logged
        );
        Ok(receipt)
    }

    async fn release(&self, id: Uuid) {
        // The session may have been ended meanwhile; the handoff stands either way
        if let Err(e) = self
            .store
            .update(id, |session| {
                self.submitter.finish(session);
                Ok(())
            })
            .await
        {
            tracing::debug!("Session vanished during submission: {}", e);
        }
    }

    /// Periodic cleanup of abandoned sessions
    pub async fn evict_idle_sessions(&self) -> usize {
        self.store
            .evict_idle(self.session_idle, self.stale_submission)
            .await
    }
}
