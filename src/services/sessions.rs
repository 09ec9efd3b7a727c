//! Live booking sessions kept in memory

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::session::BookingSession;
use crate::{
    error::{AppError, AppResult},
    models::booking::SubmissionPhase,
};

type SessionMap = Arc<RwLock<HashMap<Uuid, (BookingSession, Instant)>>>;

/// Sessions are never persisted; a restart of the server starts everyone over.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: SessionMap,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: BookingSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, (session, Instant::now()));
        id
    }

    /// Clone of the current session state
    pub async fn get(&self, id: Uuid) -> AppResult<BookingSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|(session, _)| session.clone())
            .ok_or_else(|| not_found(id))
    }

    /// Run `f` against the session under the write lock
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingSession) -> AppResult<R>,
    ) -> AppResult<R> {
        let mut sessions = self.sessions.write().await;
        let (session, touched) = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        *touched = Instant::now();
        f(session)
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Release sessions stuck mid-submission for longer than `max_submitting`,
    /// then drop idle sessions untouched for `max_idle`
    pub async fn evict_idle(&self, max_idle: Duration, max_submitting: Duration) -> usize {
        let mut sessions = self.sessions.write().await;

        for (id, (session, touched)) in sessions.iter_mut() {
            if !session.is_idle() && touched.elapsed() >= max_submitting {
                tracing::warn!("Releasing session {} stuck in {:?}", id, session.phase());
                session.set_phase(SubmissionPhase::Idle);
            }
        }

        let before = sessions.len();
        sessions.retain(|_, (session, touched)| !session.is_idle() || touched.elapsed() < max_idle);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle sessions ({} remain)", evicted, sessions.len());
        }
        evicted
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Booking session {} not found", id))
}
