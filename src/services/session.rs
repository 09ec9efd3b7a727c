//! In-progress booking state and pricing

use chrono::NaiveDate;

use crate::{
    catalog,
    models::{
        booking::{BookingSelection, SubmissionPhase, Timeslot},
        experience::{Experience, ExperienceId, VisitorCategory},
    },
};

/// Single source of truth for one visitor's booking.
///
/// Every mutation keeps `adults >= 1` and `children >= 0`; the total is
/// derived on each read and never stored.
#[derive(Debug, Clone)]
pub struct BookingSession {
    selection: BookingSelection,
    phase: SubmissionPhase,
}

impl BookingSession {
    /// Fresh session: first experience, `today`, first timeslot, one adult
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selection: Self::defaults(today),
            phase: SubmissionPhase::Idle,
        }
    }

    fn defaults(today: NaiveDate) -> BookingSelection {
        BookingSelection {
            experience: catalog::default_experience().id,
            date: today,
            timeslot: Timeslot::first(),
            adults: 1,
            children: 0,
            visitor_name: String::new(),
        }
    }

    /// Replace the selection wholesale with fresh defaults
    pub fn restart(&mut self, today: NaiveDate) {
        self.selection = Self::defaults(today);
        self.phase = SubmissionPhase::Idle;
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SubmissionPhase::Idle
    }

    /// Experience the selection points at
    pub fn experience(&self) -> &'static Experience {
        catalog::find(self.selection.experience).unwrap_or_else(catalog::default_experience)
    }

    /// No-op when `id` is missing from the catalog
    pub fn select_experience(&mut self, id: ExperienceId) {
        if catalog::find(id).is_some() {
            self.selection.experience = id;
        } else {
            tracing::debug!("Ignoring unknown experience {}", id);
        }
    }

    /// Callers reject past dates; the session stores what it is given
    pub fn set_date(&mut self, date: NaiveDate) {
        self.selection.date = date;
    }

    pub fn set_timeslot(&mut self, timeslot: Timeslot) {
        self.selection.timeslot = timeslot;
    }

    pub fn set_visitor_name(&mut self, name: impl Into<String>) {
        self.selection.visitor_name = name.into();
    }

    /// Apply `delta` and clamp at the category floor. Never fails.
    pub fn adjust_count(&mut self, category: VisitorCategory, delta: i64) {
        let current = i64::from(self.selection.count(category));
        let next = current
            .saturating_add(delta)
            .clamp(i64::from(category.floor()), i64::from(u32::MAX)) as u32;

        match category {
            VisitorCategory::Adult => self.selection.adults = next,
            VisitorCategory::Child => self.selection.children = next,
        }
    }

    pub fn compute_total(&self) -> u64 {
        self.experience()
            .prices
            .total(self.selection.adults, self.selection.children)
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
    }
}
