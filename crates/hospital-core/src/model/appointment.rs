use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::person::require_text;
use super::{AppointmentStatus, Money};
use crate::errors::Result;

/// Longest accepted appointment notes (exclusive bound 1000)
pub const MAX_NOTES_CHARS: usize = 999;

/// An appointment between a patient and a doctor in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub room_id: String,
    pub scheduled_at: NaiveDateTime,
    pub cost: Money,
    pub status: AppointmentStatus,

    /// Free-form notes, empty by default
    pub notes: String,
}

impl Appointment {
    /// New SCHEDULED appointment with empty notes
    pub fn new(
        id: String,
        patient_id: String,
        doctor_id: String,
        room_id: String,
        scheduled_at: NaiveDateTime,
        cost: Money,
    ) -> Self {
        Self {
            id,
            patient_id,
            doctor_id,
            room_id,
            scheduled_at,
            cost,
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder form of `set_notes`; empty notes are kept as-is
    ///
    /// # Errors
    /// `InvalidInput` if non-empty notes are blank or too long.
    pub fn with_notes(mut self, notes: String) -> Result<Self> {
        if !notes.is_empty() {
            self.set_notes(notes)?;
        }
        Ok(self)
    }

    /// Replace the notes
    ///
    /// # Errors
    /// `InvalidInput` if the notes are blank or reach 1000 characters.
    pub fn set_notes(&mut self, notes: String) -> Result<()> {
        require_text("notes", &notes, MAX_NOTES_CHARS)?;
        self.notes = notes;
        Ok(())
    }

    /// True if this appointment holds its slot and starts less than
    /// `window_minutes` away from `at`
    pub fn conflicts_with(&self, at: NaiveDateTime, window_minutes: i64) -> bool {
        self.status.is_active()
            && (self.scheduled_at - at).num_seconds().abs() < window_minutes * 60
    }
}
