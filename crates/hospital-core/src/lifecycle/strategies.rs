use crate::errors::{HospitalError, Result};
use crate::model::{AppointmentStatus, StatusAction};

/// Behaviour of one appointment status
///
/// Default methods reject every action; each strategy overrides only the
/// transitions its status allows.
pub trait StatusStrategy {
    /// Status this strategy governs
    fn status(&self) -> AppointmentStatus;

    /// # Errors
    /// `InvalidTransition` unless the status can move forward.
    fn advance(&self) -> Result<AppointmentStatus> {
        Err(self.reject(StatusAction::Advance))
    }

    /// # Errors
    /// `InvalidTransition` unless the status can be cancelled.
    fn cancel(&self) -> Result<AppointmentStatus> {
        Err(self.reject(StatusAction::Cancel))
    }

    /// # Errors
    /// `InvalidTransition` unless the status can be marked as no-show.
    fn mark_no_show(&self) -> Result<AppointmentStatus> {
        Err(self.reject(StatusAction::NoShow))
    }

    fn reject(&self, action: StatusAction) -> HospitalError {
        HospitalError::InvalidTransition {
            from: self.status(),
            action,
        }
    }
}

/// SCHEDULED: may start, be cancelled or be marked as no-show
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduledStrategy;

impl StatusStrategy for ScheduledStrategy {
    fn status(&self) -> AppointmentStatus {
        AppointmentStatus::Scheduled
    }

    fn advance(&self) -> Result<AppointmentStatus> {
        Ok(AppointmentStatus::InProgress)
    }

    fn cancel(&self) -> Result<AppointmentStatus> {
        Ok(AppointmentStatus::Cancelled)
    }

    fn mark_no_show(&self) -> Result<AppointmentStatus> {
        Ok(AppointmentStatus::NoShow)
    }
}

/// IN_PROGRESS: may only complete
#[derive(Debug, Clone, Copy, Default)]
pub struct InProgressStrategy;

impl StatusStrategy for InProgressStrategy {
    fn status(&self) -> AppointmentStatus {
        AppointmentStatus::InProgress
    }

    fn advance(&self) -> Result<AppointmentStatus> {
        Ok(AppointmentStatus::Completed)
    }
}

/// COMPLETED, CANCELLED and NO_SHOW accept no action
#[derive(Debug, Clone, Copy)]
pub struct TerminalStrategy(pub AppointmentStatus);

impl StatusStrategy for TerminalStrategy {
    fn status(&self) -> AppointmentStatus {
        self.0
    }
}

/// Strategy governing `status`
pub fn strategy_for(status: AppointmentStatus) -> Box<dyn StatusStrategy> {
    match status {
        AppointmentStatus::Scheduled => Box::new(ScheduledStrategy),
        AppointmentStatus::InProgress => Box::new(InProgressStrategy),
        AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow => {
            Box::new(TerminalStrategy(status))
        }
    }
}
