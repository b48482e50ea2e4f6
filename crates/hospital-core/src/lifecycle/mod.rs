//! Appointment status lifecycle
//!
//! Each status has a strategy deciding what `advance`, `cancel` and
//! `no_show` do from that status:
//!
//! | from        | advance     | cancel    | no_show |
//! |-------------|-------------|-----------|---------|
//! | SCHEDULED   | IN_PROGRESS | CANCELLED | NO_SHOW |
//! | IN_PROGRESS | COMPLETED   | error     | error   |
//! | terminal    | error       | error     | error   |

pub mod strategies;

pub use strategies::{
    strategy_for, InProgressStrategy, ScheduledStrategy, StatusStrategy, TerminalStrategy,
};

use crate::errors::Result;
use crate::model::{AppointmentStatus, StatusAction};

/// Status reached by applying `action` from `from`
///
/// # Errors
/// `InvalidTransition` if the action is not allowed from `from`.
pub fn next_status(from: AppointmentStatus, action: StatusAction) -> Result<AppointmentStatus> {
    let strategy = strategy_for(from);
    match action {
        StatusAction::Advance => strategy.advance(),
        StatusAction::Cancel => strategy.cancel(),
        StatusAction::NoShow => strategy.mark_no_show(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HospitalError;
    use AppointmentStatus::{Cancelled, Completed, InProgress, NoShow, Scheduled};
    use StatusAction::{Advance, Cancel};

    const SKIP: StatusAction = StatusAction::NoShow;

    #[test]
    fn test_transition_table() {
        let table = [
            (Scheduled, Advance, Some(InProgress)),
            (Scheduled, Cancel, Some(Cancelled)),
            (Scheduled, SKIP, Some(NoShow)),
            (InProgress, Advance, Some(Completed)),
            (InProgress, Cancel, None),
            (InProgress, SKIP, None),
            (Completed, Advance, None),
            (Completed, Cancel, None),
            (Completed, SKIP, None),
            (Cancelled, Advance, None),
            (Cancelled, Cancel, None),
            (Cancelled, SKIP, None),
            (NoShow, Advance, None),
            (NoShow, Cancel, None),
            (NoShow, SKIP, None),
        ];

        for (from, action, expected) in table {
            match (next_status(from, action), expected) {
                (Ok(got), Some(want)) => assert_eq!(got, want, "{} {}", from, action),
                (Err(HospitalError::InvalidTransition { from: f, action: a }), None) => {
                    assert_eq!((f, a), (from, action));
                }
                (other, _) => panic!("{} {} gave {:?}", from, action, other),
            }
        }
    }
}
