use crate::errors::{HospitalError, Result};
use crate::ops::Store;

use super::invariants;

/// Validate referential integrity of the whole store
///
/// Checks, in order:
/// 1. Department ↔ hospital membership
/// 2. Room ↔ department membership
/// 3. Doctor ↔ department assignment and matching specialty
/// 4. Patient ↔ record pairing and hospital admission
/// 5. Appointment references
/// 6. Unique DNIs per role and unique room numbers
///
/// # Errors
/// `IntegrityViolation` describing the first problem found.
pub fn validate_store(store: &Store) -> Result<()> {
    let checks: [fn(&Store) -> Vec<String>; 6] = [
        invariants::find_department_membership_violations,
        invariants::find_room_membership_violations,
        invariants::find_doctor_assignment_violations,
        invariants::find_patient_violations,
        invariants::find_dangling_appointments,
        invariants::find_duplicate_keys,
    ];

    for check in checks {
        if let Some(reason) = check(store).into_iter().next() {
            return Err(HospitalError::IntegrityViolation { reason });
        }
    }
    Ok(())
}
