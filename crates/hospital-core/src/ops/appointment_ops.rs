use chrono::NaiveDateTime;
use tracing::debug;
use uuid::Uuid;

use super::store::Store;
use crate::errors::{HospitalError, Result};
use crate::lifecycle;
use crate::model::{Appointment, AppointmentStatus, Money, StatusAction};

/// Minimum distance, in minutes, between two active appointments sharing a
/// doctor or a room
pub const AVAILABILITY_WINDOW_MINUTES: i64 = 120;

/// Schedule a new appointment
///
/// Checks run in this order and nothing is mutated when one fails:
/// 1. `scheduled_at` before `now` → `AppointmentInPast`
/// 2. cost not positive → `InvalidCost`
/// 3. doctor busy within the window → `DoctorUnavailable`
/// 4. room busy within the window → `RoomUnavailable`
/// 5. doctor specialty differs from the room's department → `SpecialtyMismatch`
///
/// # Errors
/// The errors above, plus `PatientNotFound`, `DoctorNotFound`,
/// `RoomNotFound` or `DepartmentNotFound` for unknown references.
pub fn schedule_appointment(
    store: &mut Store,
    patient_id: &str,
    doctor_id: &str,
    room_id: &str,
    scheduled_at: NaiveDateTime,
    cost: Money,
    now: NaiveDateTime,
) -> Result<String> {
    store.get_patient(patient_id)?;
    let doctor = store.get_doctor(doctor_id)?;
    let room = store.get_room(room_id)?;

    if scheduled_at < now {
        return Err(HospitalError::AppointmentInPast { scheduled_at });
    }
    if !cost.is_positive() {
        return Err(HospitalError::InvalidCost {
            cost: cost.to_string(),
        });
    }
    if !is_doctor_available(store, doctor_id, scheduled_at) {
        return Err(HospitalError::DoctorUnavailable {
            doctor_id: doctor_id.to_string(),
            scheduled_at,
        });
    }
    if !is_room_available(store, room_id, scheduled_at) {
        return Err(HospitalError::RoomUnavailable {
            room_id: room_id.to_string(),
            scheduled_at,
        });
    }

    let required = store.get_department(&room.department_id)?.specialty;
    if doctor.specialty != required {
        return Err(HospitalError::SpecialtyMismatch {
            doctor_specialty: doctor.specialty,
            required,
        });
    }

    let id = Uuid::now_v7().to_string();
    store.insert_appointment(Appointment::new(
        id.clone(),
        patient_id.to_string(),
        doctor_id.to_string(),
        room_id.to_string(),
        scheduled_at,
        cost,
    ));

    debug!(appointment_id = %id, %scheduled_at, "appointment scheduled");
    Ok(id)
}

/// True if the doctor has no active appointment within the window around `at`
pub fn is_doctor_available(store: &Store, doctor_id: &str, at: NaiveDateTime) -> bool {
    !store
        .appointments
        .values()
        .any(|a| a.doctor_id == doctor_id && a.conflicts_with(at, AVAILABILITY_WINDOW_MINUTES))
}

/// True if the room has no active appointment within the window around `at`
pub fn is_room_available(store: &Store, room_id: &str, at: NaiveDateTime) -> bool {
    !store
        .appointments
        .values()
        .any(|a| a.room_id == room_id && a.conflicts_with(at, AVAILABILITY_WINDOW_MINUTES))
}

fn sorted_by_time<'a>(mut items: Vec<&'a Appointment>) -> Vec<&'a Appointment> {
    items.sort_by(|a, b| {
        a.scheduled_at
            .cmp(&b.scheduled_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    items
}

/// Every appointment, ordered by time then id
pub fn all_appointments(store: &Store) -> Vec<&Appointment> {
    sorted_by_time(store.appointments.values().collect())
}

/// All appointments of a patient, cancelled ones included
///
/// # Errors
/// `PatientNotFound` for an unknown patient.
pub fn appointments_for_patient<'a>(store: &'a Store, patient_id: &str) -> Result<Vec<&'a Appointment>> {
    store.get_patient(patient_id)?;
    Ok(sorted_by_time(
        store
            .appointments
            .values()
            .filter(|a| a.patient_id == patient_id)
            .collect(),
    ))
}

/// Appointments holding the doctor (cancelled ones excluded)
///
/// # Errors
/// `DoctorNotFound` for an unknown doctor.
pub fn appointments_for_doctor<'a>(store: &'a Store, doctor_id: &str) -> Result<Vec<&'a Appointment>> {
    store.get_doctor(doctor_id)?;
    Ok(sorted_by_time(
        store
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.status.is_active())
            .collect(),
    ))
}

/// Appointments holding the room (cancelled ones excluded)
///
/// # Errors
/// `RoomNotFound` for an unknown room.
pub fn appointments_for_room<'a>(store: &'a Store, room_id: &str) -> Result<Vec<&'a Appointment>> {
    store.get_room(room_id)?;
    Ok(sorted_by_time(
        store
            .appointments
            .values()
            .filter(|a| a.room_id == room_id && a.status.is_active())
            .collect(),
    ))
}

/// Apply a lifecycle action to an appointment
///
/// # Returns
/// The new status
///
/// # Errors
/// * `AppointmentNotFound`
/// * `InvalidTransition` - action not allowed from the current status
pub fn transition_appointment(
    store: &mut Store,
    appointment_id: &str,
    action: StatusAction,
) -> Result<AppointmentStatus> {
    let appointment = store.get_appointment_mut(appointment_id)?;
    let next = lifecycle::next_status(appointment.status, action)?;
    debug!(
        appointment_id,
        from = %appointment.status,
        to = %next,
        "appointment transition"
    );
    appointment.status = next;
    Ok(next)
}

/// Cancel a SCHEDULED appointment, recording the reason in its notes
///
/// A non-blank reason is appended as `" | Cancellation: {reason}"`; the
/// separator is dropped when the notes were empty. Cancelling releases the
/// doctor and room for other bookings.
///
/// # Errors
/// * `AppointmentNotFound`
/// * `InvalidTransition` - appointment is not SCHEDULED
/// * `InvalidInput` - the resulting notes reach the notes length bound
pub fn cancel_appointment(
    store: &mut Store,
    appointment_id: &str,
    reason: Option<&str>,
) -> Result<()> {
    let appointment = store.get_appointment(appointment_id)?;
    if appointment.status != AppointmentStatus::Scheduled {
        return Err(HospitalError::InvalidTransition {
            from: appointment.status,
            action: StatusAction::Cancel,
        });
    }

    let notes = match reason.map(str::trim).filter(|r| !r.is_empty()) {
        Some(reason) if appointment.notes.is_empty() => Some(format!("Cancellation: {}", reason)),
        Some(reason) => Some(format!("{} | Cancellation: {}", appointment.notes, reason)),
        None => None,
    };

    // Validate the notes before touching the status
    let mut updated = appointment.clone();
    if let Some(notes) = notes {
        updated.set_notes(notes)?;
    }
    updated.status = lifecycle::next_status(updated.status, StatusAction::Cancel)?;
    store.insert_appointment(updated);
    Ok(())
}

/// Replace an appointment's notes
///
/// # Errors
/// * `AppointmentNotFound`
/// * `InvalidInput` - blank notes or notes reaching 1000 characters
pub fn update_notes(store: &mut Store, appointment_id: &str, notes: String) -> Result<()> {
    store.get_appointment_mut(appointment_id)?.set_notes(notes)
}
