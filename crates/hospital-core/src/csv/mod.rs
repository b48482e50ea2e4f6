//! CSV interchange for appointments
//!
//! One header line followed by one appointment per line:
//!
//! ```text
//! patient_dni,doctor_dni,room_number,scheduled_at,cost,status,notes
//! 54232123,45423321,CARD-101,2030-05-01T10:00:00,1500.00,SCHEDULED,First visit; bring results
//! ```
//!
//! Commas cannot appear inside a field, so commas in notes are written as
//! `;` and restored on read. A `;` typed by the user therefore comes back
//! as `,`.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::{HospitalError, Result};
use crate::model::{Appointment, AppointmentStatus, Money};
use crate::ops::appointment_ops::all_appointments;
use crate::ops::Store;

pub const CSV_HEADER: &str = "patient_dni,doctor_dni,room_number,scheduled_at,cost,status,notes";

const FIELD_COUNT: usize = 7;
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render one appointment as a CSV row (no trailing newline)
///
/// # Errors
/// `PatientNotFound`, `DoctorNotFound` or `RoomNotFound` if the appointment
/// references an entity missing from the store.
pub fn to_csv_row(store: &Store, appointment: &Appointment) -> Result<String> {
    let patient = store.get_patient(&appointment.patient_id)?;
    let doctor = store.get_doctor(&appointment.doctor_id)?;
    let room = store.get_room(&appointment.room_id)?;

    Ok(format!(
        "{},{},{},{},{},{},{}",
        patient.dni(),
        doctor.dni(),
        room.number,
        appointment.scheduled_at.format(DATETIME_FORMAT),
        appointment.cost,
        appointment.status,
        escape_notes(&appointment.notes),
    ))
}

/// Parse one CSV row into a fresh appointment (new id)
///
/// `line_no` is 1-based and only used in error messages.
///
/// # Errors
/// * `InvalidCsv` - wrong field count or malformed date, cost, status or notes
/// * `PatientNotFound` / `DoctorNotFound` / `RoomNotFound` - unknown DNI or room number
pub fn parse_row(store: &Store, line: &str, line_no: usize) -> Result<Appointment> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(HospitalError::InvalidCsv {
            line: line_no,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let invalid = |reason: String| HospitalError::InvalidCsv {
        line: line_no,
        reason,
    };

    let scheduled_at = parse_datetime(fields[3])
        .ok_or_else(|| invalid(format!("invalid date-time '{}'", fields[3])))?;
    let cost: Money = fields[4]
        .parse()
        .map_err(|e: HospitalError| invalid(e.to_string()))?;
    let status: AppointmentStatus = fields[5]
        .parse()
        .map_err(|e: HospitalError| invalid(e.to_string()))?;
    let notes = fields[6].replace(';', ",");

    let patient = store
        .find_patient_by_dni(fields[0])
        .ok_or_else(|| HospitalError::PatientNotFound {
            patient: fields[0].to_string(),
        })?;
    let doctor = store
        .find_doctor_by_dni(fields[1])
        .ok_or_else(|| HospitalError::DoctorNotFound {
            doctor: fields[1].to_string(),
        })?;
    let room = store
        .find_room_by_number(fields[2])
        .ok_or_else(|| HospitalError::RoomNotFound {
            room: fields[2].to_string(),
        })?;

    Appointment::new(
        Uuid::now_v7().to_string(),
        patient.id.clone(),
        doctor.id.clone(),
        room.id.clone(),
        scheduled_at,
        cost,
    )
    .with_status(status)
    .with_notes(notes)
    .map_err(|e| invalid(e.to_string()))
}

/// Export every appointment, ordered by time then id, header first
///
/// # Errors
/// Propagates `to_csv_row` errors.
pub fn export_appointments(store: &Store) -> Result<String> {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for appointment in all_appointments(store) {
        out.push_str(&to_csv_row(store, appointment)?);
        out.push('\n');
    }
    Ok(out)
}

/// Replace all appointments with the rows of `csv`
///
/// The first line is a header and is skipped; blank lines are ignored.
/// Every row is parsed before the store is touched, so a bad row leaves
/// the existing appointments in place. Scheduling checks are not applied:
/// an import restores history, including past and overlapping entries.
///
/// # Returns
/// Number of imported appointments
///
/// # Errors
/// The first `parse_row` error encountered.
pub fn import_appointments(store: &mut Store, csv: &str) -> Result<usize> {
    let mut parsed = Vec::new();
    for (idx, line) in csv.lines().enumerate().skip(1) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        parsed.push(parse_row(store, line, idx + 1)?);
    }

    let count = parsed.len();
    store.replace_appointments(parsed);
    Ok(count)
}

fn escape_notes(notes: &str) -> String {
    notes.replace(',', ";").replace(['\r', '\n'], " ")
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}
