//! Functional-boundary apply function
//!
//! `apply()` is the single entry point for store mutations:
//! - **All-or-nothing**: either the command succeeds and a valid new state
//!   is returned, or it fails and the caller keeps the old state
//! - **No panics**: invalid input yields typed errors
//! - **Validated**: commands that change relationships are followed by a
//!   full referential-integrity check
//!
//! ## Example
//!
//! ```
//! use hospital_core::{apply, Applied, Command, Store, SystemClock};
//!
//! let cmd = Command::CreateHospital {
//!     name: "Hospital Central".to_string(),
//!     address: "Av. Libertador 1234".to_string(),
//!     phone: "011-4567-8901".to_string(),
//! };
//!
//! let (state, applied) = apply(Store::new(), cmd, &SystemClock).unwrap();
//! assert!(matches!(applied, Applied::Created(_)));
//! assert_eq!(state.list_hospitals().len(), 1);
//! ```

use serde::Serialize;

use crate::clock::Clock;
use crate::commands::Command;
use crate::csv;
use crate::errors::Result;
use crate::model::{AppointmentStatus, License, Person};
use crate::ops::{appointment_ops, hospital_ops, patient_ops, staff_ops, Store};
use crate::rules::validation;

/// Outcome of a successfully applied command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Applied {
    /// A new entity was created; carries its id
    Created(String),
    /// An existing entity was changed; carries its id
    Updated(String),
    /// An appointment moved to a new status
    Transitioned {
        appointment_id: String,
        status: AppointmentStatus,
    },
    /// Appointments were replaced by an import; carries the row count
    Imported(usize),
}

impl Applied {
    /// Id of the created or updated entity, if any
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Applied::Created(id) | Applied::Updated(id) => Some(id),
            Applied::Transitioned { appointment_id, .. } => Some(appointment_id),
            Applied::Imported(_) => None,
        }
    }
}

/// Apply a command to a store, returning the new state and the outcome
///
/// # Atomicity Guarantee
///
/// The store is taken by value. On `Err` it has been dropped, but the
/// caller's clone (if kept) is untouched; engine callers reload from the
/// database anyway. Every operation validates before mutating.
///
/// # Errors
///
/// Any `HospitalError` raised by the underlying operation, or
/// `IntegrityViolation` if the resulting store fails validation.
pub fn apply(mut state: Store, cmd: Command, clock: &dyn Clock) -> Result<(Store, Applied)> {
    let structural = matches!(
        cmd,
        Command::AddDepartment { .. }
            | Command::CreateRoom { .. }
            | Command::AssignDoctor { .. }
            | Command::RegisterPatient { .. }
            | Command::AdmitPatient { .. }
            | Command::ImportAppointments { .. }
    );

    let applied = match cmd {
        Command::CreateHospital {
            name,
            address,
            phone,
        } => Applied::Created(hospital_ops::create_hospital(
            &mut state, name, address, phone,
        )?),

        Command::AddDepartment {
            hospital_id,
            name,
            specialty,
        } => Applied::Created(hospital_ops::add_department(
            &mut state,
            &hospital_id,
            name,
            specialty,
        )?),

        Command::CreateRoom {
            department_id,
            number,
            kind,
        } => Applied::Created(hospital_ops::create_room(
            &mut state,
            &department_id,
            number,
            kind,
        )?),

        Command::RegisterDoctor {
            person,
            license,
            specialty,
        } => {
            let person = Person::new(person)?;
            let license = License::new(license)?;
            Applied::Created(staff_ops::register_doctor(
                &mut state, person, license, specialty,
            )?)
        }

        Command::AssignDoctor {
            department_id,
            doctor_id,
        } => {
            staff_ops::assign_doctor(&mut state, &department_id, &doctor_id)?;
            Applied::Updated(doctor_id)
        }

        Command::RegisterPatient {
            person,
            phone,
            address,
            hospital_id,
        } => {
            let person = Person::new(person)?;
            Applied::Created(patient_ops::register_patient(
                &mut state,
                person,
                phone,
                address,
                hospital_id.as_deref(),
                clock.now(),
            )?)
        }

        Command::AdmitPatient {
            hospital_id,
            patient_id,
        } => {
            patient_ops::admit_patient(&mut state, &hospital_id, &patient_id)?;
            Applied::Updated(patient_id)
        }

        Command::AddRecordEntry {
            patient_id,
            kind,
            text,
        } => {
            patient_ops::add_record_entry(&mut state, &patient_id, kind, text)?;
            Applied::Updated(patient_id)
        }

        Command::ScheduleAppointment {
            patient_id,
            doctor_id,
            room_id,
            scheduled_at,
            cost,
        } => Applied::Created(appointment_ops::schedule_appointment(
            &mut state,
            &patient_id,
            &doctor_id,
            &room_id,
            scheduled_at,
            cost,
            clock.now(),
        )?),

        Command::TransitionAppointment {
            appointment_id,
            action,
        } => {
            let status =
                appointment_ops::transition_appointment(&mut state, &appointment_id, action)?;
            Applied::Transitioned {
                appointment_id,
                status,
            }
        }

        Command::CancelAppointment {
            appointment_id,
            reason,
        } => {
            appointment_ops::cancel_appointment(&mut state, &appointment_id, reason.as_deref())?;
            Applied::Transitioned {
                appointment_id,
                status: AppointmentStatus::Cancelled,
            }
        }

        Command::UpdateAppointmentNotes {
            appointment_id,
            notes,
        } => {
            appointment_ops::update_notes(&mut state, &appointment_id, notes)?;
            Applied::Updated(appointment_id)
        }

        Command::ImportAppointments { csv: document } => {
            Applied::Imported(csv::import_appointments(&mut state, &document)?)
        }
    };

    if structural {
        validation::validate_store(&state)?;
    }

    Ok((state, applied))
}
