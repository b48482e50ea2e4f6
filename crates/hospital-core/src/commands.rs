//! Command inventory for every store mutation
//!
//! Commands are processed by `apply()`, which takes ownership of the current
//! state, executes the command and returns the new state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{EntryKind, Money, PersonInput, Specialty, StatusAction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    CreateHospital {
        name: String,
        address: String,
        phone: String,
    },

    AddDepartment {
        hospital_id: String,
        name: String,
        specialty: Specialty,
    },

    CreateRoom {
        department_id: String,
        number: String,
        kind: String,
    },

    /// Register a doctor; `license` is validated as `MP-XXXX`
    RegisterDoctor {
        person: PersonInput,
        license: String,
        specialty: Specialty,
    },

    /// Attach a doctor to a department of the same specialty
    AssignDoctor {
        department_id: String,
        doctor_id: String,
    },

    /// Register a patient, opening their medical record
    RegisterPatient {
        person: PersonInput,
        phone: String,
        address: String,
        hospital_id: Option<String>,
    },

    AdmitPatient {
        hospital_id: String,
        patient_id: String,
    },

    /// Append a diagnosis, treatment or allergy to a patient's record
    AddRecordEntry {
        patient_id: String,
        kind: EntryKind,
        text: String,
    },

    ScheduleAppointment {
        patient_id: String,
        doctor_id: String,
        room_id: String,
        scheduled_at: NaiveDateTime,
        cost: Money,
    },

    /// Apply a lifecycle action (advance, cancel, no_show)
    TransitionAppointment {
        appointment_id: String,
        action: StatusAction,
    },

    /// Cancel a SCHEDULED appointment with an optional reason
    CancelAppointment {
        appointment_id: String,
        reason: Option<String>,
    },

    UpdateAppointmentNotes {
        appointment_id: String,
        notes: String,
    },

    /// Replace all appointments with the rows of a CSV document
    ImportAppointments { csv: String },
}

impl Command {
    /// Stable operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::CreateHospital { .. } => "create_hospital",
            Command::AddDepartment { .. } => "add_department",
            Command::CreateRoom { .. } => "create_room",
            Command::RegisterDoctor { .. } => "register_doctor",
            Command::AssignDoctor { .. } => "assign_doctor",
            Command::RegisterPatient { .. } => "register_patient",
            Command::AdmitPatient { .. } => "admit_patient",
            Command::AddRecordEntry { .. } => "add_record_entry",
            Command::ScheduleAppointment { .. } => "schedule_appointment",
            Command::TransitionAppointment { .. } => "transition_appointment",
            Command::CancelAppointment { .. } => "cancel_appointment",
            Command::UpdateAppointmentNotes { .. } => "update_appointment_notes",
            Command::ImportAppointments { .. } => "import_appointments",
        }
    }
}
