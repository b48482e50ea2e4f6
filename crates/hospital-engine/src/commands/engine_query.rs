//! Engine-level read-only queries
//!
//! `apply_engine_query` takes a shared connection and never writes to the
//! database. File exports write only to the path they are given.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use hospital_core::ops::appointment_ops::{
    all_appointments, appointments_for_doctor, appointments_for_patient, appointments_for_room,
};
use hospital_core::reports::{
    self, AllergyEntry, HospitalOverview, PatientOverview, ResourceSummary, SpecialtyCount,
    StatusReport,
};
use hospital_core::{csv, Appointment, AppointmentStatus, Clock, Money, Store};
use hospital_core_types::{RequestContext, Sensitive};
use hospital_store::errors::io_error;
use hospital_store::repo::load_store;
use hospital_store::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::logged;
use crate::commands::references::{
    doctor_id_by_dni, hospital_id_or_default, patient_id_by_dni, room_id_by_number,
};

#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Appointments ordered by time, optionally narrowed to one patient,
    /// doctor or room; the first filter given wins (doctor and room views
    /// omit cancelled appointments)
    ListAppointments {
        patient_dni: Option<String>,
        doctor_dni: Option<String>,
        room_number: Option<String>,
    },

    /// Personal data, record and appointments of the patient with this DNI
    PatientOverview { dni: String },

    SpecialtyCounts,
    StatusReport,
    PatientsWithAllergies,
    ResourceSummary,

    /// Departments and patients of a hospital (the first one when `None`)
    HospitalOverview { hospital_id: Option<String> },

    /// Write every appointment to a CSV file
    ExportCsvFile { path: PathBuf },

    /// Write the doctors-per-specialty counts to a CSV file
    ExportSpecialtyCsvFile { path: PathBuf },
}

impl EngineQuery {
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::ListAppointments { .. } => "list_appointments",
            EngineQuery::PatientOverview { .. } => "patient_overview",
            EngineQuery::SpecialtyCounts => "report_specialties",
            EngineQuery::StatusReport => "report_statuses",
            EngineQuery::PatientsWithAllergies => "report_allergies",
            EngineQuery::ResourceSummary => "report_resources",
            EngineQuery::HospitalOverview { .. } => "report_hospital",
            EngineQuery::ExportCsvFile { .. } => "export_appointments",
            EngineQuery::ExportSpecialtyCsvFile { .. } => "export_specialty_stats",
        }
    }
}

/// One appointment with its references resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentView {
    pub id: String,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub patient: String,
    pub doctor: String,
    pub room: String,
    pub cost: Money,
    pub notes: String,
}

/// Result of writing a CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWritten {
    pub path: PathBuf,
    /// Data rows written, header excluded
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineQueryResult {
    Appointments(Vec<AppointmentView>),
    PatientOverview(PatientOverview),
    SpecialtyCounts(Vec<SpecialtyCount>),
    StatusReport(StatusReport),
    PatientsWithAllergies(Vec<AllergyEntry>),
    ResourceSummary(ResourceSummary),
    HospitalOverview(HospitalOverview),
    FileWritten(FileWritten),
}

/// Apply a read-only engine query
///
/// # Errors
///
/// `NotFound` for unknown DNI or hospital references, `Persistence` on
/// hydration failures, `Io` when an export file cannot be written.
pub fn apply_engine_query(
    query: EngineQuery,
    conn: &Connection,
    clock: &dyn Clock,
    ctx: &RequestContext,
) -> Result<EngineQueryResult> {
    let op = query.op_name();
    logged(op, ctx, || {
        let store = load_store(conn)?;
        execute(query, &store, clock)
    })
}

fn execute(query: EngineQuery, store: &Store, clock: &dyn Clock) -> Result<EngineQueryResult> {
    let result = match query {
        EngineQuery::ListAppointments {
            patient_dni,
            doctor_dni,
            room_number,
        } => {
            let appointments = match (patient_dni, doctor_dni, room_number) {
                (Some(dni), _, _) => {
                    appointments_for_patient(store, &patient_id_by_dni(store, &dni)?)?
                }
                (None, Some(dni), _) => {
                    appointments_for_doctor(store, &doctor_id_by_dni(store, &dni)?)?
                }
                (None, None, Some(number)) => {
                    appointments_for_room(store, &room_id_by_number(store, &number)?)?
                }
                (None, None, None) => all_appointments(store),
            };
            let views = appointments
                .into_iter()
                .map(|a| view(store, a))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            EngineQueryResult::Appointments(views)
        }

        EngineQuery::PatientOverview { dni } => {
            let patient_id = patient_id_by_dni(store, &dni)?;
            tracing::debug!(dni = %Sensitive::new(dni.as_str()).masked(), "patient overview");
            let today = clock.now().date();
            EngineQueryResult::PatientOverview(reports::patient_overview(store, &patient_id, today)?)
        }

        EngineQuery::SpecialtyCounts => {
            EngineQueryResult::SpecialtyCounts(reports::doctors_by_specialty(store))
        }

        EngineQuery::StatusReport => EngineQueryResult::StatusReport(reports::status_report(store)),

        EngineQuery::PatientsWithAllergies => {
            EngineQueryResult::PatientsWithAllergies(reports::patients_with_allergies(store))
        }

        EngineQuery::ResourceSummary => {
            EngineQueryResult::ResourceSummary(reports::resource_summary(store))
        }

        EngineQuery::HospitalOverview { hospital_id } => {
            let hospital_id = hospital_id_or_default(store, hospital_id.as_deref())?;
            EngineQueryResult::HospitalOverview(reports::hospital_overview(store, &hospital_id)?)
        }

        EngineQuery::ExportCsvFile { path } => {
            let document = csv::export_appointments(store)?;
            let rows = store.list_appointments().len();
            write_file(&path, &document, "export_appointments")?;
            EngineQueryResult::FileWritten(FileWritten { path, rows })
        }

        EngineQuery::ExportSpecialtyCsvFile { path } => {
            let counts = reports::doctors_by_specialty(store);
            write_file(&path, &reports::specialty_stats_csv(&counts), "export_specialty_stats")?;
            EngineQueryResult::FileWritten(FileWritten {
                path,
                rows: counts.len(),
            })
        }
    };
    Ok(result)
}

fn view(store: &Store, appointment: &Appointment) -> std::result::Result<AppointmentView, hospital_core::HospitalError> {
    Ok(AppointmentView {
        id: appointment.id.clone(),
        scheduled_at: appointment.scheduled_at,
        status: appointment.status,
        patient: store.get_patient(&appointment.patient_id)?.full_name(),
        doctor: store.get_doctor(&appointment.doctor_id)?.full_name(),
        room: store.get_room(&appointment.room_id)?.number.clone(),
        cost: appointment.cost,
        notes: appointment.notes.clone(),
    })
}

fn write_file(path: &Path, contents: &str, op: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(op, e))?;
        }
    }
    std::fs::write(path, contents).map_err(|e| io_error(op, e))
}
