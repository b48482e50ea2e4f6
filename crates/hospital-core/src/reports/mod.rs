//! Read-only reports over the store
//!
//! Each report is a plain serialisable struct; `render` turns them into the
//! text shown by the CLI.

pub mod render;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::errors::Result;
use crate::model::{AppointmentStatus, BloodType, Specialty};
use crate::ops::appointment_ops::appointments_for_patient;
use crate::ops::Store;

pub use render::{
    render_hospital_overview, render_patient_overview, render_patients_with_allergies,
    render_resource_summary, render_specialty_counts, render_status_report,
};

/// Header of the doctors-per-specialty CSV export
pub const SPECIALTY_CSV_HEADER: &str = "specialty,count";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialtyCount {
    pub specialty: Specialty,
    pub count: usize,
}

/// Doctors per specialty, non-zero counts only, in specialty order
pub fn doctors_by_specialty(store: &Store) -> Vec<SpecialtyCount> {
    Specialty::ALL
        .iter()
        .map(|&specialty| SpecialtyCount {
            specialty,
            count: store
                .doctors
                .values()
                .filter(|d| d.specialty == specialty)
                .count(),
        })
        .filter(|sc| sc.count > 0)
        .collect()
}

/// CSV rendering of `doctors_by_specialty`, header first
pub fn specialty_stats_csv(counts: &[SpecialtyCount]) -> String {
    let mut out = String::from(SPECIALTY_CSV_HEADER);
    out.push('\n');
    for sc in counts {
        out.push_str(&format!("{},{}\n", sc.specialty, sc.count));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: usize,
    /// Share of all appointments, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub total: usize,
    /// Statuses with at least one appointment, in lifecycle order
    pub rows: Vec<StatusCount>,
}

/// Appointments per status with percentages of the total
pub fn status_report(store: &Store) -> StatusReport {
    let total = store.appointments.len();
    let rows = AppointmentStatus::ALL
        .iter()
        .filter_map(|&status| {
            let count = store
                .appointments
                .values()
                .filter(|a| a.status == status)
                .count();
            (count > 0).then(|| StatusCount {
                status,
                count,
                percentage: count as f64 * 100.0 / total as f64,
            })
        })
        .collect();
    StatusReport { total, rows }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllergyEntry {
    pub full_name: String,
    pub dni: String,
    pub allergies: Vec<String>,
}

/// Patients whose record lists at least one allergy, ordered by name then DNI
pub fn patients_with_allergies(store: &Store) -> Vec<AllergyEntry> {
    let mut entries: Vec<AllergyEntry> = store
        .patients
        .values()
        .filter_map(|p| {
            let record = store.get_record(&p.record_id).ok()?;
            record.has_allergies().then(|| AllergyEntry {
                full_name: p.full_name(),
                dni: p.dni().to_string(),
                allergies: record.allergies.clone(),
            })
        })
        .collect();
    entries.sort_by(|a, b| a.full_name.cmp(&b.full_name).then_with(|| a.dni.cmp(&b.dni)));
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    pub rooms: usize,
    pub patients: usize,
    pub doctors: usize,
    pub scheduled_appointments: usize,
}

pub fn resource_summary(store: &Store) -> ResourceSummary {
    ResourceSummary {
        rooms: store.rooms.len(),
        patients: store.patients.len(),
        doctors: store.doctors.len(),
        scheduled_appointments: store
            .appointments
            .values()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentLine {
    pub id: String,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub doctor: String,
    pub room: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientOverview {
    pub full_name: String,
    pub dni: String,
    pub age: u32,
    pub blood_type: BloodType,
    pub record_number: String,
    pub diagnoses: Vec<String>,
    pub allergies: Vec<String>,
    pub treatments: Vec<String>,
    /// All appointments, ordered by time
    pub appointments: Vec<AppointmentLine>,
}

/// Everything known about one patient
///
/// # Errors
/// `PatientNotFound` or `RecordNotFound`.
pub fn patient_overview(store: &Store, patient_id: &str, today: NaiveDate) -> Result<PatientOverview> {
    let patient = store.get_patient(patient_id)?;
    let record = store.record_for_patient(patient_id)?;

    let appointments = appointments_for_patient(store, patient_id)?
        .into_iter()
        .map(|a| AppointmentLine {
            id: a.id.clone(),
            scheduled_at: a.scheduled_at,
            status: a.status,
            doctor: store
                .get_doctor(&a.doctor_id)
                .map(|d| d.full_name())
                .unwrap_or_default(),
            room: store
                .get_room(&a.room_id)
                .map(|r| r.number.clone())
                .unwrap_or_default(),
            notes: a.notes.clone(),
        })
        .collect();

    Ok(PatientOverview {
        full_name: patient.full_name(),
        dni: patient.dni().to_string(),
        age: patient.person.age_on(today),
        blood_type: patient.person.blood_type(),
        record_number: record.number.clone(),
        diagnoses: record.diagnoses.clone(),
        allergies: record.allergies.clone(),
        treatments: record.treatments.clone(),
        appointments,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentLine {
    pub name: String,
    pub specialty: Specialty,
    pub doctors: usize,
    pub rooms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HospitalOverview {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub departments: Vec<DepartmentLine>,
    /// Admitted patients as "full name (dni)"
    pub patients: Vec<String>,
}

/// Hospital details with its departments and admitted patients
///
/// # Errors
/// `HospitalNotFound`, or a lookup error for a dangling department or patient id.
pub fn hospital_overview(store: &Store, hospital_id: &str) -> Result<HospitalOverview> {
    let hospital = store.get_hospital(hospital_id)?;

    let departments = hospital
        .department_ids
        .iter()
        .map(|id| {
            let dept = store.get_department(id)?;
            let rooms = dept
                .room_ids
                .iter()
                .map(|rid| store.get_room(rid).map(|r| r.number.clone()))
                .collect::<Result<Vec<_>>>()?;
            Ok(DepartmentLine {
                name: dept.name.clone(),
                specialty: dept.specialty,
                doctors: dept.doctor_ids.len(),
                rooms,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let patients = hospital
        .patient_ids
        .iter()
        .map(|pid| {
            store
                .get_patient(pid)
                .map(|p| format!("{} ({})", p.full_name(), p.dni()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(HospitalOverview {
        name: hospital.name.clone(),
        address: hospital.address.clone(),
        phone: hospital.phone.clone(),
        departments,
        patients,
    })
}
