use chrono::NaiveDateTime;
use tracing::debug;
use uuid::Uuid;

use super::store::Store;
use crate::errors::{HospitalError, Result};
use crate::model::{EntryKind, MedicalRecord, Patient, Person};

/// Register a patient and open their medical record
///
/// The record number is derived from the DNI and `now`. When `hospital_id`
/// is given the patient is admitted straight away.
///
/// # Returns
/// The ID of the new patient
///
/// # Errors
/// * `DuplicateDni` - another patient has the same DNI
/// * `InvalidInput` - blank phone or address
/// * `HospitalNotFound` - unknown `hospital_id`
pub fn register_patient(
    store: &mut Store,
    person: Person,
    phone: String,
    address: String,
    hospital_id: Option<&str>,
    now: NaiveDateTime,
) -> Result<String> {
    if store.find_patient_by_dni(person.dni()).is_some() {
        return Err(HospitalError::DuplicateDni {
            dni: person.dni().to_string(),
            role: "patient".to_string(),
        });
    }
    if let Some(hid) = hospital_id {
        store.get_hospital(hid)?;
    }

    let patient_id = Uuid::now_v7().to_string();
    let record_id = Uuid::now_v7().to_string();

    let record = MedicalRecord::new(record_id.clone(), patient_id.clone(), person.dni(), now);
    let patient = Patient::new(patient_id.clone(), person, phone, address, record_id)?;

    store.insert_record(record);
    store.insert_patient(patient);

    if let Some(hid) = hospital_id {
        admit_patient(store, hid, &patient_id)?;
    }

    debug!(patient_id = %patient_id, "patient registered");
    Ok(patient_id)
}

/// Admit a patient to a hospital
///
/// A patient belongs to at most one hospital; admitting to a new one removes
/// them from the previous hospital's list.
///
/// # Errors
/// * `HospitalNotFound` / `PatientNotFound`
pub fn admit_patient(store: &mut Store, hospital_id: &str, patient_id: &str) -> Result<()> {
    store.get_hospital(hospital_id)?;
    let previous = store.get_patient(patient_id)?.hospital_id.clone();

    if let Some(prev) = previous {
        if prev != hospital_id {
            store.get_hospital_mut(&prev)?.remove_patient_id(patient_id);
        }
    }

    store
        .get_hospital_mut(hospital_id)?
        .add_patient_id(patient_id.to_string());
    store.get_patient_mut(patient_id)?.hospital_id = Some(hospital_id.to_string());
    Ok(())
}

/// Append an entry to a patient's medical record
///
/// # Errors
/// * `PatientNotFound` / `RecordNotFound`
/// * `InvalidInput` - blank or over-long entry
pub fn add_record_entry(
    store: &mut Store,
    patient_id: &str,
    kind: EntryKind,
    text: String,
) -> Result<()> {
    let record_id = store.get_patient(patient_id)?.record_id.clone();
    store.get_record_mut(&record_id)?.add_entry(kind, text)
}

pub fn add_diagnosis(store: &mut Store, patient_id: &str, diagnosis: String) -> Result<()> {
    add_record_entry(store, patient_id, EntryKind::Diagnosis, diagnosis)
}

pub fn add_treatment(store: &mut Store, patient_id: &str, treatment: String) -> Result<()> {
    add_record_entry(store, patient_id, EntryKind::Treatment, treatment)
}

pub fn add_allergy(store: &mut Store, patient_id: &str, allergy: String) -> Result<()> {
    add_record_entry(store, patient_id, EntryKind::Allergy, allergy)
}
