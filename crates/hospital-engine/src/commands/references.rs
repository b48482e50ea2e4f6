//! Resolve the human references the CLI works with (DNI, room number)
//! into store ids

use hospital_core::{HospitalError, Store};

/// # Errors
/// `PatientNotFound` if no patient has this DNI.
pub fn patient_id_by_dni(store: &Store, dni: &str) -> Result<String, HospitalError> {
    store
        .find_patient_by_dni(dni)
        .map(|p| p.id.clone())
        .ok_or_else(|| HospitalError::PatientNotFound {
            patient: dni.to_string(),
        })
}

/// # Errors
/// `DoctorNotFound` if no doctor has this DNI.
pub fn doctor_id_by_dni(store: &Store, dni: &str) -> Result<String, HospitalError> {
    store
        .find_doctor_by_dni(dni)
        .map(|d| d.id.clone())
        .ok_or_else(|| HospitalError::DoctorNotFound {
            doctor: dni.to_string(),
        })
}

/// # Errors
/// `RoomNotFound` if no room has this number.
pub fn room_id_by_number(store: &Store, number: &str) -> Result<String, HospitalError> {
    store
        .find_room_by_number(number)
        .map(|r| r.id.clone())
        .ok_or_else(|| HospitalError::RoomNotFound {
            room: number.to_string(),
        })
}

/// The only hospital, or the one named by id
///
/// # Errors
/// `HospitalNotFound` when the id is unknown or no hospital exists.
pub fn hospital_id_or_default(store: &Store, hospital_id: Option<&str>) -> Result<String, HospitalError> {
    match hospital_id {
        Some(id) => store.get_hospital(id).map(|h| h.id.clone()),
        None => store
            .list_hospitals()
            .first()
            .map(|h| h.id.clone())
            .ok_or_else(|| HospitalError::HospitalNotFound {
                hospital_id: "(none)".to_string(),
            }),
    }
}
