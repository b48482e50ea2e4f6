use tracing::debug;
use uuid::Uuid;

use super::store::Store;
use crate::errors::{HospitalError, Result};
use crate::model::{Doctor, License, Person, Specialty};

/// Register a doctor (not yet assigned to a department)
///
/// # Errors
/// * `DuplicateDni` - another doctor has the same DNI
/// * `DuplicateLicense` - another doctor holds the same licence
pub fn register_doctor(
    store: &mut Store,
    person: Person,
    license: License,
    specialty: Specialty,
) -> Result<String> {
    if store.find_doctor_by_dni(person.dni()).is_some() {
        return Err(HospitalError::DuplicateDni {
            dni: person.dni().to_string(),
            role: "doctor".to_string(),
        });
    }
    if store.doctors.values().any(|d| d.license == license) {
        return Err(HospitalError::DuplicateLicense {
            license: license.to_string(),
        });
    }

    let id = Uuid::now_v7().to_string();
    store.insert_doctor(Doctor::new(id.clone(), person, license, specialty));
    debug!(doctor_id = %id, %specialty, "doctor registered");
    Ok(id)
}

/// Assign a doctor to a department
///
/// The doctor's specialty must equal the department's. A doctor already in
/// another department is moved out of it.
///
/// # Errors
/// * `DepartmentNotFound` / `DoctorNotFound`
/// * `SpecialtyMismatch` - specialties differ
pub fn assign_doctor(store: &mut Store, department_id: &str, doctor_id: &str) -> Result<()> {
    let required = store.get_department(department_id)?.specialty;
    let doctor = store.get_doctor(doctor_id)?;

    if doctor.specialty != required {
        return Err(HospitalError::SpecialtyMismatch {
            doctor_specialty: doctor.specialty,
            required,
        });
    }

    if let Some(previous) = doctor.department_id.clone() {
        if previous != department_id {
            store
                .get_department_mut(&previous)?
                .remove_doctor_id(doctor_id);
        }
    }

    store
        .get_department_mut(department_id)?
        .add_doctor_id(doctor_id.to_string());
    store.get_doctor_mut(doctor_id)?.department_id = Some(department_id.to_string());

    Ok(())
}
