use tracing::debug;
use uuid::Uuid;

use super::store::Store;
use crate::errors::{HospitalError, Result};
use crate::model::{Department, Hospital, Room, Specialty};

/// Create a new hospital
///
/// # Returns
/// The ID of the new hospital
///
/// # Errors
/// * `InvalidInput` - blank or over-long name, address or phone
pub fn create_hospital(
    store: &mut Store,
    name: String,
    address: String,
    phone: String,
) -> Result<String> {
    let id = Uuid::now_v7().to_string();
    let hospital = Hospital::new(id.clone(), name, address, phone)?;
    store.insert_hospital(hospital);
    debug!(hospital_id = %id, "hospital created");
    Ok(id)
}

/// Add a department to a hospital
///
/// Department names are unique within a hospital (compared ignoring case
/// and surrounding whitespace).
///
/// # Errors
/// * `HospitalNotFound` - unknown hospital
/// * `DuplicateDepartment` - the hospital already has a department of that name
/// * `InvalidInput` - blank department name
pub fn add_department(
    store: &mut Store,
    hospital_id: &str,
    name: String,
    specialty: Specialty,
) -> Result<String> {
    let hospital = store.get_hospital(hospital_id)?;

    let wanted = name.trim().to_lowercase();
    let duplicate = hospital.department_ids.iter().any(|dept_id| {
        store
            .get_department(dept_id)
            .map(|d| d.name.trim().to_lowercase() == wanted)
            .unwrap_or(false)
    });
    if duplicate {
        return Err(HospitalError::DuplicateDepartment {
            hospital_id: hospital_id.to_string(),
            name,
        });
    }

    let id = Uuid::now_v7().to_string();
    let department = Department::new(id.clone(), hospital_id.to_string(), name, specialty)?;

    store.insert_department(department);
    store
        .get_hospital_mut(hospital_id)?
        .add_department_id(id.clone());

    Ok(id)
}

/// Create a room inside a department
///
/// # Errors
/// * `DepartmentNotFound` - unknown department
/// * `DuplicateRoomNumber` - number already used by any room
/// * `InvalidInput` - blank number or kind
pub fn create_room(
    store: &mut Store,
    department_id: &str,
    number: String,
    kind: String,
) -> Result<String> {
    store.get_department(department_id)?;

    if store.find_room_by_number(&number).is_some() {
        return Err(HospitalError::DuplicateRoomNumber { number });
    }

    let id = Uuid::now_v7().to_string();
    let room = Room::new(id.clone(), department_id.to_string(), number, kind)?;

    store.insert_room(room);
    store
        .get_department_mut(department_id)?
        .add_room_id(id.clone());

    Ok(id)
}
