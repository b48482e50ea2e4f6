use std::collections::BTreeMap;

use crate::errors::{HospitalError, Result};
use crate::model::{Appointment, Department, Doctor, Hospital, MedicalRecord, Patient, Room};

/// In-memory store for every hospital entity
///
/// Ordered maps keyed by id, so iteration order is deterministic and ids
/// (UUID v7) list in creation order. Not thread-safe; `apply()` takes it by
/// value and hands back the new state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub(crate) hospitals: BTreeMap<String, Hospital>,
    pub(crate) departments: BTreeMap<String, Department>,
    pub(crate) rooms: BTreeMap<String, Room>,
    pub(crate) doctors: BTreeMap<String, Doctor>,
    pub(crate) patients: BTreeMap<String, Patient>,
    pub(crate) records: BTreeMap<String, MedicalRecord>,
    pub(crate) appointments: BTreeMap<String, Appointment>,
}

macro_rules! accessors {
    ($map:ident, $ty:ty, $get:ident, $get_mut:ident, $list:ident, $insert:ident, $err:expr) => {
        /// # Errors
        ///
        /// Returns the entity's `*NotFound` error if the id is unknown.
        pub fn $get(&self, id: &str) -> Result<&$ty> {
            self.$map.get(id).ok_or_else(|| $err(id.to_string()))
        }

        /// # Errors
        ///
        /// Returns the entity's `*NotFound` error if the id is unknown.
        pub fn $get_mut(&mut self, id: &str) -> Result<&mut $ty> {
            self.$map.get_mut(id).ok_or_else(|| $err(id.to_string()))
        }

        pub fn $list(&self) -> Vec<&$ty> {
            self.$map.values().collect()
        }

        /// Insert or replace by id (used by operations and hydration)
        pub fn $insert(&mut self, entity: $ty) {
            self.$map.insert(entity.id.clone(), entity);
        }
    };
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    accessors!(
        hospitals,
        Hospital,
        get_hospital,
        get_hospital_mut,
        list_hospitals,
        insert_hospital,
        |hospital_id| HospitalError::HospitalNotFound { hospital_id }
    );

    accessors!(
        departments,
        Department,
        get_department,
        get_department_mut,
        list_departments,
        insert_department,
        |department_id| HospitalError::DepartmentNotFound { department_id }
    );

    accessors!(
        rooms,
        Room,
        get_room,
        get_room_mut,
        list_rooms,
        insert_room,
        |room| HospitalError::RoomNotFound { room }
    );

    accessors!(
        doctors,
        Doctor,
        get_doctor,
        get_doctor_mut,
        list_doctors,
        insert_doctor,
        |doctor| HospitalError::DoctorNotFound { doctor }
    );

    accessors!(
        patients,
        Patient,
        get_patient,
        get_patient_mut,
        list_patients,
        insert_patient,
        |patient| HospitalError::PatientNotFound { patient }
    );

    accessors!(
        records,
        MedicalRecord,
        get_record,
        get_record_mut,
        list_records,
        insert_record,
        |record_id| HospitalError::RecordNotFound { record_id }
    );

    accessors!(
        appointments,
        Appointment,
        get_appointment,
        get_appointment_mut,
        list_appointments,
        insert_appointment,
        |appointment_id| HospitalError::AppointmentNotFound { appointment_id }
    );

    /// Find a doctor by national id
    pub fn find_doctor_by_dni(&self, dni: &str) -> Option<&Doctor> {
        self.doctors.values().find(|d| d.dni() == dni)
    }

    /// Find a patient by national id
    pub fn find_patient_by_dni(&self, dni: &str) -> Option<&Patient> {
        self.patients.values().find(|p| p.dni() == dni)
    }

    /// Find a room by its number
    pub fn find_room_by_number(&self, number: &str) -> Option<&Room> {
        self.rooms.values().find(|r| r.number == number)
    }

    /// Medical record belonging to a patient
    ///
    /// # Errors
    ///
    /// `PatientNotFound` or `RecordNotFound`.
    pub fn record_for_patient(&self, patient_id: &str) -> Result<&MedicalRecord> {
        let record_id = self.get_patient(patient_id)?.record_id.clone();
        self.get_record(&record_id)
    }

    /// Drop every appointment and install `appointments` instead
    pub fn replace_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments.clear();
        for appointment in appointments {
            self.insert_appointment(appointment);
        }
    }

    /// True when the store holds no entities at all
    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
            && self.departments.is_empty()
            && self.rooms.is_empty()
            && self.doctors.is_empty()
            && self.patients.is_empty()
            && self.records.is_empty()
            && self.appointments.is_empty()
    }
}
