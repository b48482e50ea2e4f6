//! Hydration layer
//!
//! `load_store` rebuilds a full `Store` from the database; `persist_store`
//! writes one back. Child id lists are rebuilt from the position columns so
//! a round trip preserves order.

#![allow(clippy::result_large_err)]

use hospital_core::model::{
    BloodType, Department, Doctor, EntryKind, Hospital, License, MedicalRecord, Patient, Person,
    PersonInput, Room, Specialty,
};
use hospital_core::Store;
use rusqlite::Connection;
use std::collections::BTreeSet;

use crate::errors::{corrupt_row, from_rusqlite, Result};
use crate::repo::sqlite_repo::{
    parse_date, parse_datetime, AppointmentRow, SqliteRepo, APPOINTMENT_COLUMNS,
};

struct PersonRow {
    first_name: String,
    last_name: String,
    dni: String,
    birth_date: String,
    blood_type: String,
}

impl PersonRow {
    fn into_person(self, table: &str, id: &str) -> Result<Person> {
        let blood_type: BloodType = self
            .blood_type
            .parse()
            .map_err(|e| corrupt_row(table, id, e))?;
        Person::new(PersonInput {
            first_name: self.first_name,
            last_name: self.last_name,
            dni: self.dni,
            birth_date: parse_date(table, id, &self.birth_date)?,
            blood_type,
        })
        .map_err(|e| corrupt_row(table, id, e))
    }
}

fn parse_specialty(table: &str, id: &str, raw: &str) -> Result<Specialty> {
    raw.parse().map_err(|e| corrupt_row(table, id, e))
}

/// Load every entity into a fresh `Store`
///
/// # Errors
///
/// `Persistence` on SQLite failures or rows that no longer validate.
pub fn load_store(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();

    load_hospitals(conn, &mut store)?;
    load_departments(conn, &mut store)?;
    load_rooms(conn, &mut store)?;
    load_doctors(conn, &mut store)?;
    load_patients(conn, &mut store)?;
    load_records(conn, &mut store)?;
    load_appointments(conn, &mut store)?;

    tracing::debug!(
        hospitals = store.list_hospitals().len(),
        patients = store.list_patients().len(),
        appointments = store.list_appointments().len(),
        "store hydrated"
    );
    Ok(store)
}

fn load_hospitals(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT id, name, address, phone FROM hospitals ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows: Vec<(String, String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, name, address, phone) in rows {
        let hospital = Hospital::new(id.clone(), name, address, phone)
            .map_err(|e| corrupt_row("hospitals", &id, e))?;
        store.insert_hospital(hospital);
    }
    Ok(())
}

fn load_departments(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, hospital_id, name, specialty FROM departments
             ORDER BY hospital_id, position, id",
        )
        .map_err(from_rusqlite)?;
    let rows: Vec<(String, String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, hospital_id, name, specialty) in rows {
        let specialty = parse_specialty("departments", &id, &specialty)?;
        let department = Department::new(id.clone(), hospital_id.clone(), name, specialty)
            .map_err(|e| corrupt_row("departments", &id, e))?;
        store.get_hospital_mut(&hospital_id)?.add_department_id(id);
        store.insert_department(department);
    }
    Ok(())
}

fn load_rooms(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, department_id, number, kind FROM rooms
             ORDER BY department_id, position, id",
        )
        .map_err(from_rusqlite)?;
    let rows: Vec<(String, String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, department_id, number, kind) in rows {
        let room = Room::new(id.clone(), department_id.clone(), number, kind)
            .map_err(|e| corrupt_row("rooms", &id, e))?;
        store.get_department_mut(&department_id)?.add_room_id(id);
        store.insert_room(room);
    }
    Ok(())
}

fn load_doctors(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, first_name, last_name, dni, birth_date, blood_type,
                    license, specialty, department_id
             FROM doctors
             ORDER BY department_id, department_position, id",
        )
        .map_err(from_rusqlite)?;
    type DoctorRow = (String, PersonRow, String, String, Option<String>);
    let rows: Vec<DoctorRow> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                PersonRow {
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    dni: row.get(3)?,
                    birth_date: row.get(4)?,
                    blood_type: row.get(5)?,
                },
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, person, license, specialty, department_id) in rows {
        let person = person.into_person("doctors", &id)?;
        let license = License::new(license).map_err(|e| corrupt_row("doctors", &id, e))?;
        let specialty = parse_specialty("doctors", &id, &specialty)?;

        let mut doctor = Doctor::new(id.clone(), person, license, specialty);
        if let Some(department_id) = department_id {
            store.get_department_mut(&department_id)?.add_doctor_id(id);
            doctor.department_id = Some(department_id);
        }
        store.insert_doctor(doctor);
    }
    Ok(())
}

fn load_patients(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, first_name, last_name, dni, birth_date, blood_type,
                    phone, address, hospital_id, record_id
             FROM patients
             ORDER BY hospital_id, admission_position, id",
        )
        .map_err(from_rusqlite)?;
    type PatientRow = (String, PersonRow, String, String, Option<String>, String);
    let rows: Vec<PatientRow> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                PersonRow {
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    dni: row.get(3)?,
                    birth_date: row.get(4)?,
                    blood_type: row.get(5)?,
                },
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, person, phone, address, hospital_id, record_id) in rows {
        let person = person.into_person("patients", &id)?;
        let mut patient = Patient::new(id.clone(), person, phone, address, record_id)
            .map_err(|e| corrupt_row("patients", &id, e))?;
        if let Some(hospital_id) = hospital_id {
            store.get_hospital_mut(&hospital_id)?.add_patient_id(id);
            patient.hospital_id = Some(hospital_id);
        }
        store.insert_patient(patient);
    }
    Ok(())
}

fn load_records(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT id, patient_id, number, created_at FROM medical_records ORDER BY id")
        .map_err(from_rusqlite)?;
    let headers: Vec<(String, String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let mut entries_stmt = conn
        .prepare(
            "SELECT kind, text FROM record_entries
             WHERE record_id = ? ORDER BY kind, position",
        )
        .map_err(from_rusqlite)?;

    for (id, patient_id, number, created_at) in headers {
        let created_at = parse_datetime("medical_records", &id, &created_at)?;
        let dni = store.get_patient(&patient_id)?.dni().to_string();
        let mut record = MedicalRecord::new(id.clone(), patient_id, &dni, created_at);
        record.number = number;

        let entries: Vec<(String, String)> = entries_stmt
            .query_map([&id], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        for (kind, text) in entries {
            let kind = EntryKind::parse(&kind)
                .ok_or_else(|| corrupt_row("record_entries", &id, format!("unknown kind {}", kind)))?;
            record
                .add_entry(kind, text)
                .map_err(|e| corrupt_row("record_entries", &id, e))?;
        }
        store.insert_record(record);
    }
    Ok(())
}

fn load_appointments(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM appointments ORDER BY id",
            APPOINTMENT_COLUMNS
        ))
        .map_err(from_rusqlite)?;
    let rows: Vec<AppointmentRow> = stmt
        .query_map([], AppointmentRow::from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for row in rows {
        store.insert_appointment(row.into_appointment()?);
    }
    Ok(())
}

/// Write the whole store back
///
/// Parents are written before children so foreign keys hold at every
/// statement. Appointments missing from the store are deleted, which is how
/// an import's replacement reaches the database. Callers wrap this in a
/// transaction.
///
/// # Errors
///
/// `Persistence` on any SQLite failure.
pub fn persist_store(conn: &Connection, store: &Store) -> Result<()> {
    for hospital in store.list_hospitals() {
        SqliteRepo::persist_hospital(conn, hospital)?;
        for (position, department_id) in hospital.department_ids.iter().enumerate() {
            SqliteRepo::persist_department(conn, store.get_department(department_id)?, position)?;
        }
    }

    for department in store.list_departments() {
        for (position, room_id) in department.room_ids.iter().enumerate() {
            SqliteRepo::persist_room(conn, store.get_room(room_id)?, position)?;
        }
    }

    for doctor in store.list_doctors() {
        let position = match &doctor.department_id {
            Some(department_id) => store
                .get_department(department_id)?
                .doctor_ids
                .iter()
                .position(|id| id == &doctor.id),
            None => None,
        };
        SqliteRepo::persist_doctor(conn, doctor, position)?;
    }

    for patient in store.list_patients() {
        let position = match &patient.hospital_id {
            Some(hospital_id) => store
                .get_hospital(hospital_id)?
                .patient_ids
                .iter()
                .position(|id| id == &patient.id),
            None => None,
        };
        SqliteRepo::persist_patient(conn, patient, position)?;
    }

    for record in store.list_records() {
        SqliteRepo::persist_record(conn, record)?;
    }

    let kept: BTreeSet<&str> = store
        .list_appointments()
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();
    for stale in SqliteRepo::appointment_ids(conn)? {
        if !kept.contains(stale.as_str()) {
            SqliteRepo::delete_appointment(conn, &stale)?;
        }
    }
    for appointment in store.list_appointments() {
        SqliteRepo::persist_appointment(conn, appointment)?;
    }

    Ok(())
}
