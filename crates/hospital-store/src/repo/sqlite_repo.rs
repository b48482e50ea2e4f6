//! Row-level upserts and lookups
//!
//! Every writer takes `&Connection`; a `Transaction` derefs to one, so the
//! same functions serve both standalone and transactional writes.

#![allow(clippy::result_large_err)]

use chrono::{NaiveDate, NaiveDateTime};
use hospital_core::model::{
    Appointment, AppointmentStatus, Department, Doctor, EntryKind, Hospital, MedicalRecord, Money,
    Patient, Room,
};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{corrupt_row, from_rusqlite, Result};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub(crate) fn format_datetime(at: NaiveDateTime) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn parse_datetime(table: &str, id: &str, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map_err(|e| corrupt_row(table, id, e))
}

pub(crate) fn parse_date(table: &str, id: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| corrupt_row(table, id, e))
}

/// Raw appointment columns, converted to a model value outside the row closure
pub(crate) struct AppointmentRow {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub room_id: String,
    pub scheduled_at: String,
    pub cost_cents: i64,
    pub status: String,
    pub notes: String,
}

pub(crate) const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, doctor_id, room_id, scheduled_at, cost_cents, status, notes";

impl AppointmentRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            doctor_id: row.get(2)?,
            room_id: row.get(3)?,
            scheduled_at: row.get(4)?,
            cost_cents: row.get(5)?,
            status: row.get(6)?,
            notes: row.get(7)?,
        })
    }

    pub(crate) fn into_appointment(self) -> Result<Appointment> {
        let scheduled_at = parse_datetime("appointments", &self.id, &self.scheduled_at)?;
        let status: AppointmentStatus = self
            .status
            .parse()
            .map_err(|e| corrupt_row("appointments", &self.id, e))?;

        let id = self.id.clone();
        Appointment::new(
            self.id,
            self.patient_id,
            self.doctor_id,
            self.room_id,
            scheduled_at,
            Money::from_cents(self.cost_cents),
        )
        .with_status(status)
        .with_notes(self.notes)
        .map_err(|e| corrupt_row("appointments", &id, e))
    }
}

/// SQLite repository for hospital entities
pub struct SqliteRepo;

impl SqliteRepo {
    pub fn persist_hospital(conn: &Connection, hospital: &Hospital) -> Result<()> {
        conn.execute(
            "INSERT INTO hospitals (id, name, address, phone)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                phone = excluded.phone",
            rusqlite::params![hospital.id, hospital.name, hospital.address, hospital.phone],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Upsert a department at `position` within its hospital
    pub fn persist_department(
        conn: &Connection,
        department: &Department,
        position: usize,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO departments (id, hospital_id, name, specialty, position)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                specialty = excluded.specialty,
                position = excluded.position",
            rusqlite::params![
                department.id,
                department.hospital_id,
                department.name,
                department.specialty.as_str(),
                position as i64,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Upsert a room at `position` within its department
    pub fn persist_room(conn: &Connection, room: &Room, position: usize) -> Result<()> {
        conn.execute(
            "INSERT INTO rooms (id, department_id, number, kind, position)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                number = excluded.number,
                kind = excluded.kind,
                position = excluded.position",
            rusqlite::params![
                room.id,
                room.department_id,
                room.number,
                room.kind,
                position as i64,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Upsert a doctor; `position` is the index in its department's roster
    pub fn persist_doctor(conn: &Connection, doctor: &Doctor, position: Option<usize>) -> Result<()> {
        let person = &doctor.person;
        conn.execute(
            "INSERT INTO doctors (id, first_name, last_name, dni, birth_date, blood_type,
                                  license, specialty, department_id, department_position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                birth_date = excluded.birth_date,
                blood_type = excluded.blood_type,
                specialty = excluded.specialty,
                department_id = excluded.department_id,
                department_position = excluded.department_position",
            rusqlite::params![
                doctor.id,
                person.first_name(),
                person.last_name(),
                person.dni(),
                person.birth_date().format(DATE_FORMAT).to_string(),
                person.blood_type().as_str(),
                doctor.license.as_str(),
                doctor.specialty.as_str(),
                doctor.department_id,
                position.map(|p| p as i64),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Upsert a patient; `position` is the index in its hospital's admissions
    pub fn persist_patient(
        conn: &Connection,
        patient: &Patient,
        position: Option<usize>,
    ) -> Result<()> {
        let person = &patient.person;
        conn.execute(
            "INSERT INTO patients (id, first_name, last_name, dni, birth_date, blood_type,
                                   phone, address, hospital_id, admission_position, record_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                birth_date = excluded.birth_date,
                blood_type = excluded.blood_type,
                phone = excluded.phone,
                address = excluded.address,
                hospital_id = excluded.hospital_id,
                admission_position = excluded.admission_position",
            rusqlite::params![
                patient.id,
                person.first_name(),
                person.last_name(),
                person.dni(),
                person.birth_date().format(DATE_FORMAT).to_string(),
                person.blood_type().as_str(),
                patient.phone,
                patient.address,
                patient.hospital_id,
                position.map(|p| p as i64),
                patient.record_id,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Upsert a record header and rewrite its entries
    pub fn persist_record(conn: &Connection, record: &MedicalRecord) -> Result<()> {
        conn.execute(
            "INSERT INTO medical_records (id, patient_id, number, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO NOTHING",
            rusqlite::params![
                record.id,
                record.patient_id,
                record.number,
                format_datetime(record.created_at),
            ],
        )
        .map_err(from_rusqlite)?;

        conn.execute("DELETE FROM record_entries WHERE record_id = ?", [&record.id])
            .map_err(from_rusqlite)?;

        let mut stmt = conn
            .prepare(
                "INSERT INTO record_entries (record_id, kind, position, text)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(from_rusqlite)?;
        for kind in [EntryKind::Diagnosis, EntryKind::Treatment, EntryKind::Allergy] {
            for (position, text) in record.entries(kind).iter().enumerate() {
                stmt.execute(rusqlite::params![
                    record.id,
                    kind.as_str(),
                    position as i64,
                    text
                ])
                .map_err(from_rusqlite)?;
            }
        }

        Ok(())
    }

    pub fn persist_appointment(conn: &Connection, appointment: &Appointment) -> Result<()> {
        conn.execute(
            "INSERT INTO appointments (id, patient_id, doctor_id, room_id, scheduled_at,
                                       cost_cents, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                scheduled_at = excluded.scheduled_at,
                cost_cents = excluded.cost_cents,
                status = excluded.status,
                notes = excluded.notes",
            rusqlite::params![
                appointment.id,
                appointment.patient_id,
                appointment.doctor_id,
                appointment.room_id,
                format_datetime(appointment.scheduled_at),
                appointment.cost.cents(),
                appointment.status.as_str(),
                appointment.notes,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn delete_appointment(conn: &Connection, appointment_id: &str) -> Result<()> {
        conn.execute("DELETE FROM appointments WHERE id = ?", [appointment_id])
            .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Ids of every stored appointment, ordered by id
    pub fn appointment_ids(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT id FROM appointments ORDER BY id")
            .map_err(from_rusqlite)?;
        let ids = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(ids)
    }

    pub fn get_appointment(conn: &Connection, appointment_id: &str) -> Result<Option<Appointment>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM appointments WHERE id = ?", APPOINTMENT_COLUMNS),
                [appointment_id],
                AppointmentRow::from_row,
            )
            .optional()
            .map_err(from_rusqlite)?;

        row.map(AppointmentRow::into_appointment).transpose()
    }

    /// Row count of any entity table, used by callers that only need totals
    pub fn count_rows(conn: &Connection, table: Table) -> Result<u64> {
        conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.name()),
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }
}

/// Entity tables that can be counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Hospitals,
    Departments,
    Rooms,
    Doctors,
    Patients,
    MedicalRecords,
    RecordEntries,
    Appointments,
}

impl Table {
    fn name(&self) -> &'static str {
        match self {
            Table::Hospitals => "hospitals",
            Table::Departments => "departments",
            Table::Rooms => "rooms",
            Table::Doctors => "doctors",
            Table::Patients => "patients",
            Table::MedicalRecords => "medical_records",
            Table::RecordEntries => "record_entries",
            Table::Appointments => "appointments",
        }
    }
}
