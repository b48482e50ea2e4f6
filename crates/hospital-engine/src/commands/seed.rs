//! Demonstration data: one hospital with three departments, two doctors and
//! one patient with a populated record

#![allow(clippy::result_large_err)]

use chrono::NaiveDate;
use hospital_core::errors::{ExError, ExErrorKind};
use hospital_core::{
    apply, Applied, BloodType, Clock, Command, EntryKind, PersonInput, Specialty, Store,
};
use hospital_store::Result;
use serde::Serialize;

/// Ids of the seeded entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub hospital_id: String,
    pub department_ids: Vec<String>,
    pub room_ids: Vec<String>,
    pub doctor_ids: Vec<String>,
    pub patient_id: String,
}

struct Seeder<'a> {
    state: Store,
    clock: &'a dyn Clock,
}

impl Seeder<'_> {
    fn run(&mut self, cmd: Command) -> Result<String> {
        let op = cmd.op_name();
        let (next, applied) = apply(std::mem::take(&mut self.state), cmd, self.clock)?;
        self.state = next;
        match applied {
            Applied::Created(id) | Applied::Updated(id) => Ok(id),
            other => Err(ExError::new(ExErrorKind::Internal)
                .with_op(op)
                .with_message(format!("unexpected outcome {:?}", other))),
        }
    }
}

fn demo_person(first: &str, last: &str, dni: &str, birth: (i32, u32, u32), blood_type: BloodType) -> Result<PersonInput> {
    let birth_date = NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2).ok_or_else(|| {
        ExError::new(ExErrorKind::Internal)
            .with_op("seed")
            .with_message(format!("invalid birth date for {}", dni))
    })?;
    Ok(PersonInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        dni: dni.to_string(),
        birth_date,
        blood_type,
    })
}

/// Populate an empty store with the demonstration hospital
///
/// # Errors
///
/// `AlreadyExists` if the store already holds any entity.
pub fn seed_demo(state: Store, clock: &dyn Clock) -> Result<(Store, SeedSummary)> {
    if !state.is_empty() {
        return Err(ExError::new(ExErrorKind::AlreadyExists)
            .with_op("seed")
            .with_message("database already contains data"));
    }

    let mut seeder = Seeder { state, clock };

    let hospital_id = seeder.run(Command::CreateHospital {
        name: "Hospital Italiano".to_string(),
        address: "Av. de Acceso Este 1070".to_string(),
        phone: "0810-333-3330".to_string(),
    })?;

    let mut department_ids = Vec::new();
    let mut room_ids = Vec::new();
    for (name, specialty, room, kind) in [
        ("Cardiology", Specialty::Cardiology, "CARD-101", "Consulting room"),
        ("Pediatrics", Specialty::Pediatrics, "PED-201", "Consulting room"),
        ("Traumatology", Specialty::Traumatology, "TRA-301", "Operating room"),
    ] {
        let department_id = seeder.run(Command::AddDepartment {
            hospital_id: hospital_id.clone(),
            name: name.to_string(),
            specialty,
        })?;
        room_ids.push(seeder.run(Command::CreateRoom {
            department_id: department_id.clone(),
            number: room.to_string(),
            kind: kind.to_string(),
        })?);
        department_ids.push(department_id);
    }

    let mut doctor_ids = Vec::new();
    for (person, license, specialty, department) in [
        (
            demo_person("Diego", "González", "45423321", (1975, 5, 15), BloodType::APositive)?,
            "MP-12345",
            Specialty::Cardiology,
            &department_ids[0],
        ),
        (
            demo_person("Lucía", "Martínez", "50323212", (1982, 3, 2), BloodType::OPositive)?,
            "MP-54321",
            Specialty::Pediatrics,
            &department_ids[1],
        ),
    ] {
        let doctor_id = seeder.run(Command::RegisterDoctor {
            person,
            license: license.to_string(),
            specialty,
        })?;
        seeder.run(Command::AssignDoctor {
            department_id: department.clone(),
            doctor_id: doctor_id.clone(),
        })?;
        doctor_ids.push(doctor_id);
    }

    let patient_id = seeder.run(Command::RegisterPatient {
        person: demo_person("Carolina", "López", "54232123", (1985, 12, 5), BloodType::APositive)?,
        phone: "011-1111".to_string(),
        address: "La Cumbre 321".to_string(),
        hospital_id: Some(hospital_id.clone()),
    })?;
    for (kind, text) in [
        (EntryKind::Diagnosis, "Arterial hypertension"),
        (EntryKind::Treatment, "Enalapril 10mg"),
        (EntryKind::Allergy, "Lactose"),
    ] {
        seeder.run(Command::AddRecordEntry {
            patient_id: patient_id.clone(),
            kind,
            text: text.to_string(),
        })?;
    }

    Ok((
        seeder.state,
        SeedSummary {
            hospital_id,
            department_ids,
            room_ids,
            doctor_ids,
            patient_id,
        },
    ))
}
