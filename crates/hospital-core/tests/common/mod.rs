#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use hospital_core::ops::{hospital_ops, patient_ops, staff_ops};
use hospital_core::{BloodType, License, Person, PersonInput, Specialty, Store};

/// Fixed "now" used by every fixture: 2030-05-01 08:00
pub fn now() -> NaiveDateTime {
    at(2030, 5, 1, 8, 0)
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

pub fn person_input(first: &str, last: &str, dni: &str) -> PersonInput {
    PersonInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        dni: dni.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
        blood_type: BloodType::OPositive,
    }
}

pub fn person(first: &str, last: &str, dni: &str) -> Person {
    Person::new(person_input(first, last, dni)).unwrap()
}

/// A hospital with two departments, one room and one doctor each, and
/// two patients
pub struct Fixture {
    pub store: Store,
    pub hospital_id: String,
    pub cardiology_id: String,
    pub pediatrics_id: String,
    pub card_room_id: String,
    pub ped_room_id: String,
    pub cardiologist_id: String,
    pub pediatrician_id: String,
    pub patient_id: String,
    pub other_patient_id: String,
}

pub fn fixture() -> Fixture {
    let mut store = Store::new();

    let hospital_id = hospital_ops::create_hospital(
        &mut store,
        "Hospital Central".into(),
        "Av. Libertador 1234".into(),
        "011-4567-8901".into(),
    )
    .unwrap();

    let cardiology_id =
        hospital_ops::add_department(&mut store, &hospital_id, "Cardiology".into(), Specialty::Cardiology)
            .unwrap();
    let pediatrics_id =
        hospital_ops::add_department(&mut store, &hospital_id, "Pediatrics".into(), Specialty::Pediatrics)
            .unwrap();

    let card_room_id =
        hospital_ops::create_room(&mut store, &cardiology_id, "CARD-101".into(), "Consulting".into())
            .unwrap();
    let ped_room_id =
        hospital_ops::create_room(&mut store, &pediatrics_id, "PED-201".into(), "Consulting".into())
            .unwrap();

    let cardiologist_id = staff_ops::register_doctor(
        &mut store,
        person("Diego", "González", "45423321"),
        License::new("MP-12345").unwrap(),
        Specialty::Cardiology,
    )
    .unwrap();
    staff_ops::assign_doctor(&mut store, &cardiology_id, &cardiologist_id).unwrap();

    let pediatrician_id = staff_ops::register_doctor(
        &mut store,
        person("Lucía", "Martínez", "50323212"),
        License::new("MP-54321").unwrap(),
        Specialty::Pediatrics,
    )
    .unwrap();
    staff_ops::assign_doctor(&mut store, &pediatrics_id, &pediatrician_id).unwrap();

    let patient_id = patient_ops::register_patient(
        &mut store,
        person("Carolina", "López", "54232123"),
        "011-1111".into(),
        "La Cumbre 321".into(),
        Some(&hospital_id),
        now(),
    )
    .unwrap();

    let other_patient_id = patient_ops::register_patient(
        &mut store,
        person("Ana", "Pérez", "3456789"),
        "011-2222".into(),
        "Belgrano 55".into(),
        Some(&hospital_id),
        now(),
    )
    .unwrap();

    Fixture {
        store,
        hospital_id,
        cardiology_id,
        pediatrics_id,
        card_room_id,
        ped_room_id,
        cardiologist_id,
        pediatrician_id,
        patient_id,
        other_patient_id,
    }
}
