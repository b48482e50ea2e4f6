#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Referential-integrity validation of hand-built stores

mod common;

use common::fixture;
use hospital_core::rules::validation::validate_store;
use hospital_core::{HospitalError, Room, Store};

#[test]
fn test_fixture_is_valid() {
    let f = fixture();
    validate_store(&f.store).unwrap();
    validate_store(&Store::new()).unwrap();
}

#[test]
fn test_room_with_unknown_department() {
    let mut f = fixture();
    f.store.insert_room(
        Room::new("r-x".into(), "missing".into(), "X-1".into(), "Ward".into()).unwrap(),
    );
    let err = validate_store(&f.store).unwrap_err();
    assert!(
        matches!(&err, HospitalError::IntegrityViolation { reason } if reason.contains("unknown department")),
        "{:?}",
        err
    );
}

#[test]
fn test_one_sided_doctor_assignment() {
    let mut f = fixture();
    f.store
        .get_department_mut(&f.cardiology_id)
        .unwrap()
        .doctor_ids
        .clear();
    assert!(matches!(
        validate_store(&f.store),
        Err(HospitalError::IntegrityViolation { .. })
    ));
}

#[test]
fn test_patient_without_record() {
    let mut f = fixture();
    f.store.get_patient_mut(&f.patient_id).unwrap().record_id = "gone".into();
    let err = validate_store(&f.store).unwrap_err();
    assert!(matches!(err, HospitalError::IntegrityViolation { reason } if reason.contains("medical record")));
}

#[test]
fn test_duplicate_room_number_detected() {
    let mut f = fixture();
    let mut copy = f.store.get_room(&f.card_room_id).unwrap().clone();
    copy.id = "r-dup".into();
    f.store
        .get_department_mut(&f.cardiology_id)
        .unwrap()
        .add_room_id("r-dup".into());
    f.store.insert_room(copy);

    let err = validate_store(&f.store).unwrap_err();
    assert!(matches!(err, HospitalError::IntegrityViolation { reason } if reason.contains("used twice")));
}
