#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Command boundary: `apply()` outcomes, clock injection, validation

mod common;

use common::{at, fixture, now, person_input};
use hospital_core::{
    apply, Applied, AppointmentStatus, Command, EntryKind, ExError, ExErrorKind, FixedClock,
    HospitalError, Money, Specialty, StatusAction, Store,
};

#[test]
fn test_create_hospital_returns_created_id() {
    let cmd = Command::CreateHospital {
        name: "Hospital Italiano".into(),
        address: "Av. de Acceso Este 1070".into(),
        phone: "0810-333-3330".into(),
    };
    let (state, applied) = apply(Store::new(), cmd, &FixedClock(now())).unwrap();
    let id = applied.entity_id().unwrap().to_string();
    assert_eq!(state.get_hospital(&id).unwrap().name, "Hospital Italiano");
}

#[test]
fn test_register_patient_uses_clock_for_record_number() {
    let f = fixture();
    let clock = FixedClock(at(2031, 1, 1, 0, 0));
    let cmd = Command::RegisterPatient {
        person: person_input("Luis", "Gómez", "12312312"),
        phone: "011-3333".into(),
        address: "Mitre 10".into(),
        hospital_id: Some(f.hospital_id.clone()),
    };

    let (state, applied) = apply(f.store, cmd, &clock).unwrap();
    let Applied::Created(patient_id) = applied else {
        panic!("expected Created");
    };
    let record = state.record_for_patient(&patient_id).unwrap();
    assert_eq!(record.number, "HC-12312312-1924992000000");
    assert!(state
        .get_hospital(&f.hospital_id)
        .unwrap()
        .patient_ids
        .contains(&patient_id));
}

#[test]
fn test_register_doctor_validates_license_and_dni() {
    let f = fixture();
    let bad_license = Command::RegisterDoctor {
        person: person_input("Eva", "Luna", "11222333"),
        license: "MP-12".into(),
        specialty: Specialty::Neurology,
    };
    assert!(matches!(
        apply(f.store.clone(), bad_license, &FixedClock(now())),
        Err(HospitalError::InvalidLicense { .. })
    ));

    let bad_dni = Command::RegisterDoctor {
        person: person_input("Eva", "Luna", "11-222"),
        license: "MP-1234".into(),
        specialty: Specialty::Neurology,
    };
    assert!(matches!(
        apply(f.store.clone(), bad_dni, &FixedClock(now())),
        Err(HospitalError::InvalidDni { .. })
    ));

    let dup = Command::RegisterDoctor {
        person: person_input("Eva", "Luna", "45423321"),
        license: "MP-1234".into(),
        specialty: Specialty::Neurology,
    };
    assert!(matches!(
        apply(f.store, dup, &FixedClock(now())),
        Err(HospitalError::DuplicateDni { .. })
    ));
}

#[test]
fn test_assign_doctor_specialty_mismatch() {
    let f = fixture();
    let cmd = Command::AssignDoctor {
        department_id: f.pediatrics_id.clone(),
        doctor_id: f.cardiologist_id.clone(),
    };
    let err = apply(f.store, cmd, &FixedClock(now())).unwrap_err();
    assert!(matches!(
        err,
        HospitalError::SpecialtyMismatch {
            doctor_specialty: Specialty::Cardiology,
            required: Specialty::Pediatrics
        }
    ));
}

#[test]
fn test_schedule_uses_injected_clock() {
    let f = fixture();
    let cmd = Command::ScheduleAppointment {
        patient_id: f.patient_id.clone(),
        doctor_id: f.cardiologist_id.clone(),
        room_id: f.card_room_id.clone(),
        scheduled_at: at(2030, 5, 2, 10, 0),
        cost: Money::from_cents(5000),
    };

    // Same command is in the past for a later clock
    let late_clock = FixedClock(at(2030, 5, 3, 0, 0));
    assert!(matches!(
        apply(f.store.clone(), cmd.clone(), &late_clock),
        Err(HospitalError::AppointmentInPast { .. })
    ));

    let (state, applied) = apply(f.store, cmd, &FixedClock(now())).unwrap();
    let id = applied.entity_id().unwrap();
    assert_eq!(
        state.get_appointment(id).unwrap().status,
        AppointmentStatus::Scheduled
    );
}

#[test]
fn test_transition_and_cancel_outcomes() {
    let f = fixture();
    let clock = FixedClock(now());
    let (state, applied) = apply(
        f.store,
        Command::ScheduleAppointment {
            patient_id: f.patient_id.clone(),
            doctor_id: f.cardiologist_id.clone(),
            room_id: f.card_room_id.clone(),
            scheduled_at: at(2030, 5, 2, 10, 0),
            cost: Money::from_cents(5000),
        },
        &clock,
    )
    .unwrap();
    let id = applied.entity_id().unwrap().to_string();

    let (state, applied) = apply(
        state,
        Command::CancelAppointment {
            appointment_id: id.clone(),
            reason: Some("fever".into()),
        },
        &clock,
    )
    .unwrap();
    assert_eq!(
        applied,
        Applied::Transitioned {
            appointment_id: id.clone(),
            status: AppointmentStatus::Cancelled
        }
    );

    let err = apply(
        state,
        Command::TransitionAppointment {
            appointment_id: id,
            action: StatusAction::Advance,
        },
        &clock,
    )
    .unwrap_err();
    assert!(matches!(err, HospitalError::InvalidTransition { .. }));
}

#[test]
fn test_record_entry_command() {
    let f = fixture();
    let (state, _) = apply(
        f.store,
        Command::AddRecordEntry {
            patient_id: f.patient_id.clone(),
            kind: EntryKind::Allergy,
            text: "Dairy".into(),
        },
        &FixedClock(now()),
    )
    .unwrap();
    assert_eq!(
        state.record_for_patient(&f.patient_id).unwrap().allergies,
        vec!["Dairy"]
    );
}

#[test]
fn test_failed_apply_leaves_clone_untouched() {
    let f = fixture();
    let before = f.store.clone();
    let cmd = Command::AddDepartment {
        hospital_id: f.hospital_id.clone(),
        name: "Cardiology".into(),
        specialty: Specialty::Cardiology,
    };
    assert!(apply(f.store, cmd, &FixedClock(now())).is_err());
    assert_eq!(before.get_hospital(&f.hospital_id).unwrap().department_ids.len(), 2);
}

#[test]
fn test_import_command_counts_rows() {
    let f = fixture();
    let csv = "patient_dni,doctor_dni,room_number,scheduled_at,cost,status,notes\n\
               54232123,45423321,CARD-101,2030-05-02T10:00:00,10.00,SCHEDULED,\n";
    let (state, applied) = apply(
        f.store,
        Command::ImportAppointments { csv: csv.into() },
        &FixedClock(now()),
    )
    .unwrap();
    assert_eq!(applied, Applied::Imported(1));
    assert_eq!(state.list_appointments().len(), 1);
}

fn second_hospital(store: Store) -> (Store, String) {
    let cmd = Command::CreateHospital {
        name: "Hospital Alemán".into(),
        address: "Av. Pueyrredón 1640".into(),
        phone: "011-4827-7000".into(),
    };
    let (state, applied) = apply(store, cmd, &FixedClock(now())).unwrap();
    let id = applied.entity_id().unwrap().to_string();
    (state, id)
}

#[test]
fn test_admit_patient_moves_between_hospitals() {
    let f = fixture();
    let (store, other_id) = second_hospital(f.store);

    let cmd = Command::AdmitPatient {
        hospital_id: other_id.clone(),
        patient_id: f.patient_id.clone(),
    };
    let (state, _) = apply(store, cmd, &FixedClock(now())).unwrap();

    let patient = state.get_patient(&f.patient_id).unwrap();
    assert_eq!(patient.hospital_id.as_deref(), Some(other_id.as_str()));
    assert!(!state
        .get_hospital(&f.hospital_id)
        .unwrap()
        .patient_ids
        .contains(&f.patient_id));
    assert!(state
        .get_hospital(&other_id)
        .unwrap()
        .patient_ids
        .contains(&f.patient_id));
    // the other patient stays put
    assert!(state
        .get_hospital(&f.hospital_id)
        .unwrap()
        .patient_ids
        .contains(&f.other_patient_id));
}

#[test]
fn test_reassigning_doctor_leaves_previous_department() {
    let f = fixture();
    let (store, other_id) = second_hospital(f.store);
    let (store, applied) = apply(
        store,
        Command::AddDepartment {
            hospital_id: other_id,
            name: "Cardiology".into(),
            specialty: Specialty::Cardiology,
        },
        &FixedClock(now()),
    )
    .unwrap();
    let new_dept = applied.entity_id().unwrap().to_string();

    let cmd = Command::AssignDoctor {
        department_id: new_dept.clone(),
        doctor_id: f.cardiologist_id.clone(),
    };
    let (state, _) = apply(store, cmd, &FixedClock(now())).unwrap();

    assert!(!state
        .get_department(&f.cardiology_id)
        .unwrap()
        .doctor_ids
        .contains(&f.cardiologist_id));
    assert_eq!(
        state.get_department(&new_dept).unwrap().doctor_ids,
        vec![f.cardiologist_id.clone()]
    );
    assert_eq!(
        state.get_doctor(&f.cardiologist_id).unwrap().department_id.as_deref(),
        Some(new_dept.as_str())
    );
}

#[test]
fn test_duplicate_department_name_in_hospital_rejected() {
    let f = fixture();
    let cmd = Command::AddDepartment {
        hospital_id: f.hospital_id.clone(),
        name: "Cardiology".into(),
        specialty: Specialty::Cardiology,
    };
    let err = apply(f.store, cmd, &FixedClock(now())).unwrap_err();
    assert!(matches!(err, HospitalError::DuplicateDepartment { ref name, .. } if name == "Cardiology"));
    assert_eq!(ExError::from(err).kind(), ExErrorKind::AlreadyExists);
}

#[test]
fn test_duplicate_room_number_rejected_across_departments() {
    let f = fixture();
    let cmd = Command::CreateRoom {
        department_id: f.pediatrics_id.clone(),
        number: "CARD-101".into(),
        kind: "Consulting".into(),
    };
    let err = apply(f.store, cmd, &FixedClock(now())).unwrap_err();
    assert!(matches!(err, HospitalError::DuplicateRoomNumber { ref number } if number == "CARD-101"));
    assert_eq!(ExError::from(err).kind(), ExErrorKind::AlreadyExists);
}

#[test]
fn test_duplicate_license_is_already_exists() {
    let f = fixture();
    let cmd = Command::RegisterDoctor {
        person: person_input("Eva", "Luna", "11222333"),
        license: "MP-12345".into(),
        specialty: Specialty::Neurology,
    };
    let err = apply(f.store, cmd, &FixedClock(now())).unwrap_err();
    assert!(matches!(err, HospitalError::DuplicateLicense { ref license } if license == "MP-12345"));
    assert_eq!(ExError::from(err).kind(), ExErrorKind::AlreadyExists);
}
