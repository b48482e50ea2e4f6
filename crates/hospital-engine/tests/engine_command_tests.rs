mod common;

use common::*;
use hospital_core::{Applied, AppointmentStatus, Command, EntryKind, ExErrorKind, StatusAction};
use hospital_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use hospital_store::repo::sqlite_repo::Table;
use hospital_store::repo::{load_store, SqliteRepo};

#[test]
fn test_seed_populates_demonstration_hospital() {
    let (conn, summary) = seeded();

    assert_eq!(summary.department_ids.len(), 3);
    assert_eq!(summary.room_ids.len(), 3);
    assert_eq!(summary.doctor_ids.len(), 2);

    let store = load_store(&conn).unwrap();
    let record = store.record_for_patient(&summary.patient_id).unwrap();
    assert_eq!(record.diagnoses, vec!["Arterial hypertension"]);
    assert_eq!(record.treatments, vec!["Enalapril 10mg"]);
    assert_eq!(record.allergies, vec!["Lactose"]);
    assert_eq!(store.get_hospital(&summary.hospital_id).unwrap().patient_ids.len(), 1);
}

#[test]
fn test_seed_twice_is_rejected() {
    let (mut conn, _) = seeded();
    let err = apply_engine_command(EngineCommand::Seed, &mut conn, &clock(), &ctx()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(SqliteRepo::count_rows(&conn, Table::Hospitals).unwrap(), 1);
}

#[test]
fn test_schedule_by_reference_persists() {
    let (mut conn, _) = seeded();
    let id = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();

    let stored = SqliteRepo::get_appointment(&conn, &id).unwrap().unwrap();
    assert_eq!(stored.status, AppointmentStatus::Scheduled);
    assert_eq!(stored.cost.to_string(), "1500.00");
}

#[test]
fn test_failed_command_writes_nothing() {
    let (mut conn, _) = seeded();
    schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();

    // Same doctor 90 minutes later.
    let err = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 11, 30)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DoctorUnavailable);
    assert_eq!(SqliteRepo::count_rows(&conn, Table::Appointments).unwrap(), 1);

    // Pediatrician in a cardiology room.
    let err = schedule(&mut conn, PEDIATRICIAN_DNI, "CARD-101", at(2030, 5, 3, 10, 0)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SpecialtyMismatch);
    assert_eq!(SqliteRepo::count_rows(&conn, Table::Appointments).unwrap(), 1);
}

#[test]
fn test_unknown_references_are_not_found() {
    let (mut conn, _) = seeded();
    let err = schedule(&mut conn, "11111111", "CARD-101", at(2030, 5, 2, 10, 0)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);

    let err = schedule(&mut conn, CARDIOLOGIST_DNI, "NOPE-1", at(2030, 5, 2, 10, 0)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_lifecycle_through_engine() {
    let (mut conn, _) = seeded();
    let id = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();

    for expected in [AppointmentStatus::InProgress, AppointmentStatus::Completed] {
        let result = apply_engine_command(
            EngineCommand::Apply(Command::TransitionAppointment {
                appointment_id: id.clone(),
                action: StatusAction::Advance,
            }),
            &mut conn,
            &clock(),
            &ctx(),
        )
        .unwrap();
        assert_eq!(
            result,
            EngineCommandResult::Applied(Applied::Transitioned {
                appointment_id: id.clone(),
                status: expected,
            })
        );
    }

    let err = apply_engine_command(
        EngineCommand::Apply(Command::CancelAppointment {
            appointment_id: id.clone(),
            reason: Some("too late".to_string()),
        }),
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidTransition);

    let stored = SqliteRepo::get_appointment(&conn, &id).unwrap().unwrap();
    assert_eq!(stored.status, AppointmentStatus::Completed);
    assert_eq!(stored.notes, "");
}

#[test]
fn test_add_record_entry_by_dni() {
    let (mut conn, summary) = seeded();
    apply_engine_command(
        EngineCommand::AddRecordEntry {
            patient_dni: PATIENT_DNI.to_string(),
            kind: EntryKind::Allergy,
            text: "Penicillin".to_string(),
        },
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap();

    let store = load_store(&conn).unwrap();
    let record = store.record_for_patient(&summary.patient_id).unwrap();
    assert_eq!(record.allergies, vec!["Lactose", "Penicillin"]);
}

#[test]
fn test_import_csv_file_replaces_appointments() {
    let (mut conn, _) = seeded();
    schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("appointments.csv");
    std::fs::write(
        &path,
        "patient_dni,doctor_dni,room_number,scheduled_at,cost,status,notes\n\
         54232123,50323212,PED-201,2030-06-01T09:00:00,800.00,SCHEDULED,first visit\n\
         54232123,45423321,CARD-101,2030-06-02T09:00:00,1200.00,COMPLETED,\n",
    )
    .unwrap();

    let result = apply_engine_command(
        EngineCommand::ImportCsvFile { path },
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap();
    assert_eq!(result, EngineCommandResult::Applied(Applied::Imported(2)));
    assert_eq!(SqliteRepo::count_rows(&conn, Table::Appointments).unwrap(), 2);
}

#[test]
fn test_import_bad_csv_keeps_existing_appointments() {
    let (mut conn, _) = seeded();
    schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(
        &path,
        "patient_dni,doctor_dni,room_number,scheduled_at,cost,status,notes\n\
         54232123,50323212,PED-201\n",
    )
    .unwrap();

    let err = apply_engine_command(
        EngineCommand::ImportCsvFile { path },
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidCsv);
    assert_eq!(SqliteRepo::count_rows(&conn, Table::Appointments).unwrap(), 1);
}

#[test]
fn test_missing_csv_file_is_io_error() {
    let (mut conn, _) = seeded();
    let err = apply_engine_command(
        EngineCommand::ImportCsvFile {
            path: "/nonexistent/appointments.csv".into(),
        },
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_errors_carry_request_id_and_op() {
    let (mut conn, _) = seeded();
    let ctx = ctx();
    let err = apply_engine_command(
        EngineCommand::Apply(Command::TransitionAppointment {
            appointment_id: "missing".to_string(),
            action: StatusAction::Advance,
        }),
        &mut conn,
        &clock(),
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("transition_appointment"));
    assert_eq!(err.request_id(), Some(&ctx.request_id));
}
