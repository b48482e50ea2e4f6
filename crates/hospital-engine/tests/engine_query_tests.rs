mod common;

use common::*;
use hospital_core::logging_facility::init_test_capture;
use hospital_core::{AppointmentStatus, Command, ExErrorKind, Specialty};
use hospital_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use hospital_engine::{apply_engine_command, apply_engine_query, EngineCommand, EngineQuery, EngineQueryResult};

fn query(conn: &rusqlite::Connection, query: EngineQuery) -> EngineQueryResult {
    apply_engine_query(query, conn, &clock(), &ctx()).unwrap()
}

#[test]
fn test_list_appointments_filters_by_patient_and_doctor() {
    let (mut conn, _) = seeded();
    let first = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 3, 10, 0)).unwrap();
    let second = schedule(&mut conn, PEDIATRICIAN_DNI, "PED-201", at(2030, 5, 2, 10, 0)).unwrap();
    apply_engine_command(
        EngineCommand::Apply(Command::CancelAppointment {
            appointment_id: first.clone(),
            reason: None,
        }),
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap();

    let EngineQueryResult::Appointments(all) = query(
        &conn,
        EngineQuery::ListAppointments {
            patient_dni: Some(PATIENT_DNI.to_string()),
            doctor_dni: None,
            room_number: None,
        },
    ) else {
        panic!("expected appointments");
    };
    let ids: Vec<&str> = all.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    assert_eq!(all[1].status, AppointmentStatus::Cancelled);
    assert_eq!(all[0].doctor, "Lucía Martínez");
    assert_eq!(all[0].room, "PED-201");

    let EngineQueryResult::Appointments(cardio) = query(
        &conn,
        EngineQuery::ListAppointments {
            patient_dni: None,
            doctor_dni: Some(CARDIOLOGIST_DNI.to_string()),
            room_number: None,
        },
    ) else {
        panic!("expected appointments");
    };
    assert!(cardio.is_empty());
}

#[test]
fn test_list_appointments_filters_by_room() {
    let (mut conn, _) = seeded();
    let late = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 4, 10, 0)).unwrap();
    let early = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 3, 10, 0)).unwrap();
    let cancelled = schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 5, 10, 0)).unwrap();
    schedule(&mut conn, PEDIATRICIAN_DNI, "PED-201", at(2030, 5, 3, 10, 0)).unwrap();
    apply_engine_command(
        EngineCommand::Apply(Command::CancelAppointment {
            appointment_id: cancelled,
            reason: None,
        }),
        &mut conn,
        &clock(),
        &ctx(),
    )
    .unwrap();

    let EngineQueryResult::Appointments(room) = query(
        &conn,
        EngineQuery::ListAppointments {
            patient_dni: None,
            doctor_dni: None,
            room_number: Some("CARD-101".to_string()),
        },
    ) else {
        panic!("expected appointments");
    };
    let ids: Vec<&str> = room.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![early.as_str(), late.as_str()]);
    assert!(room.iter().all(|a| a.room == "CARD-101"));

    let err = apply_engine_query(
        EngineQuery::ListAppointments {
            patient_dni: None,
            doctor_dni: None,
            room_number: Some("XYZ-999".to_string()),
        },
        &conn,
        &clock(),
        &ctx(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("list_appointments"));
}

#[test]
fn test_patient_overview_uses_clock_for_age() {
    let (conn, _) = seeded();
    let EngineQueryResult::PatientOverview(overview) = query(
        &conn,
        EngineQuery::PatientOverview {
            dni: PATIENT_DNI.to_string(),
        },
    ) else {
        panic!("expected overview");
    };

    assert_eq!(overview.full_name, "Carolina López");
    // Born 1985-12-05, clock at 2030-05-01.
    assert_eq!(overview.age, 44);
    assert_eq!(overview.allergies, vec!["Lactose"]);
}

#[test]
fn test_unknown_patient_is_not_found() {
    let (conn, _) = seeded();
    let err = apply_engine_query(
        EngineQuery::PatientOverview {
            dni: "99999999".to_string(),
        },
        &conn,
        &clock(),
        &ctx(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("patient_overview"));
}

#[test]
fn test_reports_over_seeded_data() {
    let (mut conn, _) = seeded();
    schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();

    let EngineQueryResult::SpecialtyCounts(counts) = query(&conn, EngineQuery::SpecialtyCounts) else {
        panic!("expected counts");
    };
    let specialties: Vec<Specialty> = counts.iter().map(|c| c.specialty).collect();
    assert_eq!(specialties, vec![Specialty::Cardiology, Specialty::Pediatrics]);

    let EngineQueryResult::ResourceSummary(summary) = query(&conn, EngineQuery::ResourceSummary) else {
        panic!("expected summary");
    };
    assert_eq!(summary.rooms, 3);
    assert_eq!(summary.doctors, 2);
    assert_eq!(summary.patients, 1);
    assert_eq!(summary.scheduled_appointments, 1);

    let EngineQueryResult::StatusReport(report) = query(&conn, EngineQuery::StatusReport) else {
        panic!("expected status report");
    };
    assert_eq!(report.total, 1);

    let EngineQueryResult::HospitalOverview(overview) =
        query(&conn, EngineQuery::HospitalOverview { hospital_id: None })
    else {
        panic!("expected hospital overview");
    };
    assert_eq!(overview.name, "Hospital Italiano");
    assert_eq!(overview.departments.len(), 3);
}

#[test]
fn test_export_files() {
    let (mut conn, _) = seeded();
    schedule(&mut conn, CARDIOLOGIST_DNI, "CARD-101", at(2030, 5, 2, 10, 0)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("out").join("appointments.csv");
    let EngineQueryResult::FileWritten(written) =
        query(&conn, EngineQuery::ExportCsvFile { path: path.clone() })
    else {
        panic!("expected file");
    };
    assert_eq!(written.rows, 1);
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], hospital_core::csv::CSV_HEADER);
    assert_eq!(
        lines[1],
        "54232123,45423321,CARD-101,2030-05-02T10:00:00,1500.00,SCHEDULED,"
    );

    let path = dir.path().join("specialties.csv");
    query(&conn, EngineQuery::ExportSpecialtyCsvFile { path: path.clone() });
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "specialty,count\nCARDIOLOGY,1\nPEDIATRICS,1\n"
    );
}

#[test]
fn test_lifecycle_events_carry_request_id() {
    let capture = init_test_capture();
    let (conn, _) = seeded();

    let ok_ctx = ctx();
    apply_engine_query(EngineQuery::ResourceSummary, &conn, &clock(), &ok_ctx).unwrap();
    let ok_events: Vec<_> = capture
        .events_for_op("report_resources")
        .into_iter()
        .filter(|e| e.field("request_id") == Some(ok_ctx.request_id.as_str()))
        .collect();
    let kinds: Vec<_> = ok_events.iter().filter_map(|e| e.event()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END]);

    let err_ctx = ctx();
    apply_engine_query(
        EngineQuery::PatientOverview {
            dni: "99999999".to_string(),
        },
        &conn,
        &clock(),
        &err_ctx,
    )
    .unwrap_err();
    let err_events: Vec<_> = capture
        .events_for_op("patient_overview")
        .into_iter()
        .filter(|e| e.field("request_id") == Some(err_ctx.request_id.as_str()))
        .collect();
    assert_eq!(err_events.len(), 2);
    assert_eq!(err_events[1].event(), Some(EVENT_END_ERROR));
    assert_eq!(err_events[1].field("err_code"), Some("ERR_NOT_FOUND"));
}
