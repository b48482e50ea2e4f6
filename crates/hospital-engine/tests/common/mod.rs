#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use hospital_core::FixedClock;
use hospital_core_types::RequestContext;
use hospital_engine::commands::seed::SeedSummary;
use hospital_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use rusqlite::Connection;

pub const PATIENT_DNI: &str = "54232123";
pub const CARDIOLOGIST_DNI: &str = "45423321";
pub const PEDIATRICIAN_DNI: &str = "50323212";

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

/// 2030-05-01 08:00
pub fn clock() -> FixedClock {
    FixedClock(at(2030, 5, 1, 8, 0))
}

pub fn ctx() -> RequestContext {
    RequestContext::new()
}

/// A migrated in-memory database holding the demonstration hospital
pub fn seeded() -> (Connection, SeedSummary) {
    let mut conn = hospital_store::db::open_in_memory().unwrap();
    let result = apply_engine_command(EngineCommand::Seed, &mut conn, &clock(), &ctx()).unwrap();
    match result {
        EngineCommandResult::Seeded(summary) => (conn, summary),
        other => panic!("unexpected result {:?}", other),
    }
}

pub fn schedule(
    conn: &mut Connection,
    doctor_dni: &str,
    room: &str,
    scheduled_at: NaiveDateTime,
) -> hospital_store::Result<String> {
    let result = apply_engine_command(
        EngineCommand::ScheduleAppointment {
            patient_dni: PATIENT_DNI.to_string(),
            doctor_dni: doctor_dni.to_string(),
            room_number: room.to_string(),
            scheduled_at,
            cost: "1500.00".parse().unwrap(),
        },
        conn,
        &clock(),
        &ctx(),
    )?;
    match result {
        EngineCommandResult::Applied(applied) => Ok(applied.entity_id().unwrap().to_string()),
        other => panic!("unexpected result {:?}", other),
    }
}
