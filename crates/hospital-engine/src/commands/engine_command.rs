//! Engine-level mutating commands
//!
//! `apply_engine_command` hydrates the store from SQLite, applies the
//! command through `hospital_core::apply`, and persists the result, all in
//! one transaction. A failing command leaves the database untouched.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;

use chrono::NaiveDateTime;
use hospital_core::{apply, Applied, Clock, Command, EntryKind, Money, Store};
use hospital_core_types::RequestContext;
use hospital_store::errors::{from_rusqlite, io_error};
use hospital_store::repo::{load_store, persist_store};
use hospital_store::Result;
use rusqlite::Connection;

use crate::commands::logged;
use crate::commands::references::{doctor_id_by_dni, patient_id_by_dni, room_id_by_number};
use crate::commands::seed::{seed_demo, SeedSummary};

#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Apply a core command addressed by store ids
    Apply(Command),

    /// Schedule an appointment addressed by DNI and room number
    ScheduleAppointment {
        patient_dni: String,
        doctor_dni: String,
        room_number: String,
        scheduled_at: NaiveDateTime,
        cost: Money,
    },

    /// Append a record entry for the patient with this DNI
    AddRecordEntry {
        patient_dni: String,
        kind: EntryKind,
        text: String,
    },

    /// Replace every appointment with the rows of a CSV file
    ImportCsvFile { path: PathBuf },

    /// Load the demonstration hospital into an empty database
    Seed,
}

impl EngineCommand {
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineCommand::Apply(cmd) => cmd.op_name(),
            EngineCommand::ScheduleAppointment { .. } => "schedule_appointment",
            EngineCommand::AddRecordEntry { .. } => "add_record_entry",
            EngineCommand::ImportCsvFile { .. } => "import_appointments",
            EngineCommand::Seed => "seed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    Applied(Applied),
    Seeded(SeedSummary),
}

/// Apply an engine command inside a single transaction
///
/// # Errors
///
/// The command's domain error converted to `ExError`, `Persistence` for
/// SQLite failures, or `Io` when a CSV file cannot be read. Every error
/// carries the request id of `ctx`.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    clock: &dyn Clock,
    ctx: &RequestContext,
) -> Result<EngineCommandResult> {
    let op = cmd.op_name();
    logged(op, ctx, || {
        let tx = conn.transaction().map_err(from_rusqlite)?;
        let state = load_store(&tx)?;

        let (next, result) = execute(cmd, state, clock)?;

        persist_store(&tx, &next)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(result)
    })
}

fn execute(
    cmd: EngineCommand,
    state: Store,
    clock: &dyn Clock,
) -> Result<(Store, EngineCommandResult)> {
    let core = match cmd {
        EngineCommand::Seed => {
            let (next, summary) = seed_demo(state, clock)?;
            return Ok((next, EngineCommandResult::Seeded(summary)));
        }

        EngineCommand::Apply(cmd) => cmd,

        EngineCommand::ScheduleAppointment {
            patient_dni,
            doctor_dni,
            room_number,
            scheduled_at,
            cost,
        } => Command::ScheduleAppointment {
            patient_id: patient_id_by_dni(&state, &patient_dni)?,
            doctor_id: doctor_id_by_dni(&state, &doctor_dni)?,
            room_id: room_id_by_number(&state, &room_number)?,
            scheduled_at,
            cost,
        },

        EngineCommand::AddRecordEntry {
            patient_dni,
            kind,
            text,
        } => Command::AddRecordEntry {
            patient_id: patient_id_by_dni(&state, &patient_dni)?,
            kind,
            text,
        },

        EngineCommand::ImportCsvFile { path } => {
            let document =
                std::fs::read_to_string(&path).map_err(|e| io_error("import_appointments", e))?;
            Command::ImportAppointments { csv: document }
        }
    };

    let (next, applied) = apply(state, core, clock)?;
    Ok((next, EngineCommandResult::Applied(applied)))
}
