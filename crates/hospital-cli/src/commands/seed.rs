//! `hospital seed`

use hospital_engine::{EngineCommand, EngineCommandResult};

use super::{unexpected, CliResult, Session};

pub fn execute(session: &mut Session) -> CliResult {
    match session.command(EngineCommand::Seed)? {
        EngineCommandResult::Seeded(summary) => {
            println!("Seeded Hospital Italiano");
            println!("  hospital:    {}", summary.hospital_id);
            println!("  departments: {}", summary.department_ids.len());
            println!("  rooms:       {}", summary.room_ids.len());
            println!("  doctors:     {}", summary.doctor_ids.len());
            println!("  patient:     {}", summary.patient_id);
            Ok(())
        }
        other => Err(unexpected(other).into()),
    }
}
