//! `hospital record add-diagnosis|add-treatment|add-allergy <DNI> <TEXT>`

use clap::{Args, Subcommand};
use hospital_core::EntryKind;
use hospital_engine::EngineCommand;

use super::{CliResult, Session};

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub command: RecordCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    AddDiagnosis { dni: String, text: String },
    AddTreatment { dni: String, text: String },
    AddAllergy { dni: String, text: String },
}

pub fn execute(args: RecordArgs, session: &mut Session) -> CliResult {
    let (kind, dni, text) = match args.command {
        RecordCommand::AddDiagnosis { dni, text } => (EntryKind::Diagnosis, dni, text),
        RecordCommand::AddTreatment { dni, text } => (EntryKind::Treatment, dni, text),
        RecordCommand::AddAllergy { dni, text } => (EntryKind::Allergy, dni, text),
    };

    session.command(EngineCommand::AddRecordEntry {
        patient_dni: dni,
        kind,
        text,
    })?;
    println!("{} added", kind.as_str().to_lowercase());
    Ok(())
}
