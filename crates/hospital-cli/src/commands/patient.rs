//! `hospital patient show <DNI>`

use clap::{Args, Subcommand};
use hospital_core::reports::render_patient_overview;
use hospital_engine::{EngineQuery, EngineQueryResult};

use super::{unexpected, CliResult, Session};

#[derive(Debug, Args)]
pub struct PatientArgs {
    #[command(subcommand)]
    pub command: PatientCommand,
}

#[derive(Debug, Subcommand)]
pub enum PatientCommand {
    /// Personal data, medical record and appointments
    Show { dni: String },
}

pub fn execute(args: PatientArgs, session: &Session) -> CliResult {
    match args.command {
        PatientCommand::Show { dni } => match session.query(EngineQuery::PatientOverview { dni })? {
            EngineQueryResult::PatientOverview(overview) => {
                print!("{}", render_patient_overview(&overview));
                Ok(())
            }
            other => Err(unexpected(other).into()),
        },
    }
}
