//! `hospital report ...`

use std::path::PathBuf;

use clap::{Args, Subcommand};
use hospital_core::reports::{
    render_hospital_overview, render_patients_with_allergies, render_resource_summary,
    render_specialty_counts, render_status_report,
};
use hospital_engine::{EngineQuery, EngineQueryResult};

use super::{unexpected, CliResult, Session};

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Doctors per specialty
    Specialties {
        /// Also write the counts to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Appointments per status with percentages
    Statuses,
    /// Patients with at least one allergy
    Allergies,
    /// Rooms, patients, doctors and scheduled appointments
    Resources,
    /// Departments and patients of a hospital
    Hospital {
        /// Hospital id (defaults to the first hospital)
        #[arg(long)]
        id: Option<String>,
    },
}

pub fn execute(args: ReportArgs, session: &Session) -> CliResult {
    let (query, csv) = match args.command {
        ReportCommand::Specialties { csv } => (EngineQuery::SpecialtyCounts, csv),
        ReportCommand::Statuses => (EngineQuery::StatusReport, None),
        ReportCommand::Allergies => (EngineQuery::PatientsWithAllergies, None),
        ReportCommand::Resources => (EngineQuery::ResourceSummary, None),
        ReportCommand::Hospital { id } => (EngineQuery::HospitalOverview { hospital_id: id }, None),
    };

    let text = match session.query(query)? {
        EngineQueryResult::SpecialtyCounts(counts) => render_specialty_counts(&counts),
        EngineQueryResult::StatusReport(report) => render_status_report(&report),
        EngineQueryResult::PatientsWithAllergies(entries) => render_patients_with_allergies(&entries),
        EngineQueryResult::ResourceSummary(summary) => render_resource_summary(&summary),
        EngineQueryResult::HospitalOverview(overview) => render_hospital_overview(&overview),
        other => return Err(unexpected(other).into()),
    };
    print!("{}", text);

    if let Some(path) = csv {
        let path = session.config.export_path(&path);
        if let EngineQueryResult::FileWritten(written) =
            session.query(EngineQuery::ExportSpecialtyCsvFile { path })?
        {
            println!("Specialty counts written to {}", written.path.display());
        }
    }
    Ok(())
}
