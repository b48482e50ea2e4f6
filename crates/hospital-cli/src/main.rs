//! Hospital CLI
//!
//! Command-line interface over the hospital engine

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hospital_core::logging_facility;

mod commands;
mod settings;

use commands::Session;
use settings::HospitalConfig;

#[derive(Debug, Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital management: departments, staff, patients and appointments", long_about = None)]
struct Cli {
    /// Database file (overrides `database.path`)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Load the demonstration hospital into an empty database
    Seed,
    /// Schedule, list and move appointments through their lifecycle
    Appointment(commands::appointment::AppointmentArgs),
    /// Patient views
    Patient(commands::patient::PatientArgs),
    /// Add entries to a patient's medical record
    Record(commands::record::RecordArgs),
    /// Reports and statistics
    Report(commands::report::ReportArgs),
    /// Appointment CSV interchange
    Csv(commands::csv::CsvArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let cfg = HospitalConfig::load_with_dotenv(&cwd)?.with_database_path(cli.db);
    logging_facility::init(cfg.profile()?);
    tracing::debug!(db = %cfg.database.path.display(), "configuration loaded");

    let mut session = Session::open(cfg)?;
    match cli.command {
        Commands::Init => commands::init::execute(&session),
        Commands::Seed => commands::seed::execute(&mut session),
        Commands::Appointment(args) => commands::appointment::execute(args, &mut session),
        Commands::Patient(args) => commands::patient::execute(args, &session),
        Commands::Record(args) => commands::record::execute(args, &mut session),
        Commands::Report(args) => commands::report::execute(args, &session),
        Commands::Csv(args) => commands::csv::execute(args, &mut session),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
