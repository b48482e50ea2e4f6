//! `hospital csv export|import <PATH>`
//!
//! Relative paths are resolved against `export.directory`.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use hospital_core::Applied;
use hospital_engine::{EngineCommand, EngineCommandResult, EngineQuery, EngineQueryResult};

use super::{unexpected, CliResult, Session};

#[derive(Debug, Args)]
pub struct CsvArgs {
    #[command(subcommand)]
    pub command: CsvCommand,
}

#[derive(Debug, Subcommand)]
pub enum CsvCommand {
    /// Write every appointment to a CSV file
    Export { path: PathBuf },
    /// Replace every appointment with the rows of a CSV file
    Import { path: PathBuf },
}

pub fn execute(args: CsvArgs, session: &mut Session) -> CliResult {
    match args.command {
        CsvCommand::Export { path } => {
            let path = session.config.export_path(&path);
            match session.query(EngineQuery::ExportCsvFile { path })? {
                EngineQueryResult::FileWritten(written) => {
                    println!(
                        "Exported {} appointments to {}",
                        written.rows,
                        written.path.display()
                    );
                    Ok(())
                }
                other => Err(unexpected(other).into()),
            }
        }
        CsvCommand::Import { path } => {
            let path = session.config.export_path(&path);
            match session.command(EngineCommand::ImportCsvFile { path: path.clone() })? {
                EngineCommandResult::Applied(Applied::Imported(count)) => {
                    println!("Imported {} appointments from {}", count, path.display());
                    Ok(())
                }
                other => Err(unexpected(other).into()),
            }
        }
    }
}
