//! Subcommand implementations

pub mod appointment;
pub mod csv;
pub mod init;
pub mod patient;
pub mod record;
pub mod report;
pub mod seed;

use chrono::NaiveDateTime;
use hospital_core::errors::{ExError, ExErrorKind};
use hospital_core::SystemClock;
use hospital_core_types::RequestContext;
use hospital_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};
use rusqlite::Connection;

use crate::settings::HospitalConfig;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// One CLI invocation: configuration, an open migrated database and the
/// request id shared by every engine call
pub struct Session {
    pub config: HospitalConfig,
    pub conn: Connection,
    ctx: RequestContext,
}

impl Session {
    pub fn open(config: HospitalConfig) -> Result<Self, ExError> {
        let conn = hospital_store::db::open(&config.database.path)?;
        Ok(Self {
            config,
            conn,
            ctx: RequestContext::new(),
        })
    }

    pub fn command(&mut self, cmd: EngineCommand) -> Result<EngineCommandResult, ExError> {
        apply_engine_command(cmd, &mut self.conn, &SystemClock, &self.ctx)
    }

    pub fn query(&self, query: EngineQuery) -> Result<EngineQueryResult, ExError> {
        apply_engine_query(query, &self.conn, &SystemClock, &self.ctx)
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse `2030-05-02T10:00` and the other accepted date-time forms
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, ExError> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
        .ok_or_else(|| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_datetime")
                .with_message(format!(
                    "invalid date-time '{}': expected YYYY-MM-DDTHH:MM",
                    value
                ))
        })
}

/// An engine result variant the caller did not ask for
pub fn unexpected(what: impl std::fmt::Debug) -> ExError {
    ExError::new(ExErrorKind::Internal).with_message(format!("unexpected engine result: {:?}", what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_forms() {
        let a = parse_datetime("2030-05-02T10:00").unwrap();
        assert_eq!(parse_datetime("2030-05-02 10:00").unwrap(), a);
        assert_eq!(parse_datetime("2030-05-02T10:00:00").unwrap(), a);

        let err = parse_datetime("02/05/2030").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}
