//! `hospital init`

use hospital_store::migrations::applied_migrations;

use super::{CliResult, Session};

/// Opening the session already migrated the database; report what is there
pub fn execute(session: &Session) -> CliResult {
    let migrations = applied_migrations(&session.conn)?;
    println!(
        "Database ready at {} (migrations: {})",
        session.config.database.path.display(),
        migrations.join(", ")
    );
    Ok(())
}
