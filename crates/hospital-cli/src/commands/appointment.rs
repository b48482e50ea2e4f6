//! `hospital appointment ...`
//!
//! Usage:
//!   hospital appointment schedule --patient <DNI> --doctor <DNI> --room <NUMBER> --at <DATETIME> --cost <AMOUNT>
//!   hospital appointment advance|no-show <ID>
//!   hospital appointment cancel <ID> [--reason <TEXT>]
//!   hospital appointment notes <ID> <TEXT>
//!   hospital appointment list [--patient <DNI> | --doctor <DNI> | --room <NUMBER>]

use clap::{Args, Subcommand};
use hospital_core::{Applied, Command, Money, StatusAction};
use hospital_engine::commands::engine_query::AppointmentView;
use hospital_engine::{EngineCommand, EngineCommandResult, EngineQuery, EngineQueryResult};

use super::{parse_datetime, unexpected, CliResult, Session};

#[derive(Debug, Args)]
pub struct AppointmentArgs {
    #[command(subcommand)]
    pub command: AppointmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppointmentCommand {
    /// Book an appointment after availability and specialty checks
    Schedule(ScheduleArgs),
    /// SCHEDULED -> IN_PROGRESS -> COMPLETED
    Advance { id: String },
    /// Cancel a scheduled appointment
    Cancel {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Mark a scheduled appointment as missed
    NoShow { id: String },
    /// Replace an appointment's notes
    Notes { id: String, text: String },
    /// List appointments ordered by time
    List {
        /// Only this patient's appointments
        #[arg(long, conflicts_with_all = ["doctor", "room"])]
        patient: Option<String>,
        /// Only this doctor's active appointments
        #[arg(long, conflicts_with = "room")]
        doctor: Option<String>,
        /// Only this room's active appointments, e.g. CARD-101
        #[arg(long)]
        room: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Patient DNI
    #[arg(long)]
    pub patient: String,
    /// Doctor DNI
    #[arg(long)]
    pub doctor: String,
    /// Room number, e.g. CARD-101
    #[arg(long)]
    pub room: String,
    /// Date and time, e.g. 2030-05-02T10:00
    #[arg(long)]
    pub at: String,
    /// Cost with up to two decimals, e.g. 1500.00
    #[arg(long)]
    pub cost: String,
}

pub fn execute(args: AppointmentArgs, session: &mut Session) -> CliResult {
    match args.command {
        AppointmentCommand::Schedule(args) => schedule(args, session),
        AppointmentCommand::Advance { id } => transition(session, id, StatusAction::Advance),
        AppointmentCommand::NoShow { id } => transition(session, id, StatusAction::NoShow),
        AppointmentCommand::Cancel { id, reason } => {
            session.command(EngineCommand::Apply(Command::CancelAppointment {
                appointment_id: id.clone(),
                reason,
            }))?;
            println!("Appointment {} cancelled", id);
            Ok(())
        }
        AppointmentCommand::Notes { id, text } => {
            session.command(EngineCommand::Apply(Command::UpdateAppointmentNotes {
                appointment_id: id.clone(),
                notes: text,
            }))?;
            println!("Notes updated for appointment {}", id);
            Ok(())
        }
        AppointmentCommand::List {
            patient,
            doctor,
            room,
        } => list(session, patient, doctor, room),
    }
}

fn schedule(args: ScheduleArgs, session: &mut Session) -> CliResult {
    let scheduled_at = parse_datetime(&args.at)?;
    let cost: Money = args.cost.parse().map_err(hospital_core::ExError::from)?;

    let result = session.command(EngineCommand::ScheduleAppointment {
        patient_dni: args.patient,
        doctor_dni: args.doctor,
        room_number: args.room,
        scheduled_at,
        cost,
    })?;
    match result {
        EngineCommandResult::Applied(Applied::Created(id)) => {
            println!("Appointment scheduled: {}", id);
            Ok(())
        }
        other => Err(unexpected(other).into()),
    }
}

fn transition(session: &mut Session, id: String, action: StatusAction) -> CliResult {
    let result = session.command(EngineCommand::Apply(Command::TransitionAppointment {
        appointment_id: id,
        action,
    }))?;
    match result {
        EngineCommandResult::Applied(Applied::Transitioned {
            appointment_id,
            status,
        }) => {
            println!("Appointment {} is now {}", appointment_id, status);
            Ok(())
        }
        other => Err(unexpected(other).into()),
    }
}

fn list(
    session: &Session,
    patient: Option<String>,
    doctor: Option<String>,
    room: Option<String>,
) -> CliResult {
    let result = session.query(EngineQuery::ListAppointments {
        patient_dni: patient,
        doctor_dni: doctor,
        room_number: room,
    })?;
    let views = match result {
        EngineQueryResult::Appointments(views) => views,
        other => return Err(unexpected(other).into()),
    };

    if views.is_empty() {
        println!("No appointments");
    }
    for view in &views {
        println!("{}", format_line(view));
    }
    Ok(())
}

fn format_line(view: &AppointmentView) -> String {
    let mut line = format!(
        "{}  {}  {:<11}  {} with {} in {}  ${}",
        view.id,
        view.scheduled_at.format("%Y-%m-%d %H:%M"),
        view.status.as_str(),
        view.patient,
        view.doctor,
        view.room,
        view.cost,
    );
    if !view.notes.is_empty() {
        line.push_str(&format!("  ({})", view.notes));
    }
    line
}
