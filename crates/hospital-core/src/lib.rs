//! Hospital Core - Canonical in-memory semantic kernel
//!
//! This crate provides the domain model and operations of the hospital
//! management system:
//! - Hospitals, departments, rooms, doctors, patients and medical records
//! - Appointment scheduling with doctor/room availability and specialty checks
//! - Appointment status lifecycle (per-status strategies)
//! - CSV interchange for appointments
//! - Reports (specialty statistics, status breakdown, allergies, resources)
//! - Referential integrity validation of the whole store
//!
//! All mutations go through [`apply`], which takes a [`Store`] and a
//! [`Command`] and returns the new state or a typed error.

pub mod apply;
pub mod clock;
pub mod commands;
pub mod csv;
pub mod errors;
pub mod lifecycle;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod reports;
pub mod rules;

// Re-export commonly used types
pub use apply::{apply, Applied};
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, HospitalError, Result};
pub use model::{
    Appointment, AppointmentStatus, BloodType, Department, Doctor, EntryKind, Hospital, License,
    MedicalRecord, Money, Patient, Person, PersonInput, Room, Specialty, StatusAction,
};
pub use ops::Store;
