use chrono::NaiveDateTime;
use hospital_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::{AppointmentStatus, Specialty, StatusAction};

/// Result type alias using HospitalError
pub type Result<T> = std::result::Result<T, HospitalError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the CLI prints and tests
/// assert on. Domain errors (`HospitalError`) collapse into these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidDni,
    InvalidLicense,
    InvalidAmount,
    NotFound,
    AlreadyExists,
    ConstraintViolation,

    // Scheduling
    SpecialtyMismatch,
    AppointmentInPast,
    InvalidCost,
    DoctorUnavailable,
    RoomUnavailable,

    // Lifecycle
    InvalidTransition,
    InvalidAction,

    // Interchange
    InvalidCsv,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDni => "ERR_INVALID_DNI",
            ExErrorKind::InvalidLicense => "ERR_INVALID_LICENSE",
            ExErrorKind::InvalidAmount => "ERR_INVALID_AMOUNT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::SpecialtyMismatch => "ERR_SPECIALTY_MISMATCH",
            ExErrorKind::AppointmentInPast => "ERR_APPOINTMENT_IN_PAST",
            ExErrorKind::InvalidCost => "ERR_INVALID_COST",
            ExErrorKind::DoctorUnavailable => "ERR_DOCTOR_UNAVAILABLE",
            ExErrorKind::RoomUnavailable => "ERR_ROOM_UNAVAILABLE",
            ExErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            ExErrorKind::InvalidAction => "ERR_INVALID_ACTION",
            ExErrorKind::InvalidCsv => "ERR_INVALID_CSV",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable kind plus optional context (operation, entity, request
/// correlation) for logging and CLI output.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for hospital operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HospitalError {
    // ===== Validation Errors =====
    /// A required text field is blank or exceeds its length limit
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// National id is not 7 or 8 digits
    #[error("Invalid DNI '{dni}': must be 7 or 8 digits")]
    InvalidDni { dni: String },

    /// Licence number does not match MP-XXXX
    #[error("Invalid license '{license}': expected format MP-XXXX (4 to 6 digits)")]
    InvalidLicense { license: String },

    /// Monetary amount could not be parsed or exceeds the column precision
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    // ===== Lookup Errors =====
    #[error("Hospital not found: {hospital_id}")]
    HospitalNotFound { hospital_id: String },

    #[error("Department not found: {department_id}")]
    DepartmentNotFound { department_id: String },

    /// Room not found by id or number
    #[error("Room not found: {room}")]
    RoomNotFound { room: String },

    /// Doctor not found by id or DNI
    #[error("Doctor not found: {doctor}")]
    DoctorNotFound { doctor: String },

    /// Patient not found by id or DNI
    #[error("Patient not found: {patient}")]
    PatientNotFound { patient: String },

    #[error("Medical record not found: {record_id}")]
    RecordNotFound { record_id: String },

    #[error("Appointment not found: {appointment_id}")]
    AppointmentNotFound { appointment_id: String },

    // ===== Uniqueness Errors =====
    #[error("A person with DNI {dni} is already registered as {role}")]
    DuplicateDni { dni: String, role: String },

    #[error("Room number {number} already exists")]
    DuplicateRoomNumber { number: String },

    #[error("Licence {license} is already registered")]
    DuplicateLicense { license: String },

    #[error("Department {name} already exists in hospital {hospital_id}")]
    DuplicateDepartment { hospital_id: String, name: String },

    // ===== Scheduling Errors =====
    /// Doctor specialty does not match the department (or the room's department)
    #[error("Specialty mismatch: doctor is {doctor_specialty}, department requires {required}")]
    SpecialtyMismatch {
        doctor_specialty: Specialty,
        required: Specialty,
    },

    #[error("Cannot schedule an appointment in the past: {scheduled_at}")]
    AppointmentInPast { scheduled_at: NaiveDateTime },

    #[error("Cost must be greater than zero, got {cost}")]
    InvalidCost { cost: String },

    #[error("Doctor {doctor_id} is not available at {scheduled_at}")]
    DoctorUnavailable {
        doctor_id: String,
        scheduled_at: NaiveDateTime,
    },

    #[error("Room {room_id} is not available at {scheduled_at}")]
    RoomUnavailable {
        room_id: String,
        scheduled_at: NaiveDateTime,
    },

    // ===== Lifecycle Errors =====
    #[error("Cannot {action} an appointment that is {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        action: StatusAction,
    },

    #[error("Invalid action: {action} (expected advance, cancel or no_show)")]
    InvalidAction { action: String },

    // ===== Interchange Errors =====
    #[error("Invalid CSV at line {line}: {reason}")]
    InvalidCsv { line: usize, reason: String },

    // ===== Integrity Errors =====
    /// Cross-entity reference is dangling or one-sided
    #[error("Integrity violation: {reason}")]
    IntegrityViolation { reason: String },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HospitalError {
    /// Shorthand for `InvalidInput`
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        HospitalError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Conversion from HospitalError to ExError
impl From<HospitalError> for ExError {
    fn from(err: HospitalError) -> Self {
        let message = err.to_string();
        match err {
            HospitalError::InvalidInput { .. } => ExError::new(ExErrorKind::InvalidInput),
            HospitalError::InvalidDni { .. } => ExError::new(ExErrorKind::InvalidDni),
            HospitalError::InvalidLicense { .. } => ExError::new(ExErrorKind::InvalidLicense),
            HospitalError::InvalidAmount { .. } => ExError::new(ExErrorKind::InvalidAmount),

            HospitalError::HospitalNotFound { hospital_id } => {
                ExError::new(ExErrorKind::NotFound).with_entity_id(hospital_id)
            }
            HospitalError::DepartmentNotFound { department_id } => {
                ExError::new(ExErrorKind::NotFound).with_entity_id(department_id)
            }
            HospitalError::RoomNotFound { room } => {
                ExError::new(ExErrorKind::NotFound).with_entity_id(room)
            }
            HospitalError::DoctorNotFound { doctor } => {
                ExError::new(ExErrorKind::NotFound).with_entity_id(doctor)
            }
            // Patient lookups may carry a DNI, so no entity_id here
            HospitalError::PatientNotFound { .. } => ExError::new(ExErrorKind::NotFound),
            HospitalError::RecordNotFound { record_id } => {
                ExError::new(ExErrorKind::NotFound).with_entity_id(record_id)
            }
            HospitalError::AppointmentNotFound { appointment_id } => {
                ExError::new(ExErrorKind::NotFound).with_entity_id(appointment_id)
            }

            HospitalError::DuplicateDni { .. }
            | HospitalError::DuplicateRoomNumber { .. }
            | HospitalError::DuplicateLicense { .. } => ExError::new(ExErrorKind::AlreadyExists),
            HospitalError::DuplicateDepartment { hospital_id, .. } => {
                ExError::new(ExErrorKind::AlreadyExists).with_entity_id(hospital_id)
            }

            HospitalError::SpecialtyMismatch { .. } => {
                ExError::new(ExErrorKind::SpecialtyMismatch)
            }
            HospitalError::AppointmentInPast { .. } => {
                ExError::new(ExErrorKind::AppointmentInPast)
            }
            HospitalError::InvalidCost { .. } => ExError::new(ExErrorKind::InvalidCost),
            HospitalError::DoctorUnavailable { doctor_id, .. } => {
                ExError::new(ExErrorKind::DoctorUnavailable).with_entity_id(doctor_id)
            }
            HospitalError::RoomUnavailable { room_id, .. } => {
                ExError::new(ExErrorKind::RoomUnavailable).with_entity_id(room_id)
            }

            HospitalError::InvalidTransition { .. } => {
                ExError::new(ExErrorKind::InvalidTransition)
            }
            HospitalError::InvalidAction { .. } => ExError::new(ExErrorKind::InvalidAction),

            HospitalError::InvalidCsv { .. } => ExError::new(ExErrorKind::InvalidCsv),

            HospitalError::IntegrityViolation { .. } => {
                ExError::new(ExErrorKind::ConstraintViolation)
            }

            HospitalError::Serialization { .. } => ExError::new(ExErrorKind::Serialization),
            HospitalError::Internal { .. } => ExError::new(ExErrorKind::Internal),
        }
        .with_message(message)
    }
}

/// Conversion from serde_json::Error to HospitalError
impl From<serde_json::Error> for HospitalError {
    fn from(err: serde_json::Error) -> Self {
        HospitalError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_error_kind_codes() {
        let cases = [
            (ExErrorKind::AppointmentInPast, "ERR_APPOINTMENT_IN_PAST"),
            (ExErrorKind::InvalidCost, "ERR_INVALID_COST"),
            (ExErrorKind::DoctorUnavailable, "ERR_DOCTOR_UNAVAILABLE"),
            (ExErrorKind::RoomUnavailable, "ERR_ROOM_UNAVAILABLE"),
            (ExErrorKind::SpecialtyMismatch, "ERR_SPECIALTY_MISMATCH"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_not_found_carries_entity_id() {
        let err: ExError = HospitalError::AppointmentNotFound {
            appointment_id: "appt-1".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("appt-1"));
        assert!(err.message().contains("appt-1"));
    }

    #[test]
    fn test_patient_not_found_hides_identifier_from_entity_field() {
        let err: ExError = HospitalError::PatientNotFound {
            patient: "54232123".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert!(err.entity_id().is_none());
    }

    #[test]
    fn test_display_includes_code_and_op() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("sqlite")
            .with_message("disk full");
        assert_eq!(
            err.to_string(),
            "[ERR_PERSISTENCE] in operation 'sqlite': disk full"
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = HospitalError::InvalidTransition {
            from: AppointmentStatus::Completed,
            action: StatusAction::Cancel,
        };
        assert_eq!(
            err.to_string(),
            "Cannot cancel an appointment that is COMPLETED"
        );
    }
}
