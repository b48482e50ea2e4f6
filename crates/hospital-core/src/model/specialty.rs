use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::HospitalError;

/// Medical specialty of a doctor or department
///
/// Variant order is the order used by the doctors-per-specialty report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    Cardiology,
    Neurology,
    Pediatrics,
    Traumatology,
    Gynecology,
    Urology,
    Ophthalmology,
    Dermatology,
    Psychiatry,
    GeneralMedicine,
    GeneralSurgery,
    Anesthesiology,
}

impl Specialty {
    pub const ALL: [Specialty; 12] = [
        Specialty::Cardiology,
        Specialty::Neurology,
        Specialty::Pediatrics,
        Specialty::Traumatology,
        Specialty::Gynecology,
        Specialty::Urology,
        Specialty::Ophthalmology,
        Specialty::Dermatology,
        Specialty::Psychiatry,
        Specialty::GeneralMedicine,
        Specialty::GeneralSurgery,
        Specialty::Anesthesiology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "CARDIOLOGY",
            Specialty::Neurology => "NEUROLOGY",
            Specialty::Pediatrics => "PEDIATRICS",
            Specialty::Traumatology => "TRAUMATOLOGY",
            Specialty::Gynecology => "GYNECOLOGY",
            Specialty::Urology => "UROLOGY",
            Specialty::Ophthalmology => "OPHTHALMOLOGY",
            Specialty::Dermatology => "DERMATOLOGY",
            Specialty::Psychiatry => "PSYCHIATRY",
            Specialty::GeneralMedicine => "GENERAL_MEDICINE",
            Specialty::GeneralSurgery => "GENERAL_SURGERY",
            Specialty::Anesthesiology => "ANESTHESIOLOGY",
        }
    }

    /// Human-readable label used by text reports
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "Cardiology",
            Specialty::Neurology => "Neurology",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Traumatology => "Traumatology",
            Specialty::Gynecology => "Gynecology",
            Specialty::Urology => "Urology",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Dermatology => "Dermatology",
            Specialty::Psychiatry => "Psychiatry",
            Specialty::GeneralMedicine => "General Medicine",
            Specialty::GeneralSurgery => "General Surgery",
            Specialty::Anesthesiology => "Anesthesiology",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Specialty::ALL
            .iter()
            .copied()
            .find(|sp| sp.as_str() == wanted)
            .ok_or_else(|| HospitalError::invalid("specialty", format!("unknown specialty '{}'", s)))
    }
}
