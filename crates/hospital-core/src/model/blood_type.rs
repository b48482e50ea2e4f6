use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::HospitalError;

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    /// Storage name (`A_POSITIVE`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A_POSITIVE",
            BloodType::ANegative => "A_NEGATIVE",
            BloodType::BPositive => "B_POSITIVE",
            BloodType::BNegative => "B_NEGATIVE",
            BloodType::AbPositive => "AB_POSITIVE",
            BloodType::AbNegative => "AB_NEGATIVE",
            BloodType::OPositive => "O_POSITIVE",
            BloodType::ONegative => "O_NEGATIVE",
        }
    }

    /// Clinical notation (`A+`, `O-`, ...)
    pub fn symbol(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BloodType {
    type Err = HospitalError;

    /// Accepts either the storage name or the clinical notation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        BloodType::ALL
            .iter()
            .copied()
            .find(|bt| bt.as_str() == wanted || bt.symbol() == wanted)
            .ok_or_else(|| HospitalError::invalid("blood_type", format!("unknown blood type '{}'", s)))
    }
}
