use serde::{Deserialize, Serialize};

use super::person::require_text;
use crate::errors::Result;

/// A physical room owned by a department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub department_id: String,

    /// Room number, unique across all rooms (e.g. `CARD-101`)
    pub number: String,

    /// Free-form room kind (e.g. consulting room, operating theatre)
    pub kind: String,
}

impl Room {
    /// # Errors
    /// `InvalidInput` if number (20) or kind (100) is blank or too long.
    pub fn new(id: String, department_id: String, number: String, kind: String) -> Result<Self> {
        require_text("room_number", &number, 20)?;
        require_text("room_kind", &kind, 100)?;
        if number.contains(',') {
            return Err(crate::errors::HospitalError::invalid(
                "room_number",
                "cannot contain commas",
            ));
        }
        Ok(Self {
            id,
            department_id,
            number,
            kind,
        })
    }
}
