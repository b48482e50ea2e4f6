use serde::{Deserialize, Serialize};

use super::person::require_text;
use super::Person;
use crate::errors::Result;

/// A registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub person: Person,
    pub phone: String,
    pub address: String,

    /// Hospital the patient is admitted to, if any
    pub hospital_id: Option<String>,

    /// Medical record created together with the patient
    pub record_id: String,
}

impl Patient {
    /// # Errors
    /// `InvalidInput` if phone (20) or address (300) is blank or too long.
    pub fn new(
        id: String,
        person: Person,
        phone: String,
        address: String,
        record_id: String,
    ) -> Result<Self> {
        require_text("phone", &phone, 20)?;
        require_text("address", &address, 300)?;
        Ok(Self {
            id,
            person,
            phone,
            address,
            hospital_id: None,
            record_id,
        })
    }

    pub fn dni(&self) -> &str {
        self.person.dni()
    }

    pub fn full_name(&self) -> String {
        self.person.full_name()
    }
}
