use serde::{Deserialize, Serialize};

use super::person::require_text;
use super::Specialty;
use crate::errors::Result;

/// A department of a hospital, dedicated to one specialty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub hospital_id: String,
    pub name: String,
    pub specialty: Specialty,

    /// Doctors assigned to this department
    pub doctor_ids: Vec<String>,

    /// Rooms belonging to this department
    pub room_ids: Vec<String>,
}

impl Department {
    /// # Errors
    /// `InvalidInput` if the name is blank or longer than 100 characters.
    pub fn new(id: String, hospital_id: String, name: String, specialty: Specialty) -> Result<Self> {
        require_text("department_name", &name, 100)?;
        Ok(Self {
            id,
            hospital_id,
            name,
            specialty,
            doctor_ids: Vec::new(),
            room_ids: Vec::new(),
        })
    }

    pub fn add_doctor_id(&mut self, doctor_id: String) {
        if !self.doctor_ids.contains(&doctor_id) {
            self.doctor_ids.push(doctor_id);
        }
    }

    pub(crate) fn remove_doctor_id(&mut self, doctor_id: &str) {
        self.doctor_ids.retain(|id| id != doctor_id);
    }

    pub fn add_room_id(&mut self, room_id: String) {
        if !self.room_ids.contains(&room_id) {
            self.room_ids.push(room_id);
        }
    }
}
