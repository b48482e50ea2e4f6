use serde::{Deserialize, Serialize};

use super::person::require_text;
use crate::errors::Result;

/// A hospital: the root of departments and admitted patients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    /// Unique identifier (UUID v7)
    pub id: String,

    pub name: String,
    pub address: String,
    pub phone: String,

    /// Department IDs in creation order
    pub department_ids: Vec<String>,

    /// Admitted patient IDs in admission order
    pub patient_ids: Vec<String>,
}

impl Hospital {
    /// Create a hospital with no departments or patients
    ///
    /// # Errors
    /// `InvalidInput` if name (200), address (300) or phone (20) is blank or too long.
    pub fn new(id: String, name: String, address: String, phone: String) -> Result<Self> {
        require_text("name", &name, 200)?;
        require_text("address", &address, 300)?;
        require_text("phone", &phone, 20)?;

        Ok(Self {
            id,
            name,
            address,
            phone,
            department_ids: Vec::new(),
            patient_ids: Vec::new(),
        })
    }

    pub fn add_department_id(&mut self, department_id: String) {
        if !self.department_ids.contains(&department_id) {
            self.department_ids.push(department_id);
        }
    }

    pub fn add_patient_id(&mut self, patient_id: String) {
        if !self.patient_ids.contains(&patient_id) {
            self.patient_ids.push(patient_id);
        }
    }

    pub(crate) fn remove_patient_id(&mut self, patient_id: &str) {
        self.patient_ids.retain(|id| id != patient_id);
    }
}
