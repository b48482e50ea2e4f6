use serde::{Deserialize, Serialize};

use super::{License, Person, Specialty};

/// A registered doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub person: Person,
    pub license: License,
    pub specialty: Specialty,

    /// Department the doctor works in, once assigned
    pub department_id: Option<String>,
}

impl Doctor {
    pub fn new(id: String, person: Person, license: License, specialty: Specialty) -> Self {
        Self {
            id,
            person,
            license,
            specialty,
            department_id: None,
        }
    }

    pub fn dni(&self) -> &str {
        self.person.dni()
    }

    pub fn full_name(&self) -> String {
        self.person.full_name()
    }
}
