use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::person::require_text;
use crate::errors::Result;

/// Longest accepted diagnosis or treatment (exclusive bound 500)
pub const MAX_CLINICAL_ENTRY_CHARS: usize = 499;

/// Longest accepted allergy (exclusive bound 200)
pub const MAX_ALLERGY_CHARS: usize = 199;

/// Kind of entry held by a medical record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Diagnosis,
    Treatment,
    Allergy,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Diagnosis => "DIAGNOSIS",
            EntryKind::Treatment => "TREATMENT",
            EntryKind::Allergy => "ALLERGY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DIAGNOSIS" => Some(EntryKind::Diagnosis),
            "TREATMENT" => Some(EntryKind::Treatment),
            "ALLERGY" => Some(EntryKind::Allergy),
            _ => None,
        }
    }

    fn field(&self) -> &'static str {
        match self {
            EntryKind::Diagnosis => "diagnosis",
            EntryKind::Treatment => "treatment",
            EntryKind::Allergy => "allergy",
        }
    }

    fn max_chars(&self) -> usize {
        match self {
            EntryKind::Diagnosis | EntryKind::Treatment => MAX_CLINICAL_ENTRY_CHARS,
            EntryKind::Allergy => MAX_ALLERGY_CHARS,
        }
    }
}

/// A patient's medical record (clinical history)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,

    /// `HC-{dni}-{epoch millis of created_at}`
    pub number: String,

    pub created_at: NaiveDateTime,
    pub diagnoses: Vec<String>,
    pub treatments: Vec<String>,
    pub allergies: Vec<String>,
}

impl MedicalRecord {
    /// Open an empty record for a patient
    pub fn new(id: String, patient_id: String, dni: &str, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            patient_id,
            number: record_number(dni, created_at),
            created_at,
            diagnoses: Vec::new(),
            treatments: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Append an entry of the given kind
    ///
    /// # Errors
    /// `InvalidInput` if the text is blank or reaches the kind's length bound.
    pub fn add_entry(&mut self, kind: EntryKind, text: String) -> Result<()> {
        require_text(kind.field(), &text, kind.max_chars())?;
        self.entries_mut(kind).push(text);
        Ok(())
    }

    pub fn add_diagnosis(&mut self, diagnosis: String) -> Result<()> {
        self.add_entry(EntryKind::Diagnosis, diagnosis)
    }

    pub fn add_treatment(&mut self, treatment: String) -> Result<()> {
        self.add_entry(EntryKind::Treatment, treatment)
    }

    pub fn add_allergy(&mut self, allergy: String) -> Result<()> {
        self.add_entry(EntryKind::Allergy, allergy)
    }

    pub fn entries(&self, kind: EntryKind) -> &[String] {
        match kind {
            EntryKind::Diagnosis => &self.diagnoses,
            EntryKind::Treatment => &self.treatments,
            EntryKind::Allergy => &self.allergies,
        }
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<String> {
        match kind {
            EntryKind::Diagnosis => &mut self.diagnoses,
            EntryKind::Treatment => &mut self.treatments,
            EntryKind::Allergy => &mut self.allergies,
        }
    }

    pub fn has_allergies(&self) -> bool {
        !self.allergies.is_empty()
    }
}

fn record_number(dni: &str, created_at: NaiveDateTime) -> String {
    format!("HC-{}-{}", dni, created_at.and_utc().timestamp_millis())
}
