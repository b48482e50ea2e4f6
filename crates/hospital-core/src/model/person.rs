use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::BloodType;
use crate::errors::{HospitalError, Result};

fn dni_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{7,8}$").expect("static regex compile"))
}

/// Check a national id: exactly 7 or 8 ASCII digits
///
/// # Errors
/// Returns `InvalidDni` when the value does not match.
pub fn validate_dni(dni: &str) -> Result<()> {
    if dni_pattern().is_match(dni) {
        Ok(())
    } else {
        Err(HospitalError::InvalidDni {
            dni: dni.to_string(),
        })
    }
}

/// Reject blank text and text longer than `max_chars`
///
/// # Errors
/// Returns `InvalidInput` naming `field`.
pub fn require_text(field: &str, value: &str, max_chars: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HospitalError::invalid(field, "cannot be empty or whitespace-only"));
    }
    if value.chars().count() > max_chars {
        return Err(HospitalError::invalid(
            field,
            format!("cannot exceed {} characters", max_chars),
        ));
    }
    Ok(())
}

/// Unvalidated person fields, as received from a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub birth_date: NaiveDate,
    pub blood_type: BloodType,
}

/// Identity data shared by doctors and patients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    first_name: String,
    last_name: String,
    dni: String,
    birth_date: NaiveDate,
    blood_type: BloodType,
}

impl Person {
    /// Validate and build a person
    ///
    /// # Errors
    /// * `InvalidInput` - blank or over-long first/last name (100 chars)
    /// * `InvalidDni` - dni is not 7 or 8 digits
    pub fn new(input: PersonInput) -> Result<Self> {
        require_text("first_name", &input.first_name, 100)?;
        require_text("last_name", &input.last_name, 100)?;
        validate_dni(&input.dni)?;

        Ok(Self {
            first_name: input.first_name,
            last_name: input.last_name,
            dni: input.dni,
            birth_date: input.birth_date,
            blood_type: input.blood_type,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn dni(&self) -> &str {
        &self.dni
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn blood_type(&self) -> BloodType {
        self.blood_type
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Completed years of age on `date` (0 for dates before birth)
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.birth_date.year();
        if (date.month(), date.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(dni: &str) -> PersonInput {
        PersonInput {
            first_name: "Carolina".to_string(),
            last_name: "López".to_string(),
            dni: dni.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 12, 5).unwrap(),
            blood_type: BloodType::APositive,
        }
    }

    #[test]
    fn test_dni_lengths() {
        assert!(Person::new(input("1234567")).is_ok());
        assert!(Person::new(input("12345678")).is_ok());
        assert!(matches!(
            Person::new(input("123456")),
            Err(HospitalError::InvalidDni { .. })
        ));
        assert!(matches!(
            Person::new(input("123456789")),
            Err(HospitalError::InvalidDni { .. })
        ));
        assert!(matches!(
            Person::new(input("1234567a")),
            Err(HospitalError::InvalidDni { .. })
        ));
    }

    #[test]
    fn test_dni_requires_ascii_digits() {
        // Arabic-Indic and full-width digits
        for dni in [
            "\u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}",
            "\u{FF11}\u{FF12}\u{FF13}\u{FF14}\u{FF15}\u{FF16}\u{FF17}\u{FF18}",
        ] {
            assert!(matches!(
                Person::new(input(dni)),
                Err(HospitalError::InvalidDni { .. })
            ));
            assert!(validate_dni(dni).is_err());
        }
    }

    #[test]
    fn test_blank_names_rejected() {
        let mut i = input("12345678");
        i.last_name = "   ".to_string();
        assert!(matches!(
            Person::new(i),
            Err(HospitalError::InvalidInput { field, .. }) if field == "last_name"
        ));
    }

    #[test]
    fn test_age_counts_completed_years() {
        let p = Person::new(input("12345678")).unwrap();
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2025, 12, 4).unwrap()), 39);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2025, 12, 5).unwrap()), 40);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()), 0);
    }

    #[test]
    fn test_full_name() {
        let p = Person::new(input("12345678")).unwrap();
        assert_eq!(p.full_name(), "Carolina López");
    }
}
