use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::errors::{HospitalError, Result};

fn license_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^MP-[0-9]{4,6}$").expect("static regex compile"))
}

/// Medical licence number (`MP-` followed by 4 to 6 digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct License(String);

impl License {
    /// # Errors
    /// Returns `InvalidLicense` when the number does not match `MP-XXXX`.
    pub fn new(number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        if license_pattern().is_match(&number) {
            Ok(Self(number))
        } else {
            Err(HospitalError::InvalidLicense { license: number })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for License {
    type Error = HospitalError;

    fn try_from(value: String) -> Result<Self> {
        License::new(value)
    }
}

impl From<License> for String {
    fn from(license: License) -> Self {
        license.0
    }
}
