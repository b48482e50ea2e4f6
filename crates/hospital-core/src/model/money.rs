use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::HospitalError;

/// Largest amount that fits a DECIMAL(10,2) column, in cents
const MAX_CENTS: i64 = 99_999_999_99;

/// Monetary amount with two decimal places, held as integer cents
///
/// Parsing accepts `1500`, `1500.5` and `1500.50`; rendering always uses two
/// decimals. Negative amounts parse so that callers can reject them with a
/// domain error of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| HospitalError::InvalidAmount {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if frac_part.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = int_part
            .parse()
            .map_err(|_| invalid("amount out of range"))?;
        let frac: i64 = format!("{:0<2}", frac_part)
            .parse()
            .map_err(|_| invalid("expected a decimal number"))?;

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .filter(|c| *c <= MAX_CENTS)
            .ok_or_else(|| invalid("amount exceeds 99999999.99"))?;

        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }
}

impl TryFrom<String> for Money {
    type Error = HospitalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(m: Money) -> Self {
        m.to_string()
    }
}
