//! Sensitive data marker for patient identifiers
//!
//! National ids, phone numbers and clinical notes end up in log fields and
//! error messages. Wrapping them in `Sensitive<T>` keeps them out of `Debug`
//! and `Display` output unless the caller explicitly asks for the value.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use hospital_core_types::Sensitive;
///
/// let dni = Sensitive::new("54232123".to_string());
/// assert_eq!(format!("{}", dni), "***REDACTED***");
/// assert_eq!(dni.masked(), "******23");
/// assert_eq!(dni.expose(), "54232123");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: AsRef<str>> Sensitive<T> {
    /// Mask every character except the last two.
    ///
    /// Enough to tell two patients apart in a log line without leaking the id.
    pub fn masked(&self) -> String {
        let value = self.0.as_ref();
        let len = value.chars().count();
        if len <= 2 {
            return "*".repeat(len);
        }
        let tail: String = value.chars().skip(len - 2).collect();
        format!("{}{}", "*".repeat(len - 2), tail)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let dni = Sensitive::new("45423321");
        let debug_str = format!("{:?}", dni);
        assert_eq!(debug_str, REDACTED);
        assert!(!debug_str.contains("4542"));
    }

    #[test]
    fn test_sensitive_display_redaction() {
        let phone = Sensitive::new("0261-1233212");
        assert_eq!(format!("{}", phone), REDACTED);
    }

    #[test]
    fn test_masked_keeps_last_two() {
        let dni = Sensitive::new("1234567".to_string());
        assert_eq!(dni.masked(), "*****67");
    }

    #[test]
    fn test_masked_short_values_fully_hidden() {
        assert_eq!(Sensitive::new("7").masked(), "*");
        assert_eq!(Sensitive::new("").masked(), "");
    }

    #[test]
    fn test_sensitive_into_inner() {
        let dni = Sensitive::new(String::from("50323212"));
        assert_eq!(dni.into_inner(), "50323212");
    }

    #[test]
    fn test_sensitive_inside_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct PatientRef {
            name: String,
            dni: Sensitive<String>,
        }

        let patient = PatientRef {
            name: "Carolina".to_string(),
            dni: Sensitive::new("54232123".to_string()),
        };

        let debug_str = format!("{:?}", patient);
        assert!(debug_str.contains("Carolina"));
        assert!(debug_str.contains(REDACTED));
        assert!(!debug_str.contains("54232123"));
    }
}
