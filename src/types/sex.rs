//! Defines the `Sex` enum, mapping the mortality system's numeric `SEXO` codes
//! to descriptive variants.

use serde::Serialize;
use std::fmt;

/// Sex of the deceased as coded in the `SEXO` column.
///
/// Unmapped policy: any code other than `1`, `2` or `0` (including blanks)
/// resolves to [`Sex::Unknown`] instead of failing the row.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Code 1.
    Male,
    /// Code 2.
    Female,
    /// Code 0, or anything unrecognized.
    Unknown,
}

impl Sex {
    /// Converts a raw `SEXO` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chuvas::Sex;
    ///
    /// assert_eq!(Sex::from_code("1"), Sex::Male);
    /// assert_eq!(Sex::from_code(" 2 "), Sex::Female);
    /// assert_eq!(Sex::from_code("9"), Sex::Unknown);
    /// assert_eq!(Sex::from_code(""), Sex::Unknown);
    /// ```
    pub fn from_code(raw: &str) -> Self {
        match raw.trim() {
            "1" => Sex::Male,
            "2" => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
