//! Core value types for dial-code resolution.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Longest country calling code in the numbering plan, in digits.
pub const MAX_DIAL_CODE_LEN: usize = 4;

// =============================================================================
// DialCode
// =============================================================================

/// Error when parsing a dial code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialCodeError {
    /// Dial code contains non-digit characters.
    #[error("dial code must contain only digits")]
    NonDigit,
    /// Dial code is empty.
    #[error("dial code cannot be empty")]
    Empty,
    /// Dial code is longer than any calling code in use.
    #[error("dial code must be at most 4 digits, got {len}")]
    TooLong { len: usize },
}

/// Country dial code (e.g., "1" for NANP, "380" for Ukraine).
///
/// Dial codes are stored without the leading '+' sign.
///
/// # Example
///
/// ```rust
/// use dial_resolver::DialCode;
///
/// let dc = DialCode::new("+380").unwrap();
/// assert_eq!(dc.to_string(), "380");
///
/// let dc = DialCode::new("1").unwrap();
/// assert!(dc.is_nanp());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DialCode(String);

impl DialCode {
    /// Create a new DialCode from a string.
    ///
    /// The input can include a leading '+' which will be stripped.
    pub fn new(s: impl AsRef<str>) -> Result<Self, DialCodeError> {
        let n = s.as_ref().trim().trim_start_matches('+');
        if n.is_empty() {
            return Err(DialCodeError::Empty);
        }
        if !n.chars().all(|c| c.is_ascii_digit()) {
            return Err(DialCodeError::NonDigit);
        }
        if n.len() > MAX_DIAL_CODE_LEN {
            return Err(DialCodeError::TooLong { len: n.len() });
        }
        Ok(Self(n.to_string()))
    }

    /// Get the dial code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the shared North American Numbering Plan code.
    pub fn is_nanp(&self) -> bool {
        self.0 == "1"
    }

    /// The dial code as typed into a phone field, e.g. `+44`.
    pub fn to_prefixed(&self) -> String {
        format!("+{}", self.0)
    }
}

impl FromStr for DialCode {
    type Err = DialCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for DialCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DialCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DialCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        DialCode::new(raw).map_err(de::Error::custom)
    }
}

impl Serialize for DialCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

// =============================================================================
// Iso2
// =============================================================================

/// Error when parsing a two-letter country identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Iso2Error {
    /// Identifier is not exactly two ASCII letters.
    #[error("country identifier '{value}' must be two ASCII letters")]
    Invalid { value: String },
}

/// Two-letter country identifier, normalized to lowercase (e.g., "us").
///
/// Mostly ISO 3166-1 alpha-2, but user-assigned codes such as `xk`
/// (Kosovo) are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iso2(String);

impl Iso2 {
    /// Create a new Iso2, accepting either case.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Iso2Error> {
        let s = s.as_ref().trim();
        if s.len() != 2 || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Iso2Error::Invalid {
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Get the identifier as a lowercase string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Iso2 {
    type Err = Iso2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for Iso2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Iso2 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Iso2 {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for Iso2 {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl<'de> Deserialize<'de> for Iso2 {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Iso2::new(raw).map_err(de::Error::custom)
    }
}

impl Serialize for Iso2 {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}
