//! A single country entry of the dial-code table.

use crate::types::{DialCode, DialCodeError, Iso2};
use keshvar::Country;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the English part of names such as `Germany (Deutschland)`.
static DISPLAY_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?) \(").unwrap());

/// Immutable description of one country or territory.
///
/// # Example
///
/// ```rust
/// use dial_resolver::CountryRecord;
///
/// let json = r#"{"name": "Canada", "iso2": "ca", "dial_code": "1", "priority": 1, "area_codes": ["204"]}"#;
/// let ca: CountryRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(ca.dial_code.as_str(), "1");
/// assert_eq!(ca.area_codes, vec!["204".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// English name, optionally followed by the local name in parentheses.
    pub name: String,
    /// Two-letter identifier.
    pub iso2: Iso2,
    /// Country calling code without the '+'.
    pub dial_code: DialCode,
    /// Rank among countries sharing `dial_code`; lower is preferred.
    #[serde(default)]
    pub priority: u32,
    /// Area codes that identify this country under a shared dial code.
    #[serde(default)]
    pub area_codes: Vec<String>,
}

impl CountryRecord {
    /// Create a record with no area codes and priority 0.
    pub fn new(name: impl Into<String>, iso2: Iso2, dial_code: DialCode) -> Self {
        Self {
            name: name.into(),
            iso2,
            dial_code,
            priority: 0,
            area_codes: Vec::new(),
        }
    }

    /// Set the priority among countries sharing the dial code.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the area codes.
    pub fn with_area_codes<I, S>(mut self, area_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.area_codes = area_codes.into_iter().map(Into::into).collect();
        self
    }

    /// Name without the parenthesized local name.
    pub fn display_name(&self) -> &str {
        DISPLAY_NAME
            .captures(&self.name)
            .and_then(|caps| caps.get(1))
            .map_or(self.name.as_str(), |m| m.as_str())
    }

    /// Whether the country belongs to the North American Numbering Plan.
    pub fn is_nanp(&self) -> bool {
        self.dial_code.is_nanp()
    }

    /// Dial code composed with each area code, e.g. `1204` for Canada.
    pub fn area_dial_codes(&self) -> impl Iterator<Item = String> + '_ {
        self.area_codes
            .iter()
            .map(|area| format!("{}{}", self.dial_code.as_str(), area))
    }

    /// ISO 3166 metadata, if the identifier is an assigned ISO code.
    pub fn country(&self) -> Option<Country> {
        Country::try_from(self.iso2.as_str().to_ascii_uppercase().as_str()).ok()
    }

    /// Check the area codes are digit runs.
    pub(crate) fn validate_area_codes(&self) -> Result<(), (String, DialCodeError)> {
        for area in &self.area_codes {
            if area.is_empty() {
                return Err((area.clone(), DialCodeError::Empty));
            }
            if !area.chars().all(|c| c.is_ascii_digit()) {
                return Err((area.clone(), DialCodeError::NonDigit));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keshvar::Alpha2;

    fn record(name: &str, iso2: &str, dial_code: &str) -> CountryRecord {
        CountryRecord::new(
            name,
            Iso2::new(iso2).unwrap(),
            DialCode::new(dial_code).unwrap(),
        )
    }

    #[test]
    fn test_display_name_strips_local_name() {
        let de = record("Germany (Deutschland)", "de", "49");
        assert_eq!(de.display_name(), "Germany");
    }

    #[test]
    fn test_display_name_nested_parens() {
        let mf = record("Saint Martin (Saint-Martin (partie française))", "mf", "590");
        assert_eq!(mf.display_name(), "Saint Martin");
    }

    #[test]
    fn test_display_name_without_local_name() {
        let us = record("United States", "us", "1");
        assert_eq!(us.display_name(), "United States");
    }

    #[test]
    fn test_area_dial_codes() {
        let ca = record("Canada", "ca", "1").with_area_codes(["204", "226"]);
        let codes: Vec<_> = ca.area_dial_codes().collect();
        assert_eq!(codes, vec!["1204", "1226"]);
    }

    #[test]
    fn test_defaults_from_json() {
        let rec: CountryRecord =
            serde_json::from_str(r#"{"name": "France", "iso2": "FR", "dial_code": "33"}"#)
                .unwrap();
        assert_eq!(rec.priority, 0);
        assert!(rec.area_codes.is_empty());
        assert_eq!(rec.iso2.as_str(), "fr");
    }

    #[test]
    fn test_invalid_iso2_rejected() {
        let res = serde_json::from_str::<CountryRecord>(
            r#"{"name": "Nowhere", "iso2": "nowhere", "dial_code": "33"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_validate_area_codes() {
        let ok = record("Canada", "ca", "1").with_area_codes(["204"]);
        assert!(ok.validate_area_codes().is_ok());

        let bad = record("Canada", "ca", "1").with_area_codes(["2o4"]);
        assert_eq!(
            bad.validate_area_codes(),
            Err(("2o4".to_string(), DialCodeError::NonDigit))
        );
    }

    #[test]
    fn test_keshvar_country() {
        let ua = record("Ukraine (Україна)", "ua", "380");
        assert_eq!(ua.country().map(|c| c.alpha2()), Some(Alpha2::UA));
    }
}
