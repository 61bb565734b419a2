//! Error types shared by the country data and the resolver.

use crate::types::{DialCodeError, Iso2};
use thiserror::Error;

/// A country identifier referenced by the dial-code index is missing from
/// the country table.
///
/// The table and the index are built together and validated at load time,
/// so this only surfaces when static data is corrupted. It is never the
/// result of user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No country data for '{iso2}'")]
pub struct DataIntegrityError {
    /// The identifier that could not be found.
    pub iso2: String,
}

impl DataIntegrityError {
    pub(crate) fn new(iso2: impl Into<String>) -> Self {
        Self { iso2: iso2.into() }
    }
}

/// Errors raised while loading and validating a country table.
#[derive(Debug, Error)]
pub enum CountryTableError {
    /// The data asset is not valid JSON or does not match the record shape.
    #[error("Invalid country data: {0}")]
    Json(#[from] serde_json::Error),

    /// The table has no records.
    #[error("Country table is empty")]
    Empty,

    /// Two records share the same identifier.
    #[error("Duplicate country '{iso2}' in country table")]
    DuplicateIso2 { iso2: Iso2 },

    /// An area code is not a non-empty run of digits.
    #[error("Invalid area code '{area_code}' for country '{iso2}'")]
    InvalidAreaCode {
        iso2: Iso2,
        area_code: String,
        #[source]
        source: DialCodeError,
    },

    /// Two countries claim the same priority slot under one dial code.
    #[error(
        "Countries '{existing}' and '{conflicting}' both claim priority {priority} for dial code +{dial_code}"
    )]
    OverlappingPriority {
        dial_code: String,
        priority: u32,
        existing: Iso2,
        conflicting: Iso2,
    },
}
