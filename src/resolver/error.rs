//! Resolver-level error types.

use crate::errors::{CountryTableError, DataIntegrityError};
use thiserror::Error;

/// Errors raised while building a resolver or selecting a country by hand.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The country table failed validation.
    #[error("Invalid country table: {0}")]
    Table(#[from] CountryTableError),

    /// `only_countries`/`exclude_countries` left nothing to select.
    #[error("No countries left after applying country filters")]
    NoCountries,

    /// A configured or requested country is not in the active table.
    #[error("Unknown {context} '{iso2}'")]
    UnknownCountry {
        /// The identifier as given.
        iso2: String,
        /// Where the identifier came from.
        context: &'static str,
    },

    /// The table and its index disagree.
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
}
