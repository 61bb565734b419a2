//! Selection state of one phone input.

use crate::countries::CountryRecord;
use crate::types::Iso2;
use std::sync::Arc;

/// The country currently selected for an input.
///
/// `Unknown` is distinct from `Unset`: it records that the user typed a
/// `+` and digits that match no dial code, which shows as "no flag"
/// rather than falling back to the default country.
///
/// A selected country shares its record with the [`CountryTable`], so
/// cloning a state never copies the record.
///
/// [`CountryTable`]: crate::countries::CountryTable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing selected yet.
    #[default]
    Unset,
    /// The input carries an unrecognised dial code.
    Unknown,
    /// A country is selected.
    Selected(Arc<CountryRecord>),
}

impl SelectionState {
    /// The selected country, if any.
    pub fn country(&self) -> Option<&CountryRecord> {
        match self {
            SelectionState::Selected(country) => Some(country.as_ref()),
            SelectionState::Unset | SelectionState::Unknown => None,
        }
    }

    /// Identifier of the selected country, if any.
    pub fn iso2(&self) -> Option<&Iso2> {
        self.country().map(|country| &country.iso2)
    }

    /// Whether a NANP country is selected.
    pub fn is_nanp(&self) -> bool {
        self.country().is_some_and(CountryRecord::is_nanp)
    }

    /// Whether nothing has been selected yet.
    pub fn is_unset(&self) -> bool {
        matches!(self, SelectionState::Unset)
    }

    /// Whether the input carries an unrecognised dial code.
    pub fn is_unknown(&self) -> bool {
        matches!(self, SelectionState::Unknown)
    }
}

impl From<Arc<CountryRecord>> for SelectionState {
    fn from(country: Arc<CountryRecord>) -> Self {
        SelectionState::Selected(country)
    }
}

impl From<CountryRecord> for SelectionState {
    fn from(country: CountryRecord) -> Self {
        SelectionState::Selected(Arc::new(country))
    }
}

/// Selection and input text for a freshly created input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialState {
    /// Initial selection.
    pub selection: SelectionState,
    /// Text to place in an empty input, e.g. `+44`.
    pub prefill: Option<String>,
}

/// Result of picking a country from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualSelection {
    /// The new selection.
    pub selection: SelectionState,
    /// Text that replaces the input: the country's dial code with '+'.
    pub input: String,
}
