//! The validated, immutable country table.

use super::index::DialCodeIndex;
use super::record::CountryRecord;
use crate::errors::{CountryTableError, DataIntegrityError};
use crate::types::Iso2;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Country data JSON embedded at compile time.
static COUNTRIES_JSON: &str = include_str!("../../assets/countries.json");

/// Embedded table, parsed once per process.
static EMBEDDED: Lazy<Arc<CountryTable>> = Lazy::new(|| {
    Arc::new(CountryTable::from_json(COUNTRIES_JSON).expect("countries.json is invalid"))
});

/// Ordered country records together with their dial-code index.
///
/// The table is validated on construction and never mutated afterwards,
/// so it can be shared freely between input sessions. Records are held
/// behind `Arc`, so a selection can point at one without copying it.
///
/// # Example
///
/// ```rust
/// use dial_resolver::CountryTable;
///
/// let table = CountryTable::embedded();
/// let nanp: Vec<_> = table
///     .countries_for_dial_code("1")
///     .unwrap()
///     .iter()
///     .map(|c| c.iso2.to_string())
///     .collect();
/// assert_eq!(nanp[0], "us");
/// assert_eq!(nanp[1], "ca");
/// ```
#[derive(Debug, Clone)]
pub struct CountryTable {
    records: Vec<Arc<CountryRecord>>,
    positions: HashMap<Iso2, usize>,
    index: DialCodeIndex,
}

impl CountryTable {
    /// Build a table from records, keeping their order.
    pub fn new(records: Vec<CountryRecord>) -> Result<Self, CountryTableError> {
        Self::from_shared(records.into_iter().map(Arc::new).collect())
    }

    fn from_shared(records: Vec<Arc<CountryRecord>>) -> Result<Self, CountryTableError> {
        if records.is_empty() {
            return Err(CountryTableError::Empty);
        }

        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            record
                .validate_area_codes()
                .map_err(|(area_code, source)| CountryTableError::InvalidAreaCode {
                    iso2: record.iso2.clone(),
                    area_code,
                    source,
                })?;
            if positions.insert(record.iso2.clone(), pos).is_some() {
                return Err(CountryTableError::DuplicateIso2 {
                    iso2: record.iso2.clone(),
                });
            }
        }

        let index = DialCodeIndex::build(records.iter().map(|r| r.as_ref()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            countries = records.len(),
            dial_codes = index.len(),
            "Country table loaded"
        );

        Ok(Self {
            records,
            positions,
            index,
        })
    }

    /// Parse and validate a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, CountryTableError> {
        let records: Vec<CountryRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// The table shipped with the crate.
    pub fn embedded() -> Arc<CountryTable> {
        Arc::clone(&EMBEDDED)
    }

    /// A new table holding only the records accepted by `keep`.
    pub fn filtered<F>(&self, mut keep: F) -> Result<Self, CountryTableError>
    where
        F: FnMut(&CountryRecord) -> bool,
    {
        Self::from_shared(
            self.records
                .iter()
                .filter(|r| keep(r.as_ref()))
                .cloned()
                .collect(),
        )
    }

    /// All records in table order.
    pub fn records(&self) -> &[Arc<CountryRecord>] {
        &self.records
    }

    /// Iterate over records in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<CountryRecord>> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record in table order.
    pub fn first(&self) -> &CountryRecord {
        // `new` rejects empty tables.
        &self.records[0]
    }

    /// The dial-code index built from this table.
    pub fn index(&self) -> &DialCodeIndex {
        &self.index
    }

    fn find_shared(&self, iso2: &str) -> Option<&Arc<CountryRecord>> {
        let iso2 = Iso2::new(iso2).ok()?;
        self.positions.get(&iso2).map(|&pos| &self.records[pos])
    }

    /// Look up a record by identifier, in either case.
    pub fn find(&self, iso2: &str) -> Option<&CountryRecord> {
        self.find_shared(iso2).map(|r| r.as_ref())
    }

    /// Look up a record that the table is known to contain.
    pub fn get(&self, iso2: &str) -> Result<&CountryRecord, DataIntegrityError> {
        self.find(iso2).ok_or_else(|| DataIntegrityError::new(iso2))
    }

    /// Like [`get`](Self::get), but returns a handle sharing the table's
    /// record.
    pub fn get_shared(&self, iso2: &str) -> Result<Arc<CountryRecord>, DataIntegrityError> {
        self.find_shared(iso2)
            .cloned()
            .ok_or_else(|| DataIntegrityError::new(iso2))
    }

    /// Countries registered under `dial_code` (digits only, composed
    /// area codes included), in priority order.
    ///
    /// An unregistered code gives an empty list.
    pub fn countries_for_dial_code(
        &self,
        dial_code: &str,
    ) -> Result<Vec<&CountryRecord>, DataIntegrityError> {
        self.index
            .get(dial_code)
            .unwrap_or_default()
            .iter()
            .map(|iso2| self.get(iso2.as_str()))
            .collect()
    }

    /// Records whose country calling code is exactly `dial_code`.
    pub fn with_dial_code(&self, dial_code: &str) -> Vec<&CountryRecord> {
        let dial_code = dial_code.trim_start_matches('+');
        self.records
            .iter()
            .filter(|r| r.dial_code.as_str() == dial_code)
            .map(|r| r.as_ref())
            .collect()
    }

    /// Case-insensitive search over `"+<dial code> <name>"`.
    ///
    /// An empty query returns every record.
    pub fn search(&self, query: &str) -> Vec<&CountryRecord> {
        let query = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                format!("+{} {}", r.dial_code, r.name.to_lowercase()).contains(query.as_str())
            })
            .map(|r| r.as_ref())
            .collect()
    }
}

impl<'a> IntoIterator for &'a CountryTable {
    type Item = &'a Arc<CountryRecord>;
    type IntoIter = std::slice::Iter<'a, Arc<CountryRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
