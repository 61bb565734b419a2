//! Country data: records, the validated table and its dial-code index.
//!
//! The crate ships a default table as an embedded JSON asset. Custom
//! tables can be loaded with [`CountryTable::from_json`] or built from
//! records with [`CountryTable::new`]; both validate the data up front.

pub(crate) mod index;
pub(crate) mod record;
pub(crate) mod table;

pub use index::DialCodeIndex;
pub use record::CountryRecord;
pub use table::CountryTable;
