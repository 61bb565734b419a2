//! Dial code to country lookup, including area-code qualified codes.

use super::record::CountryRecord;
use crate::errors::CountryTableError;
use crate::types::Iso2;
use std::collections::HashMap;

/// Priority assigned to country+area composed codes.
const AREA_CODE_PRIORITY: u32 = 0;

/// Mapping from a numeric dial code to the countries registered under it.
///
/// Keys are plain country codes (`"44"`) as well as country codes composed
/// with an area code (`"1204"`). Each key holds at least one identifier,
/// ordered by ascending priority and then by table order.
#[derive(Debug, Clone, Default)]
pub struct DialCodeIndex {
    entries: HashMap<String, Vec<Iso2>>,
}

/// One registration before ordering.
struct Slot {
    priority: u32,
    order: usize,
    iso2: Iso2,
}

impl DialCodeIndex {
    /// Build the index from records in table order.
    ///
    /// Fails when two countries claim the same priority under one key.
    pub(crate) fn build<'a>(
        records: impl IntoIterator<Item = &'a CountryRecord>,
    ) -> Result<Self, CountryTableError> {
        let mut slots: HashMap<String, Vec<Slot>> = HashMap::new();

        for (order, record) in records.into_iter().enumerate() {
            register(
                &mut slots,
                record.dial_code.as_str().to_string(),
                record.priority,
                order,
                &record.iso2,
            )?;
            for code in record.area_dial_codes() {
                register(&mut slots, code, AREA_CODE_PRIORITY, order, &record.iso2)?;
            }
        }

        let entries = slots
            .into_iter()
            .map(|(code, mut slots)| {
                slots.sort_by_key(|slot| (slot.priority, slot.order));
                (code, slots.into_iter().map(|slot| slot.iso2).collect())
            })
            .collect();

        Ok(Self { entries })
    }

    /// Whether `code` (digits only) is a registered dial code.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Identifiers registered under `code`, in priority order.
    pub fn get(&self, code: &str) -> Option<&[Iso2]> {
        self.entries.get(code).map(Vec::as_slice)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no codes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all registered codes.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn register(
    slots: &mut HashMap<String, Vec<Slot>>,
    code: String,
    priority: u32,
    order: usize,
    iso2: &Iso2,
) -> Result<(), CountryTableError> {
    let list = slots.entry(code.clone()).or_default();
    if let Some(existing) = list.iter().find(|slot| slot.priority == priority) {
        // Same country listing the same code twice is harmless.
        if existing.iso2 == *iso2 {
            return Ok(());
        }
        return Err(CountryTableError::OverlappingPriority {
            dial_code: code,
            priority,
            existing: existing.iso2.clone(),
            conflicting: iso2.clone(),
        });
    }
    list.push(Slot {
        priority,
        order,
        iso2: iso2.clone(),
    });
    Ok(())
}
