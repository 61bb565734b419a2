//! Dial code extraction from raw phone input.

use crate::countries::DialCodeIndex;
use crate::types::MAX_DIAL_CODE_LEN;

/// NANP area codes that are not tied to a single country
/// (toll-free and non-geographic ranges).
pub const REGIONLESS_NANP_AREA_CODES: [&str; 17] = [
    "800", "822", "833", "844", "855", "866", "877", "880", "881", "882", "883", "884", "885",
    "886", "887", "888", "889",
];

/// Extract the longest registered dial code at the start of `input`.
///
/// The input must start with `+`. Digits after it are read one at a time
/// until a non-digit or the fourth digit; every prefix found in `index`
/// replaces the previous match. The returned slice keeps the leading `+`
/// and is borrowed from `input`.
///
/// Returns `None` when no registered prefix is found.
///
/// # Example
///
/// ```rust
/// use dial_resolver::{CountryTable, extract_dial_code};
///
/// let table = CountryTable::embedded();
/// assert_eq!(extract_dial_code("+1204555", table.index()), Some("+1204"));
/// assert_eq!(extract_dial_code("+44 20", table.index()), Some("+44"));
/// assert_eq!(extract_dial_code("020", table.index()), None);
/// ```
pub fn extract_dial_code<'a>(input: &'a str, index: &DialCodeIndex) -> Option<&'a str> {
    let rest = input.strip_prefix('+')?;
    let mut numeric = String::with_capacity(MAX_DIAL_CODE_LEN);
    let mut best = None;

    for (i, c) in rest.char_indices() {
        if !c.is_ascii_digit() {
            break;
        }
        numeric.push(c);
        if index.contains(&numeric) {
            // +1 for the leading '+', +1 to include this digit.
            best = Some(&input[..i + 2]);
        }
        if numeric.len() == MAX_DIAL_CODE_LEN {
            break;
        }
    }

    best
}

/// Every ASCII digit of `input`, in order.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `input` is a NANP number with a regionless area code,
/// e.g. `+1 800 555 1234`.
pub fn is_regionless_nanp(input: &str) -> bool {
    let numeric = digits_only(input);
    match numeric.strip_prefix('1').and_then(|rest| rest.get(..3)) {
        Some(area_code) => REGIONLESS_NANP_AREA_CODES.contains(&area_code),
        None => false,
    }
}
