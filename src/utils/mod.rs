//! String helpers for raw phone input.

pub mod dial_code;

pub use dial_code::{REGIONLESS_NANP_AREA_CODES, digits_only, extract_dial_code, is_regionless_nanp};
