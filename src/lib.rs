//! # Dial Resolver
//!
//! Dial-code extraction and country disambiguation for international
//! phone inputs.
//!
//! Given whatever the user has typed so far, the resolver finds the longest
//! registered dial code at the start of the input and picks the country it
//! belongs to. Shared codes are ranked by priority (`+1` is the United
//! States before Canada), area codes disambiguate them (`+1204` is Canada),
//! and a selected NANP country is kept for toll-free numbers that belong to
//! no country in particular.
//!
//! ## Quick Start
//!
//! ```rust
//! use dial_resolver::{DialCodeResolver, ResolverConfig, SelectionState};
//!
//! let config = ResolverConfig::builder()
//!     .preferred_countries(["us", "gb"])
//!     .build();
//! let resolver = DialCodeResolver::with_config(config)?;
//!
//! // Empty input selects the default country.
//! let state = resolver.update_selection_from_number(&SelectionState::Unset, "")?;
//! assert_eq!(state.iso2().unwrap().as_str(), "us");
//!
//! // An area code switches to the country that owns it.
//! let state = resolver.update_selection_from_number(&state, "+1 204")?;
//! assert_eq!(state.iso2().unwrap().as_str(), "us");
//! let state = resolver.update_selection_from_number(&state, "+1204")?;
//! assert_eq!(state.iso2().unwrap().as_str(), "ca");
//!
//! // Unrecognised codes clear the flag instead of falling back.
//! let state = resolver.update_selection_from_number(&state, "+9999")?;
//! assert_eq!(state, SelectionState::Unknown);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! InputSession        (one per input, owns SelectionState)
//!         │
//!         ▼
//! DialCodeResolver    (shared, immutable; config + filters)
//!         │
//!         ▼
//! CountryTable        (validated records + DialCodeIndex)
//! ```
//!
//! ## Features
//!
//! - `tracing` - tracing instrumentation (enabled by default)

pub mod countries;
pub mod errors;
pub mod resolver;
pub mod session;
pub mod types;
pub mod utils;

// Re-export commonly used types at the crate root
pub use countries::{CountryRecord, CountryTable, DialCodeIndex};
pub use errors::{CountryTableError, DataIntegrityError};
pub use resolver::{
    DialCodeResolver, DialCodeResolverBuilder, InitialState, ManualSelection, ResolverConfig,
    ResolverConfigBuilder, ResolverError, SelectionState,
};
pub use session::InputSession;
pub use types::{DialCode, DialCodeError, Iso2, Iso2Error};
pub use utils::{digits_only, extract_dial_code, is_regionless_nanp};

/// Re-export of the ISO country metadata crate used by
/// [`CountryRecord::country`].
pub use keshvar;
