//! Dial-Code Resolver: per-keystroke country selection.

pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod state;
pub(crate) mod structure;

pub use config::{ResolverConfig, ResolverConfigBuilder};
pub use error::ResolverError;
pub use state::{InitialState, ManualSelection, SelectionState};
pub use structure::{DialCodeResolver, DialCodeResolverBuilder};
