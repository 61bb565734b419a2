//! Per-input ownership of a selection.

use crate::errors::DataIntegrityError;
use crate::resolver::{DialCodeResolver, ResolverError, SelectionState};

/// One phone input bound to a shared resolver.
///
/// The session owns its [`SelectionState`]; the resolver is only borrowed,
/// so any number of sessions can run against the same resolver.
///
/// # Example
///
/// ```rust
/// use dial_resolver::{DialCodeResolver, InputSession};
///
/// let resolver = DialCodeResolver::new()?;
/// let mut session = InputSession::new(&resolver, "")?;
///
/// assert!(session.on_input("+44")?);
/// assert_eq!(session.selection().iso2().unwrap().as_str(), "gb");
///
/// // Typing more digits of the same number keeps the flag.
/// assert!(!session.on_input("+447")?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct InputSession<'r> {
    resolver: &'r DialCodeResolver,
    state: SelectionState,
    input: String,
}

impl<'r> InputSession<'r> {
    /// Start a session for an input whose initial value is `value`.
    pub fn new(resolver: &'r DialCodeResolver, value: &str) -> Result<Self, DataIntegrityError> {
        let initial = resolver.initial_state(value)?;
        Ok(Self {
            resolver,
            state: initial.selection,
            input: initial.prefill.unwrap_or_else(|| value.to_string()),
        })
    }

    /// Apply an input change. Returns whether the selection changed.
    pub fn on_input(&mut self, input: &str) -> Result<bool, DataIntegrityError> {
        let next = self
            .resolver
            .update_selection_from_number(&self.state, input)?;
        let changed = next != self.state;
        self.state = next;
        self.input = input.to_string();
        Ok(changed)
    }

    /// Pick a country from the list. Returns the replaced input text.
    pub fn select(&mut self, iso2: &str) -> Result<&str, ResolverError> {
        let picked = self.resolver.select_country(iso2)?;
        self.state = picked.selection;
        self.input = picked.input;
        Ok(&self.input)
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.state
    }

    /// Last input text seen by the session.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Get reference to the underlying resolver.
    pub fn resolver(&self) -> &'r DialCodeResolver {
        self.resolver
    }

    /// End the session, keeping its selection.
    pub fn into_state(self) -> SelectionState {
        self.state
    }
}
