//! Main resolver implementation.

use super::config::ResolverConfig;
use super::error::ResolverError;
use super::state::{InitialState, ManualSelection, SelectionState};
use crate::countries::{CountryRecord, CountryTable};
use crate::errors::{CountryTableError, DataIntegrityError};
use crate::types::Iso2;
use crate::utils::dial_code::{digits_only, extract_dial_code, is_regionless_nanp};
use std::borrow::Cow;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Maps raw phone input to the most plausible country.
///
/// The resolver is immutable once built and can be shared between any
/// number of inputs. Each input keeps its own [`SelectionState`] and feeds
/// it back on every change:
///
/// - Reading the longest registered dial code from the input
/// - Ranking the countries registered under it
/// - Keeping a selected NANP country for regionless NANP numbers
///
/// # Example
///
/// ```rust
/// use dial_resolver::{DialCodeResolver, SelectionState};
///
/// let resolver = DialCodeResolver::new()?;
///
/// let state = resolver.update_selection_from_number(&SelectionState::Unset, "+44 20")?;
/// assert_eq!(state.iso2().unwrap().as_str(), "gb");
///
/// let state = resolver.update_selection_from_number(&state, "+1204555")?;
/// assert_eq!(state.iso2().unwrap().as_str(), "ca");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DialCodeResolver {
    table: Arc<CountryTable>,
    config: ResolverConfig,
    preferred: Vec<Iso2>,
    initial_country: Option<Iso2>,
}

impl DialCodeResolver {
    /// Create a resolver over the embedded table with default configuration.
    pub fn new() -> Result<Self, ResolverError> {
        Self::with_config(ResolverConfig::default())
    }

    /// Create a resolver over the embedded table.
    pub fn with_config(config: ResolverConfig) -> Result<Self, ResolverError> {
        Self::with_table(CountryTable::embedded(), config)
    }

    /// Create a resolver over a custom table.
    ///
    /// Country filters are applied here; the resolver works only with the
    /// remaining countries.
    pub fn with_table(
        table: Arc<CountryTable>,
        config: ResolverConfig,
    ) -> Result<Self, ResolverError> {
        let table = apply_filters(table, &config)?;

        let mut preferred = Vec::with_capacity(config.preferred_countries.len());
        for iso2 in &config.preferred_countries {
            match table.find(iso2) {
                Some(country) => preferred.push(country.iso2.clone()),
                None => {
                    #[cfg(feature = "tracing")]
                    debug!(iso2 = %iso2, "Skipping unknown preferred country");
                }
            }
        }

        let initial_country = match &config.initial_country {
            Some(iso2) => Some(
                table
                    .find(iso2)
                    .map(|country| country.iso2.clone())
                    .ok_or_else(|| ResolverError::UnknownCountry {
                        iso2: iso2.clone(),
                        context: "initial country",
                    })?,
            ),
            None => None,
        };

        #[cfg(feature = "tracing")]
        debug!(
            countries = table.len(),
            preferred = preferred.len(),
            national_mode = config.national_mode,
            "Dial code resolver ready"
        );

        Ok(Self {
            table,
            config,
            preferred,
            initial_country,
        })
    }

    /// Create a new builder for DialCodeResolver.
    pub fn builder() -> DialCodeResolverBuilder {
        DialCodeResolverBuilder::new()
    }

    /// The active (filtered) country table.
    pub fn table(&self) -> &CountryTable {
        &self.table
    }

    /// Get reference to the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Preferred countries that exist in the active table, in configured
    /// order.
    pub fn preferred_countries(&self) -> Result<Vec<&CountryRecord>, DataIntegrityError> {
        self.preferred
            .iter()
            .map(|iso2| self.table.get(iso2.as_str()))
            .collect()
    }

    /// Country selected for empty input: the initial country, else the
    /// first preferred country, else the first country of the table.
    pub fn default_country(&self) -> Result<&CountryRecord, DataIntegrityError> {
        match self.initial_country.as_ref().or(self.preferred.first()) {
            Some(iso2) => self.table.get(iso2.as_str()),
            None => Ok(self.table.first()),
        }
    }

    /// Longest registered dial code at the start of `input`, with '+'.
    pub fn extract_dial_code<'a>(&self, input: &'a str) -> Option<&'a str> {
        extract_dial_code(input, self.table.index())
    }

    /// Countries registered under `dial_code`, ordered by priority and
    /// then by table order. Accepts composed area codes such as `1204`.
    pub fn resolve_countries_by_dial_code(
        &self,
        dial_code: &str,
    ) -> Result<Vec<&CountryRecord>, DataIntegrityError> {
        self.table
            .countries_for_dial_code(dial_code.trim_start_matches('+'))
    }

    /// Compute the selection that follows `current` after the input
    /// changed to `input`.
    ///
    /// The function is pure: the same arguments always give the same
    /// state. An unchanged selection is returned as a clone of `current`,
    /// which shares its record.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dial_resolver.update_selection",
            level = "debug",
            skip_all,
            fields(current = ?current.iso2())
        )
    )]
    pub fn update_selection_from_number(
        &self,
        current: &SelectionState,
        input: &str,
    ) -> Result<SelectionState, DataIntegrityError> {
        let number = self.national_number(current, input);
        let number = number.as_ref();
        let numeric = digits_only(number);

        if let Some(dial_code) = self.extract_dial_code(number) {
            let candidates = self.resolve_countries_by_dial_code(dial_code)?;

            let nanp_selected = current.is_nanp();
            let already_selected = current
                .iso2()
                .is_some_and(|iso2| candidates.iter().any(|c| c.iso2 == *iso2));
            // Only "+1" could be read, but the number already has an area code.
            let is_nanp_area_code = dial_code == "+1" && numeric.len() >= 4;

            if !(nanp_selected && is_regionless_nanp(&numeric))
                && (!already_selected || is_nanp_area_code)
                && let Some(country) = candidates.first()
            {
                #[cfg(feature = "tracing")]
                debug!(
                    iso2 = %country.iso2,
                    dial_code = %dial_code,
                    "Selected country from dial code"
                );
                return self.selected(country);
            }

            return Ok(current.clone());
        }

        if number.starts_with('+') && !numeric.is_empty() {
            #[cfg(feature = "tracing")]
            debug!("Unrecognised dial code");
            return Ok(SelectionState::Unknown);
        }

        if number.is_empty() || number == "+" {
            let country = self.default_country()?;
            #[cfg(feature = "tracing")]
            debug!(iso2 = %country.iso2, "Selected default country");
            return self.selected(country);
        }

        Ok(current.clone())
    }

    /// Selection and prefill for an input created with `value`.
    ///
    /// A value carrying a dial code selects its country, unless it is a
    /// regionless NANP number (national mode without an initial country
    /// still selects it). Otherwise the initial country, or for an empty
    /// value the default country, is selected.
    pub fn initial_state(&self, value: &str) -> Result<InitialState, DataIntegrityError> {
        let has_dial_code = self.extract_dial_code(value).is_some();
        let national_without_initial =
            self.config.national_mode && self.initial_country.is_none();

        let selection = if has_dial_code && (!is_regionless_nanp(value) || national_without_initial)
        {
            self.update_selection_from_number(&SelectionState::Unset, value)?
        } else if let Some(iso2) = &self.initial_country {
            SelectionState::Selected(self.table.get_shared(iso2.as_str())?)
        } else if value.is_empty() {
            self.selected(self.default_country()?)?
        } else {
            SelectionState::Unset
        };

        let prefill = match selection.country() {
            Some(country)
                if value.is_empty()
                    && !self.config.national_mode
                    && !self.config.auto_hide_dial_code =>
            {
                Some(country.dial_code.to_prefixed())
            }
            _ => None,
        };

        Ok(InitialState { selection, prefill })
    }

    /// Select a country picked from the list.
    pub fn select_country(&self, iso2: &str) -> Result<ManualSelection, ResolverError> {
        let country = self
            .table
            .find(iso2)
            .ok_or_else(|| ResolverError::UnknownCountry {
                iso2: iso2.to_string(),
                context: "country",
            })?;

        #[cfg(feature = "tracing")]
        debug!(iso2 = %country.iso2, "Country selected from list");

        Ok(ManualSelection {
            input: country.dial_code.to_prefixed(),
            selection: self.selected(country)?,
        })
    }

    /// Countries matching a free-text query over dial code and name.
    pub fn search(&self, query: &str) -> Vec<&CountryRecord> {
        self.table.search(query)
    }

    /// Countries whose calling code is exactly `dial_code`.
    pub fn countries_with_dial_code(&self, dial_code: &str) -> Vec<&CountryRecord> {
        self.table.with_dial_code(dial_code)
    }

    fn selected(&self, country: &CountryRecord) -> Result<SelectionState, DataIntegrityError> {
        self.table
            .get_shared(country.iso2.as_str())
            .map(SelectionState::Selected)
    }

    /// In national mode with a NANP country selected, read `2045550123`
    /// as `+12045550123`.
    fn national_number<'a>(&self, current: &SelectionState, input: &'a str) -> Cow<'a, str> {
        if self.config.national_mode
            && !input.is_empty()
            && current.is_nanp()
            && !input.starts_with('+')
        {
            if input.starts_with('1') {
                return Cow::Owned(format!("+{input}"));
            }
            return Cow::Owned(format!("+1{input}"));
        }
        Cow::Borrowed(input)
    }
}

fn apply_filters(
    table: Arc<CountryTable>,
    config: &ResolverConfig,
) -> Result<Arc<CountryTable>, ResolverError> {
    let filtered = if !config.only_countries.is_empty() {
        table.filtered(|r| config.only_countries.iter().any(|c| r.iso2 == c.as_str()))
    } else if !config.exclude_countries.is_empty() {
        table.filtered(|r| !config.exclude_countries.iter().any(|c| r.iso2 == c.as_str()))
    } else {
        return Ok(table);
    };

    match filtered {
        Ok(table) => Ok(Arc::new(table)),
        Err(CountryTableError::Empty) => Err(ResolverError::NoCountries),
        Err(e) => Err(e.into()),
    }
}

/// Builder for DialCodeResolver.
///
/// Provides a fluent API for constructing a resolver with a custom table
/// and configuration.
///
/// # Example
///
/// ```rust
/// use dial_resolver::{DialCodeResolver, ResolverConfig};
///
/// let resolver = DialCodeResolver::builder()
///     .config(ResolverConfig::builder().preferred_countries(["gb"]).build())
///     .build()?;
///
/// assert_eq!(resolver.default_country()?.iso2.as_str(), "gb");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DialCodeResolverBuilder {
    table: Option<Arc<CountryTable>>,
    config: ResolverConfig,
}

impl DialCodeResolverBuilder {
    /// Create a new builder with the embedded table and default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom country table.
    pub fn table(mut self, table: impl Into<Arc<CountryTable>>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the DialCodeResolver.
    pub fn build(self) -> Result<DialCodeResolver, ResolverError> {
        let table = self.table.unwrap_or_else(CountryTable::embedded);
        DialCodeResolver::with_table(table, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DialCode;

    fn record(name: &str, iso2: &str, dial_code: &str, priority: u32) -> CountryRecord {
        CountryRecord::new(
            name,
            Iso2::new(iso2).unwrap(),
            DialCode::new(dial_code).unwrap(),
        )
        .with_priority(priority)
    }

    fn us_ca_table() -> CountryTable {
        CountryTable::new(vec![
            record("United States", "us", "1", 0),
            record("Canada", "ca", "1", 1).with_area_codes(["204"]),
        ])
        .unwrap()
    }

    fn us_ca() -> DialCodeResolver {
        DialCodeResolver::builder()
            .table(us_ca_table())
            .build()
            .unwrap()
    }

    fn iso2(state: &SelectionState) -> Option<&str> {
        state.iso2().map(Iso2::as_str)
    }

    #[test]
    fn test_scenario_us_then_canada() {
        let resolver = us_ca();

        let state = resolver
            .update_selection_from_number(&SelectionState::Unset, "")
            .unwrap();
        assert_eq!(iso2(&state), Some("us"));

        let state = resolver.update_selection_from_number(&state, "+1").unwrap();
        assert_eq!(iso2(&state), Some("us"));

        let state = resolver
            .update_selection_from_number(&state, "+1204")
            .unwrap();
        assert_eq!(iso2(&state), Some("ca"));
    }

    #[test]
    fn test_unregistered_code_is_unknown() {
        let resolver = us_ca();
        let us = SelectionState::from(resolver.table().first().clone());
        let state = resolver.update_selection_from_number(&us, "+9999").unwrap();
        assert_eq!(state, SelectionState::Unknown);
    }

    #[test]
    fn test_plus_without_digits_leaves_state_unchanged() {
        let resolver = us_ca();
        let us = SelectionState::from(resolver.table().get_shared("us").unwrap());
        for current in [us, SelectionState::Unknown, SelectionState::Unset] {
            for input in ["+abc", "+-", "+(", "+ ", "+٤٤"] {
                let state = resolver
                    .update_selection_from_number(&current, input)
                    .unwrap();
                assert_eq!(state, current, "{input:?} from {current:?}");
            }
        }
    }

    #[test]
    fn test_plus_then_separated_digits_is_unknown() {
        let resolver = us_ca();
        let us = SelectionState::from(resolver.table().get_shared("us").unwrap());
        for current in [us, SelectionState::Unset] {
            let state = resolver
                .update_selection_from_number(&current, "+ 44")
                .unwrap();
            assert_eq!(state, SelectionState::Unknown);
        }
    }

    #[test]
    fn test_selection_shares_table_record() {
        let resolver = us_ca();
        let shared = resolver.table().get_shared("ca").unwrap();

        let state = resolver
            .update_selection_from_number(&SelectionState::Unset, "+1204")
            .unwrap();
        let next = resolver
            .update_selection_from_number(&state, "+12045")
            .unwrap();
        match (&state, &next) {
            (SelectionState::Selected(a), SelectionState::Selected(b)) => {
                assert!(Arc::ptr_eq(a, &shared));
                assert!(Arc::ptr_eq(b, &shared));
            }
            other => panic!("unexpected states: {other:?}"),
        }
    }

    #[test]
    fn test_plus_alone_selects_default() {
        let resolver = us_ca();
        let state = resolver
            .update_selection_from_number(&SelectionState::Unknown, "+")
            .unwrap();
        assert_eq!(iso2(&state), Some("us"));
    }

    #[test]
    fn test_national_digits_leave_state_unchanged() {
        let resolver = us_ca();
        let state = resolver
            .update_selection_from_number(&SelectionState::Unset, "2045550123")
            .unwrap();
        assert!(state.is_unset());
    }

    #[test]
    fn test_regionless_nanp_keeps_selection() {
        let resolver = us_ca();
        let ca = SelectionState::from(resolver.table().get("ca").unwrap().clone());
        let state = resolver
            .update_selection_from_number(&ca, "+18005551234")
            .unwrap();
        assert_eq!(iso2(&state), Some("ca"));
    }

    #[test]
    fn test_nanp_area_code_overrides_selection() {
        let resolver = us_ca();
        let ca = SelectionState::from(resolver.table().get("ca").unwrap().clone());
        // 212 is not registered to Canada, so the main NANP country wins.
        let state = resolver
            .update_selection_from_number(&ca, "+1212555")
            .unwrap();
        assert_eq!(iso2(&state), Some("us"));
    }

    #[test]
    fn test_short_nanp_keeps_matching_selection() {
        let resolver = us_ca();
        let ca = SelectionState::from(resolver.table().get("ca").unwrap().clone());
        let state = resolver.update_selection_from_number(&ca, "+12").unwrap();
        assert_eq!(iso2(&state), Some("ca"));
    }

    #[test]
    fn test_default_country_precedence() {
        let table = Arc::new(us_ca_table());

        let plain = DialCodeResolver::with_table(table.clone(), ResolverConfig::default()).unwrap();
        assert_eq!(plain.default_country().unwrap().iso2, "us");

        let preferred = DialCodeResolver::with_table(
            table.clone(),
            ResolverConfig::default().with_preferred_countries(["zz", "ca"]),
        )
        .unwrap();
        assert_eq!(preferred.default_country().unwrap().iso2, "ca");
        assert_eq!(preferred.preferred_countries().unwrap().len(), 1);

        let initial = DialCodeResolver::with_table(
            table,
            ResolverConfig::default()
                .with_preferred_countries(["ca"])
                .with_initial_country("US"),
        )
        .unwrap();
        assert_eq!(initial.default_country().unwrap().iso2, "us");
    }

    #[test]
    fn test_unknown_initial_country_rejected() {
        let res = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(ResolverConfig::default().with_initial_country("gb"))
            .build();
        assert!(matches!(
            res,
            Err(ResolverError::UnknownCountry { iso2, .. }) if iso2 == "gb"
        ));
    }

    #[test]
    fn test_only_countries_filters_index() {
        let resolver = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(ResolverConfig::builder().only_countries(["CA"]).build())
            .build()
            .unwrap();
        assert_eq!(resolver.table().len(), 1);

        let state = resolver
            .update_selection_from_number(&SelectionState::Unset, "+1")
            .unwrap();
        assert_eq!(iso2(&state), Some("ca"));
    }

    #[test]
    fn test_exclude_everything_fails() {
        let res = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(
                ResolverConfig::builder()
                    .exclude_countries(["us", "ca"])
                    .build(),
            )
            .build();
        assert!(matches!(res, Err(ResolverError::NoCountries)));
    }

    #[test]
    fn test_national_mode_reads_area_code() {
        let resolver = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(ResolverConfig::default().with_national_mode(true))
            .build()
            .unwrap();
        let us = SelectionState::from(resolver.table().get("us").unwrap().clone());

        let state = resolver
            .update_selection_from_number(&us, "2045550123")
            .unwrap();
        assert_eq!(iso2(&state), Some("ca"));

        let state = resolver
            .update_selection_from_number(&us, "12045550123")
            .unwrap();
        assert_eq!(iso2(&state), Some("ca"));
    }

    #[test]
    fn test_national_mode_ignored_without_nanp_selection() {
        let resolver = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(ResolverConfig::default().with_national_mode(true))
            .build()
            .unwrap();
        let state = resolver
            .update_selection_from_number(&SelectionState::Unset, "2045550123")
            .unwrap();
        assert!(state.is_unset());
    }

    #[test]
    fn test_initial_state_prefill() {
        let resolver = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(ResolverConfig::builder().auto_hide_dial_code(false).build())
            .build()
            .unwrap();
        let init = resolver.initial_state("").unwrap();
        assert_eq!(iso2(&init.selection), Some("us"));
        assert_eq!(init.prefill.as_deref(), Some("+1"));

        // Hidden by default.
        assert_eq!(us_ca().initial_state("").unwrap().prefill, None);
    }

    #[test]
    fn test_initial_state_from_value() {
        let resolver = us_ca();
        let init = resolver.initial_state("+1204555").unwrap();
        assert_eq!(iso2(&init.selection), Some("ca"));
        assert_eq!(init.prefill, None);

        // Regionless NANP numbers do not pick a flag on their own.
        let init = resolver.initial_state("+18005551234").unwrap();
        assert!(init.selection.is_unset());
    }

    #[test]
    fn test_initial_state_uses_initial_country() {
        let resolver = DialCodeResolver::builder()
            .table(us_ca_table())
            .config(ResolverConfig::default().with_initial_country("ca"))
            .build()
            .unwrap();
        let init = resolver.initial_state("+18005551234").unwrap();
        assert_eq!(iso2(&init.selection), Some("ca"));
    }

    #[test]
    fn test_select_country() {
        let resolver = us_ca();
        let picked = resolver.select_country("CA").unwrap();
        assert_eq!(picked.input, "+1");
        assert_eq!(iso2(&picked.selection), Some("ca"));

        assert!(matches!(
            resolver.select_country("fr"),
            Err(ResolverError::UnknownCountry { .. })
        ));
    }

    #[test]
    fn test_resolve_accepts_plus() {
        let resolver = us_ca();
        let with_plus = resolver.resolve_countries_by_dial_code("+1").unwrap();
        let without = resolver.resolve_countries_by_dial_code("1").unwrap();
        assert_eq!(with_plus, without);
        assert_eq!(without.len(), 2);
    }
}
