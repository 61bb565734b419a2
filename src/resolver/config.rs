//! Resolver configuration types.

/// Configuration for the Dial-Code Resolver.
///
/// Country identifiers are two-letter codes in either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Countries offered first, in order. The first one is the default
    /// selection when no initial country is set.
    pub preferred_countries: Vec<String>,
    /// When non-empty, only these countries are known to the resolver.
    pub only_countries: Vec<String>,
    /// Countries hidden from the resolver. Ignored when `only_countries`
    /// is set.
    pub exclude_countries: Vec<String>,
    /// Country selected when the input carries no dial code.
    pub initial_country: Option<String>,
    /// Treat input without '+' as a national NANP number when a NANP
    /// country is selected.
    pub national_mode: bool,
    /// Leave an empty input empty instead of prefilling the default
    /// country's dial code.
    pub auto_hide_dial_code: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            preferred_countries: Vec::new(),
            only_countries: Vec::new(),
            exclude_countries: Vec::new(),
            initial_country: None,
            national_mode: false,
            auto_hide_dial_code: true,
        }
    }
}

impl ResolverConfig {
    /// Create a new builder for ResolverConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dial_resolver::ResolverConfig;
    ///
    /// let config = ResolverConfig::builder()
    ///     .preferred_countries(["gb", "us"])
    ///     .exclude_countries(["aq"])
    ///     .national_mode(true)
    ///     .build();
    ///
    /// assert_eq!(config.preferred_countries, vec!["gb", "us"]);
    /// assert!(config.national_mode);
    /// ```
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }

    /// Create a new config with custom preferred countries.
    pub fn with_preferred_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Create a new config with a custom initial country.
    pub fn with_initial_country(mut self, iso2: impl Into<String>) -> Self {
        self.initial_country = Some(iso2.into());
        self
    }

    /// Create a new config with national mode toggled.
    pub fn with_national_mode(mut self, national_mode: bool) -> Self {
        self.national_mode = national_mode;
        self
    }
}

/// Builder for ResolverConfig.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred countries.
    ///
    /// Default: none
    pub fn preferred_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.preferred_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the resolver to these countries.
    ///
    /// Default: all countries
    pub fn only_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.only_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Hide these countries from the resolver.
    ///
    /// Default: none
    pub fn exclude_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.exclude_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial country.
    ///
    /// Default: none
    pub fn initial_country(mut self, iso2: impl Into<String>) -> Self {
        self.config.initial_country = Some(iso2.into());
        self
    }

    /// Enable or disable national mode.
    ///
    /// Default: false
    pub fn national_mode(mut self, national_mode: bool) -> Self {
        self.config.national_mode = national_mode;
        self
    }

    /// Enable or disable hiding the dial code of an empty input.
    ///
    /// Default: true
    pub fn auto_hide_dial_code(mut self, auto_hide: bool) -> Self {
        self.config.auto_hide_dial_code = auto_hide;
        self
    }

    /// Build the ResolverConfig.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
