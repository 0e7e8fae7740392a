//! Configuration for TableStore
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Registry Configuration
    // -------------------------------------------------------------------------
    /// Tables created when the store is constructed.
    /// Duplicates are harmless, creation is idempotent.
    pub initial_tables: Vec<String>,

    /// Initial capacity of the table registry
    pub registry_capacity: usize,

    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Initial record capacity of every newly created table
    pub table_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_tables: Vec::new(),
            registry_capacity: 16,
            table_capacity: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Add a table to create at construction
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.config.initial_tables.push(name.into());
        self
    }

    /// Add several tables to create at construction
    pub fn tables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .initial_tables
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the initial capacity of the table registry
    pub fn registry_capacity(mut self, capacity: usize) -> Self {
        self.config.registry_capacity = capacity;
        self
    }

    /// Set the initial record capacity of new tables
    pub fn table_capacity(mut self, capacity: usize) -> Self {
        self.config.table_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
