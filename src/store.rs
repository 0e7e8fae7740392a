//! Store Module
//!
//! The registry of tables and the only entry point for record operations.
//!
//! ## Responsibilities
//! - Own every table and, through them, every record
//! - Serialize writers and admit concurrent readers
//! - Hand out copies, never references into the registry
//! - Route `Command`s to the matching operation

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::record::Record;
use crate::table::Table;

/// Concurrent in-memory multi-table record store
///
/// ## Concurrency Model: Single Guard, Many Readers / One Writer
///
/// - One `RwLock` covers the whole registry (all tables, all records)
/// - **Reads** (`retrieve`, `has_table`, `table_names`, `record_count`,
///   `contains`): shared lock, run in parallel with each other
/// - **Writes** (`create_table`, `drop_table`, `insert`, `update`, `delete`):
///   exclusive lock, block and are blocked by every other operation
/// - Each guard lives only for the single map operation and is released on
///   every return path, error returns included
/// - No operation takes the lock twice, so the store cannot deadlock itself
///
/// Writes are totally ordered by lock acquisition. Records are replaced as a
/// whole, so a reader racing a writer sees either the old or the new record.
pub struct Store {
    /// Construction settings (table capacity for new tables)
    config: Config,

    /// Table name → table. The only shared mutable state.
    tables: RwLock<HashMap<String, Table>>,
}

impl Store {
    /// Create an empty store with the default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a store from a config
    ///
    /// Tables listed in `initial_tables` are created up front.
    pub fn with_config(config: Config) -> Self {
        let mut tables = HashMap::with_capacity(config.registry_capacity);
        for name in &config.initial_tables {
            tables
                .entry(name.clone())
                .or_insert_with(|| Table::with_capacity(config.table_capacity));
        }

        tracing::debug!("Store initialized with {} table(s)", tables.len());

        Self {
            config,
            tables: RwLock::new(tables),
        }
    }

    // =========================================================================
    // Table Operations
    // =========================================================================

    /// Create an empty table named `name`
    ///
    /// Idempotent: an existing table is left untouched, records included.
    pub fn create_table(&self, name: impl Into<String>) {
        let name = name.into();
        let mut tables = self.tables.write();

        if !tables.contains_key(&name) {
            tracing::debug!("Created table '{}'", name);
            tables.insert(name, Table::with_capacity(self.config.table_capacity));
        }
    }

    /// Remove a table and every record in it
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let mut tables = self.tables.write();

        let table = tables
            .remove(name)
            .ok_or_else(|| StoreError::table_not_found(name))?;

        tracing::debug!("Dropped table '{}' ({} records)", name, table.len());
        Ok(())
    }

    /// Whether a table named `name` exists
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of records in `table`
    pub fn record_count(&self, table: &str) -> Result<usize> {
        let tables = self.tables.read();
        let table = Self::table(&tables, table)?;
        Ok(table.len())
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Store `record` under `id`, overwriting any existing record
    ///
    /// Fails only when the table does not exist.
    pub fn insert(&self, table: &str, id: impl Into<String>, record: Record) -> Result<()> {
        let id = id.into();
        let mut tables = self.tables.write();
        let records = Self::table_mut(&mut tables, table)?;

        let replaced = records.put(id, record).is_some();
        tracing::trace!(table, replaced, "insert");
        Ok(())
    }

    /// Get a copy of the record stored under `id`
    pub fn retrieve(&self, table: &str, id: &str) -> Result<Record> {
        let tables = self.tables.read();
        let records = Self::table(&tables, table)?;

        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::record_not_found(table, id))
    }

    /// Replace the record under `id`; the record must already exist
    ///
    /// Unlike `insert`, never creates a record.
    pub fn update(&self, table: &str, id: &str, record: Record) -> Result<()> {
        let mut tables = self.tables.write();
        let records = Self::table_mut(&mut tables, table)?;

        records
            .replace(id, record)
            .ok_or_else(|| StoreError::record_not_found(table, id))?;

        tracing::trace!(table, id, "update");
        Ok(())
    }

    /// Remove the record under `id`
    pub fn delete(&self, table: &str, id: &str) -> Result<()> {
        let mut tables = self.tables.write();
        let records = Self::table_mut(&mut tables, table)?;

        records
            .remove(id)
            .ok_or_else(|| StoreError::record_not_found(table, id))?;

        tracing::trace!(table, id, "delete");
        Ok(())
    }

    /// Whether `table` holds a record under `id`
    pub fn contains(&self, table: &str, id: &str) -> Result<bool> {
        let tables = self.tables.read();
        let records = Self::table(&tables, table)?;
        Ok(records.contains(id))
    }

    // =========================================================================
    // Command Routing
    // =========================================================================

    /// Execute a command
    ///
    /// Routes commands to the matching operation; the guard is taken once,
    /// inside that operation.
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        tracing::trace!(command = command.name(), "execute");

        match command {
            Command::CreateTable { table } => {
                self.create_table(table);
                Ok(Outcome::Done)
            }
            Command::DropTable { table } => {
                self.drop_table(&table)?;
                Ok(Outcome::Done)
            }
            Command::Insert { table, id, record } => {
                self.insert(&table, id, record)?;
                Ok(Outcome::Done)
            }
            Command::Retrieve { table, id } => self.retrieve(&table, &id).map(Outcome::Record),
            Command::Update { table, id, record } => {
                self.update(&table, &id, record)?;
                Ok(Outcome::Done)
            }
            Command::Delete { table, id } => {
                self.delete(&table, &id)?;
                Ok(Outcome::Done)
            }
            Command::Count { table } => self.record_count(&table).map(Outcome::Count),
            Command::ListTables => Ok(Outcome::Tables(self.table_names())),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Internal lookups (called with the guard held)
    // =========================================================================

    fn table<'a>(tables: &'a HashMap<String, Table>, name: &str) -> Result<&'a Table> {
        tables
            .get(name)
            .ok_or_else(|| StoreError::table_not_found(name))
    }

    fn table_mut<'a>(tables: &'a mut HashMap<String, Table>, name: &str) -> Result<&'a mut Table> {
        tables
            .get_mut(name)
            .ok_or_else(|| StoreError::table_not_found(name))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
