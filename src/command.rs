//! Command definitions
//!
//! A `Command` describes a single store operation so callers outside the
//! process boundary (the CLI shell, tests, future front ends) can route work
//! through `Store::execute`.
//!
//! ## Text Format
//! ```text
//! create <table>
//! drop   <table>
//! insert <table> <id> field=value ...
//! get    <table> <id>
//! update <table> <id> field=value ...
//! delete <table> <id>
//! count  <table>
//! tables
//! ```
//!
//! Values: `null`, `true`/`false`, integers, floats, `"quoted strings"`;
//! any other token is taken as a bare string.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::record::Record;
use crate::value::Value;

/// A single store operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a table (idempotent)
    CreateTable { table: String },

    /// Drop a table and all its records
    DropTable { table: String },

    /// Insert or overwrite a record
    Insert {
        table: String,
        id: String,
        record: Record,
    },

    /// Read a record
    Retrieve { table: String, id: String },

    /// Replace an existing record
    Update {
        table: String,
        id: String,
        record: Record,
    },

    /// Remove a record
    Delete { table: String, id: String },

    /// Count the records in a table
    Count { table: String },

    /// List table names
    ListTables,
}

impl Command {
    /// Short name of the command, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateTable { .. } => "create",
            Command::DropTable { .. } => "drop",
            Command::Insert { .. } => "insert",
            Command::Retrieve { .. } => "get",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Count { .. } => "count",
            Command::ListTables => "tables",
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The operation succeeded and produced no value
    Done,

    /// A record snapshot
    Record(Record),

    /// A record count
    Count(usize),

    /// Table names, sorted
    Tables(Vec<String>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done => write!(f, "OK"),
            Outcome::Record(record) => write!(f, "{}", record),
            Outcome::Count(n) => write!(f, "{}", n),
            Outcome::Tables(names) if names.is_empty() => write!(f, "(no tables)"),
            Outcome::Tables(names) => write!(f, "{}", names.join(", ")),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line)?;
        let mut args = tokens.into_iter();

        let verb = args.next().ok_or(ParseError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "create" => Command::CreateTable {
                table: required(&mut args, "create", "table")?,
            },
            "drop" => Command::DropTable {
                table: required(&mut args, "drop", "table")?,
            },
            "insert" => Command::Insert {
                table: required(&mut args, "insert", "table")?,
                id: required(&mut args, "insert", "id")?,
                record: parse_fields(&mut args)?,
            },
            "get" | "retrieve" => Command::Retrieve {
                table: required(&mut args, "get", "table")?,
                id: required(&mut args, "get", "id")?,
            },
            "update" => Command::Update {
                table: required(&mut args, "update", "table")?,
                id: required(&mut args, "update", "id")?,
                record: parse_fields(&mut args)?,
            },
            "delete" | "del" => Command::Delete {
                table: required(&mut args, "delete", "table")?,
                id: required(&mut args, "delete", "id")?,
            },
            "count" => Command::Count {
                table: required(&mut args, "count", "table")?,
            },
            "tables" => Command::ListTables,
            _ => return Err(ParseError::UnknownCommand(verb)),
        };

        if let Some(extra) = args.next() {
            return Err(ParseError::UnexpectedArgument(extra));
        }

        Ok(command)
    }
}

/// Parse a single value token
///
/// Quoted tokens are always strings; otherwise null/bool/integer/float are
/// tried in that order before falling back to a bare string.
pub fn parse_value(raw: &str) -> Value {
    if is_quoted(raw) {
        return Value::String(unquote(raw));
    }

    match raw {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Value::Integer(i);
    }

    // Require a digit so words like "inf" or "NaN" stay strings
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(raw.to_string())
}

fn required(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ParseError> {
    args.next()
        .map(|raw| unquote(&raw))
        .ok_or(ParseError::MissingArgument { command, argument })
}

fn parse_fields(args: &mut impl Iterator<Item = String>) -> Result<Record, ParseError> {
    let mut record = Record::new();

    for raw in args {
        let (name, value) = match split_field(&raw) {
            Some((name, value)) if !name.is_empty() => (name, value),
            _ => return Err(ParseError::InvalidField(raw)),
        };
        record.set(unquote(name), parse_value(value));
    }

    Ok(record)
}

/// Split `name=value` on the first `=` outside a quoted section
fn split_field(raw: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in raw.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '=' if !in_quotes => return Some((&raw[..i], &raw[i + 1..])),
            _ => {}
        }
    }

    None
}

/// Split a line on whitespace, keeping double-quoted sections together
///
/// Quotes and escapes are left in the token text; `unquote` strips them.
fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
                current.push(c);
            }
            '\\' if in_quotes => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn is_quoted(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"')
}

fn unquote(raw: &str) -> String {
    if !is_quoted(raw) {
        return raw.to_string();
    }

    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
