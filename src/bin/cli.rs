//! TableStore CLI
//!
//! Runs the demo scenario or an interactive shell against a single store.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tablestore::{Command, Config, Record, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// TableStore CLI
#[derive(Parser, Debug)]
#[command(name = "tablestore-cli")]
#[command(about = "Concurrent in-memory multi-table record store")]
#[command(version)]
struct Args {
    /// Table to create at startup (repeatable)
    #[arg(short, long = "table")]
    tables: Vec<String>,

    /// Initial record capacity of each new table
    #[arg(long, default_value = "0")]
    table_capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the users walkthrough (create, insert, retrieve, update, delete)
    Demo,

    /// Read commands from stdin, one per line
    Shell,
}

fn main() {
    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tablestore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("TableStore v{}", tablestore::VERSION);

    let config = Config::builder()
        .tables(args.tables)
        .table_capacity(args.table_capacity)
        .build();
    let store = Store::with_config(config);

    let result = match args.command {
        Commands::Demo => run_demo(&store),
        Commands::Shell => run_shell(&store, io::stdin().lock(), io::stdout().lock()),
    };

    if let Err(e) = result {
        tracing::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

/// Walk through the basic lifecycle of a record
fn run_demo(store: &Store) -> io::Result<()> {
    let mut out = io::stdout().lock();

    store.create_table("users");
    writeln!(out, "create users")?;

    let alice = Record::new().with("name", "Alice").with("age", 30);
    let bob = Record::new().with("name", "Bob").with("age", 25);

    for (id, record) in [("1", alice), ("2", bob)] {
        let line = format!("insert users {} {}", id, record);
        report(&mut out, &line, store.insert("users", id, record).map(|_| None))?;
    }

    report(&mut out, "get users 1", store.retrieve("users", "1").map(Some))?;

    let older = Record::new().with("name", "Alice").with("age", 31);
    report(&mut out, "update users 1", store.update("users", "1", older).map(|_| None))?;
    report(&mut out, "get users 1", store.retrieve("users", "1").map(Some))?;

    report(&mut out, "delete users 2", store.delete("users", "2").map(|_| None))?;
    report(&mut out, "get users 2", store.retrieve("users", "2").map(Some))?;
    report(&mut out, "get orders 1", store.retrieve("orders", "1").map(Some))?;

    Ok(())
}

fn report<W: Write>(
    out: &mut W,
    step: &str,
    result: tablestore::Result<Option<Record>>,
) -> io::Result<()> {
    match result {
        Ok(Some(record)) => writeln!(out, "{} -> {}", step, record),
        Ok(None) => writeln!(out, "{} -> OK", step),
        Err(e) => writeln!(out, "{} -> ERR {}", step, e),
    }
}

/// Execute one command per input line until EOF
///
/// Blank lines and `#` comments are skipped. Parse and store errors are
/// printed and the shell carries on.
fn run_shell<R: BufRead, W: Write>(store: &Store, input: R, mut out: W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "ERR {}", e)?;
                continue;
            }
        };

        match store.execute(command) {
            Ok(outcome) => writeln!(out, "{}", outcome)?,
            Err(e) => writeln!(out, "ERR {}", e)?,
        }
        out.flush()?;
    }

    Ok(())
}
