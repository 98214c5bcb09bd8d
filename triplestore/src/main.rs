#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triplestore::types::ParseIdError;
use triplestore::{Error, Pattern, StoreConfig, SurrogateId, Triple, TripleStore, Value};

/// Store and query triples of values.
///
/// Arguments are parsed as JSON scalars (`42`, `true`, `null`, `"text"`);
/// anything else is taken as a bare string. In patterns, `_` is a wildcard
/// and `#<hex>` is a surrogate ID.
#[derive(Parser, Debug)]
#[command(name = "triplestore", version, about)]
struct Cli {
    /// Data directory (overrides TRIPLESTORE_DATA_DIRECTORY).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a triple.
    Put(Positions),
    /// Print the IDs and values in the unbound position of a pattern.
    Get(Positions),
    /// Print every triple matching a pattern.
    Triples(Positions),
}

#[derive(Args, Debug)]
struct Positions {
    subject: String,
    predicate: String,
    object: String,
}

/// Errors from running a command.
#[derive(Debug)]
enum CliError {
    /// The store failed.
    Store(Error),
    /// A `#<hex>` argument is not a surrogate ID.
    InvalidId(ParseIdError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::InvalidId(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::InvalidId(e) => Some(e),
        }
    }
}

impl From<Error> for CliError {
    fn from(e: Error) -> Self {
        Self::Store(e)
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triplestore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration from environment variables
    let mut config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.data_dir {
        config.data_directory = dir;
    }

    tracing::debug!(
        "Loaded configuration: data_directory={}, sequence_bandwidth={}",
        config.data_directory.display(),
        config.sequence_bandwidth
    );

    let store = match TripleStore::open_with_config(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {e}");
            std::process::exit(1);
        }
    };

    let result = run(&store, &cli.command);
    store.close();
    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(store: &TripleStore, command: &Command) -> Result<(), CliError> {
    match command {
        Command::Put(args) => {
            let triple = store.put(
                parse_value(&args.subject),
                parse_value(&args.predicate),
                parse_value(&args.object),
            )?;
            println!("{}", triple_ids(&triple));
        }
        Command::Get(args) => {
            let snapshot = store.snapshot()?;
            let ids = snapshot.get(
                parse_pattern(&args.subject)?,
                parse_pattern(&args.predicate)?,
                parse_pattern(&args.object)?,
            )?;
            let values = snapshot.materialize(&ids)?;
            for (id, value) in ids.iter().zip(&values) {
                println!("{}", entry(*id, value));
            }
        }
        Command::Triples(args) => {
            let snapshot = store.snapshot()?;
            let triples = snapshot.triples(
                parse_pattern(&args.subject)?,
                parse_pattern(&args.predicate)?,
                parse_pattern(&args.object)?,
            )?;
            for triple in triples {
                let [s, p, o] = snapshot.materialize(&[
                    triple.subject,
                    triple.predicate,
                    triple.object,
                ])?
                .try_into()
                .map_err(|_| Error::CorruptRecord(format!("incomplete triple {triple}")))?;
                println!(
                    "{}",
                    json!({
                        "subject": entry(triple.subject, &s),
                        "predicate": entry(triple.predicate, &p),
                        "object": entry(triple.object, &o),
                    })
                );
            }
        }
    }
    Ok(())
}

/// Parse a command line value: a JSON scalar, or else a bare string.
fn parse_value(arg: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(serde_json::Value::Null) => Value::Null,
        Ok(serde_json::Value::Bool(b)) => Value::Boolean(b),
        Ok(serde_json::Value::Number(n)) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or_else(|| Value::string(arg)),
        Ok(serde_json::Value::String(s)) => Value::String(s),
        Ok(_) | Err(_) => Value::string(arg),
    }
}

/// Parse a command line pattern: `_`, `#<hex>`, or a value.
fn parse_pattern(arg: &str) -> Result<Pattern, CliError> {
    if arg == "_" {
        return Ok(Pattern::Wildcard);
    }
    if arg.starts_with('#') {
        let id = SurrogateId::from_str(arg).map_err(CliError::InvalidId)?;
        return Ok(Pattern::Ids(vec![id]));
    }
    Ok(Pattern::Value(parse_value(arg)))
}

fn entry(id: SurrogateId, value: &Value) -> serde_json::Value {
    json!({ "id": id.to_string(), "value": value })
}

fn triple_ids(triple: &Triple) -> serde_json::Value {
    json!({
        "subject": triple.subject.to_string(),
        "predicate": triple.predicate.to_string(),
        "object": triple.object.to_string(),
    })
}
