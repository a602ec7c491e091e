//! kvbridge CLI
//!
//! Interactive shell over an in-memory collection. Reads one command per
//! line from stdin:
//!
//! ```text
//! seed    <key> <json>
//! get     <key>
//! replace <key> <json> [cas]
//! remove  <key> [cas]
//! lock    <key> <seconds>
//! unlock  <key> <token>
//! inject  <STATUS>
//! quit
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use kvbridge::options::{GetOptions, RemoveOptions, ReplaceOptions, UnlockOptions};
use kvbridge::protocol::ResponseStatus;
use kvbridge::{Collection, Config, Encoding, KvError, MemoryDispatcher};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// kvbridge CLI
#[derive(Parser, Debug)]
#[command(name = "kvbridge-cli")]
#[command(about = "Interactive shell over an in-memory kvbridge collection")]
#[command(version)]
struct Args {
    /// Bucket name
    #[arg(short, long, default_value = "default")]
    bucket: String,

    /// Scope name
    #[arg(long, default_value = "_default")]
    scope: String,

    /// Collection name
    #[arg(short, long, default_value = "_default")]
    collection: String,

    /// Default KV timeout in milliseconds
    #[arg(short, long, default_value = "2500")]
    timeout_ms: u64,

    /// Number of bucket replicas
    #[arg(short, long, default_value = "1")]
    replicas: u8,

    /// Value encoding (json or bincode)
    #[arg(short, long, default_value = "json")]
    encoding: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kvbridge=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let encoding = match Encoding::from_name(&args.encoding) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let config = Config::builder()
        .bucket(&args.bucket)
        .scope(&args.scope)
        .collection(&args.collection)
        .kv_timeout(Duration::from_millis(args.timeout_ms))
        .num_replicas(args.replicas)
        .default_encoding(encoding)
        .build();

    tracing::info!("kvbridge CLI v{}", kvbridge::VERSION);
    tracing::info!("Collection: {}", config.collection_id());

    let dispatcher = Arc::new(MemoryDispatcher::new(&config));
    let collection = Collection::new(config, dispatcher);

    if let Err(e) = run(&collection).await {
        tracing::error!("Shell error: {}", e);
        std::process::exit(1);
    }
}

async fn run(collection: &Collection<MemoryDispatcher>) -> kvbridge::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match execute(collection, line).await {
            Ok(output) => writeln!(stdout, "{}", output)?,
            Err(e) => writeln!(stdout, "ERROR {:?}: {}", e.kind(), e)?,
        }
        stdout.flush()?;
    }

    Ok(())
}

async fn execute(collection: &Collection<MemoryDispatcher>, line: &str) -> kvbridge::Result<String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "seed" => {
            let (key, json) = split_arg(rest)?;
            let value: Value = parse_json(json)?;
            let encoded = collection
                .config()
                .default_encoding
                .encode(&value)
                .map_err(|e| KvError::InvalidArgument(format!("Cannot encode value: {}", e)))?;
            let cas = collection.dispatcher().seed(collection.id(), key, encoded);
            Ok(format!("OK cas={}", cas))
        }
        "get" => {
            let options = GetOptions::default();
            match collection.get::<Value>(rest, &options).await? {
                Some(doc) => Ok(format!("{} cas={}", doc.content(), doc.cas())),
                None => Ok("(none)".to_string()),
            }
        }
        "replace" => {
            let (key, tail) = split_arg(rest)?;
            let (json, cas) = match tail.rsplit_once(' ') {
                Some((json, cas)) if cas.parse::<u64>().is_ok() => (json, parse_u64(cas)?),
                _ => (tail, 0),
            };
            let value: Value = parse_json(json)?;
            let options = ReplaceOptions::builder().cas(cas).build()?;
            let result = collection.replace(key, &value, &options).await?;
            Ok(format!("OK cas={} token={:?}", result.cas(), result.mutation_token()))
        }
        "remove" => {
            let (key, cas) = match rest.split_once(' ') {
                Some((key, cas)) => (key, parse_u64(cas)?),
                None => (rest, 0),
            };
            let options = RemoveOptions::builder().cas(cas).build()?;
            let result = collection.remove(key, &options).await?;
            Ok(format!("OK cas={} token={:?}", result.cas(), result.mutation_token()))
        }
        "lock" => {
            let (key, secs) = split_arg(rest)?;
            let lock_time = Duration::from_secs(parse_u64(secs)?);
            match collection.dispatcher().lock(collection.id(), key, lock_time) {
                Some(token) => Ok(format!("OK token={}", token)),
                None => Ok("(none)".to_string()),
            }
        }
        "unlock" => {
            let (key, token) = split_arg(rest)?;
            collection
                .unlock(key, parse_u64(token)?, &UnlockOptions::default())
                .await?;
            Ok("OK".to_string())
        }
        "inject" => {
            let status = ResponseStatus::from_name(rest)
                .ok_or_else(|| KvError::InvalidArgument(format!("Unknown status: {}", rest)))?;
            collection.dispatcher().inject_status(status);
            Ok(format!("OK next={}", status))
        }
        other => Err(KvError::InvalidArgument(format!("Unknown command: {}", other))),
    }
}

fn split_arg(input: &str) -> kvbridge::Result<(&str, &str)> {
    input
        .split_once(' ')
        .map(|(a, b)| (a, b.trim()))
        .ok_or_else(|| KvError::InvalidArgument(format!("Expected two arguments: {}", input)))
}

fn parse_u64(input: &str) -> kvbridge::Result<u64> {
    input
        .trim()
        .parse()
        .map_err(|_| KvError::InvalidArgument(format!("Not a number: {}", input)))
}

fn parse_json(input: &str) -> kvbridge::Result<Value> {
    serde_json::from_str(input).map_err(|e| KvError::InvalidArgument(format!("Invalid JSON: {}", e)))
}
