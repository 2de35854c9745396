//! Skyhash CLI Client
//!
//! Sends one raw query to a Skyhash server and prints the response.

use std::process::ExitCode;

use clap::Parser;
use skyhash::{AsyncConnection, Connection, ConnectionConfig, Query, QueryWriter, Response};
use tracing_subscriber::{fmt, EnvFilter};

/// Skyhash CLI
#[derive(Parser, Debug)]
#[command(name = "skyhash-cli")]
#[command(about = "Run a raw query against a Skyhash server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = skyhash::config::DEFAULT_PORT)]
    port: u16,

    /// Read/write timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    /// Use the async driver
    #[arg(long = "async")]
    use_async: bool,

    /// Print the encoded packet instead of sending it
    #[arg(long)]
    encode_only: bool,

    /// Query arguments, e.g. `GET mykey`
    #[arg(required = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,skyhash=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let query = Query::from_args(&args.args);

    if args.encode_only {
        let packet = query.to_bytes();
        println!("{}", String::from_utf8_lossy(&packet).replace('\n', "\\n"));
        return ExitCode::SUCCESS;
    }

    let config = ConnectionConfig::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    tracing::info!("Skyhash CLI v{}", skyhash::VERSION);
    tracing::debug!("Server: {}", config.addr());

    let result = if args.use_async {
        run_async(&config, &query)
    } else {
        Connection::connect(&config).and_then(|mut conn| conn.run_query(&query))
    };

    match result {
        Ok(response) => {
            println!("{}", response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Query failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_async(config: &ConnectionConfig, query: &Query) -> skyhash::Result<Response> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut conn = AsyncConnection::connect(config).await?;
        conn.run_query(query).await
    })
}
