mod args;

use clap::Parser;
use table_dispatch::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command, parse_payload};

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut api = TableOptions::builder(args.db, args.table)
        .strict_identifiers(!args.lax)
        .wal(args.wal)
        .build()?;

    let output = match args.command {
        Command::Get { route, payload } => {
            let payload = parse_payload(payload.as_deref())?;
            let rows = api.get(route.as_deref(), payload.as_deref())?;
            tracing::info!(rows = rows.len(), "query finished");
            serde_json::to_string_pretty(&rows)?
        }
        Command::Post { route, payload } => {
            let payload = parse_payload(Some(&payload))?;
            let ack = api.post(Some(&route), payload.as_deref())?;
            tracing::info!(rows = ack.rows_affected, "write committed");
            serde_json::to_string(&ack)?
        }
    };
    println!("{output}");
    api.close()?;
    Ok(())
}
