use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;

#[derive(Parser, Debug)]
#[command(author, version, about = "Issue get/post calls against one SQLite table")]
pub(crate) struct Args {
    /// Database file (created if missing), or :memory:
    #[arg(long)]
    pub(crate) db: String,
    #[arg(long)]
    pub(crate) table: String,
    /// Denylist guard only; skip the column allow-list.
    #[arg(long)]
    pub(crate) lax: bool,
    #[arg(long)]
    pub(crate) wal: bool,
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Read: scan, /describe, /column, /order or /where
    Get {
        route: Option<String>,
        /// JSON array, e.g. '["price", 200.0, ">="]'
        payload: Option<String>,
    },
    /// Write: /insert_one, /insert_many, /update or /delete
    Post { route: String, payload: String },
}

pub(crate) fn parse_payload(raw: Option<&str>) -> Result<Option<Vec<JsonValue>>, String> {
    raw.map(|text| {
        serde_json::from_str::<Vec<JsonValue>>(text)
            .map_err(|err| format!("payload must be a JSON array: {err}"))
    })
    .transpose()
}
