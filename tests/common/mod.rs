#![allow(dead_code)]

use serde_json::Value as JsonValue;
use table_dispatch::prelude::*;
use tempfile::TempDir;

/// On-disk inventory database with `books`, `tools` and `machines` tables.
pub struct Inventory {
    _dir: TempDir,
    pub path: String,
}

impl Inventory {
    pub fn dispatcher(&self, table: &str) -> Dispatcher {
        Dispatcher::open(&self.path, table).expect("open dispatcher")
    }

    pub fn store(&self, table: &str) -> TableStore {
        TableStore::open(&self.path, table).expect("open store")
    }
}

pub fn text(s: &str) -> RowValues {
    RowValues::Text(s.to_owned())
}

pub fn tool(id: i64, kind: &str, brand: &str, price: f64, count: i64) -> Vec<RowValues> {
    vec![
        RowValues::Int(id),
        text(kind),
        text(brand),
        RowValues::Float(price),
        RowValues::Int(count),
    ]
}

pub fn book(title: &str, author: &str, genre: &str) -> Vec<RowValues> {
    vec![text(title), text(author), text(genre)]
}

fn seed(path: &str, table: &str, ddl: &str, rows: &[Vec<RowValues>]) {
    let store = TableStore::open(path, table).expect("open store");
    store.create_table(ddl).expect("create table");
    store.insert_many(rows).expect("seed rows");
    store.commit_change().expect("commit seed");
    store.close().expect("close seed store");
}

pub fn inventory() -> Inventory {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir
        .path()
        .join("ex_inventory.db")
        .to_string_lossy()
        .into_owned();

    seed(
        &path,
        "books",
        "(title TEXT, author TEXT, genre TEXT)",
        &[
            book("October Revolution", "Y Geronovsky", "history"),
            book("American Wetlands", "Mary Chandler", "geography"),
            book("Monstrous Appetite", "Mark Appleton", "horror"),
            book("Glazier Manual", "BC Thompson", "technical"),
            book("Sunset Tides", "Laura Mills", "fiction"),
            book("Timber Framing & Construction", "Richard Clark", "technical"),
            book("The Handy Gardener", "Susan Bower", "technical"),
            book("American Highlands", "Mary Chandler", "geography"),
        ],
    );

    seed(
        &path,
        "tools",
        "(id INTEGER PRIMARY KEY, type TEXT, brand TEXT, price REAL, count INTEGER)",
        &[
            tool(1, "table saw", "Makita", 267.49, 4),
            tool(2, "cordless drill", "Dewalt", 129.00, 5),
            tool(3, "circular saw", "Skil", 59.99, 3),
            tool(4, "router", "Bosch", 189.50, 2),
            tool(5, "garden shears", "Fiskars", 24.39, 4),
            tool(6, "socket set", "Craftsman", 89.99, 7),
            tool(7, "pipe wrench", "Ridgid", 45.20, 5),
            tool(8, "brick trowel", "Marshalltown", 26.43, 4),
            tool(9, "level", "Stabila", 64.75, 9),
            tool(10, "jigsaw", "Bosch", 119.00, 3),
            tool(11, "1 lb plastic mallet", "ABC", 19.23, 6),
            tool(12, "15-piece brass and steel punch set", "Wheeler", 27.99, 6),
            tool(13, "carpenter hammer", "Craftsman", 13.98, 18),
            tool(14, "orbital sander", "Makita", 79.95, 5),
            tool(15, "combo welder", "Miller", 2400.35, 7),
            tool(16, "welding hood", "Esab", 333.99, 12),
            tool(17, "bench grinder", "Jet", 149.99, 3),
            tool(18, "plasma cutter", "Lincoln", 1119.68, 2),
        ],
    );

    seed(
        &path,
        "machines",
        "(name TEXT, brand TEXT, price INTEGER)",
        &[
            vec![text("lathe"), text("Grizzly"), RowValues::Int(2150)],
            vec![text("CNC mill"), text("Langmuir"), RowValues::Int(4495)],
            vec![text("CNC router"), text("Shark"), RowValues::Int(4999)],
            vec![text("angle grinder"), text("Black & Decker"), RowValues::Int(45)],
            vec![text("angle grinder"), text("Dewalt"), RowValues::Int(90)],
        ],
    );

    Inventory { _dir: dir, path }
}

pub fn row_json(row: &[RowValues]) -> Vec<JsonValue> {
    row.iter()
        .map(|v| serde_json::to_value(v).expect("row value to json"))
        .collect()
}
