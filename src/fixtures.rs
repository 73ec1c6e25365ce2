//! JSON seed loader.
//!
//! A fixture document is an array of `{ "model": .., "pk": .., "fields": .. }`
//! entries. Parsing resolves every `model` tag to one of the five entity
//! kinds up front, so an undeclared tag fails before any database work.
//! Loading inserts the staged rows in document order inside a single
//! transaction; the loader itself does no dependency reordering and no
//! validation beyond what the store enforces.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set, TransactionTrait};
use serde::Deserialize;

use crate::error::Error;
use crate::models::{book, publisher, sale, shop, stock};

pub const DEFAULT_FIXTURE_PATH: &str = "fixtures/tests_data.json";

#[derive(Debug, Deserialize)]
struct RawEntry {
    model: String,
    pk: i32,
    fields: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PublisherFields {
    name: String,
}

#[derive(Debug, Deserialize)]
struct BookFields {
    title: String,
    id_publisher: i32,
}

#[derive(Debug, Deserialize)]
struct ShopFields {
    name: String,
}

#[derive(Debug, Deserialize)]
struct StockFields {
    id_book: i32,
    id_shop: i32,
    #[serde(default)]
    count: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct SaleFields {
    price: Decimal,
    date_sale: NaiveDateTime,
    id_stock: i32,
    #[serde(default)]
    count: Option<i32>,
}

/// One staged row, already resolved to its entity kind.
#[derive(Debug)]
pub enum FixtureRecord {
    Publisher(publisher::ActiveModel),
    Book(book::ActiveModel),
    Shop(shop::ActiveModel),
    Stock(stock::ActiveModel),
    Sale(sale::ActiveModel),
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<FixtureRecord>, Error> {
    let json = fs::read_to_string(path)?;
    parse(&json)
}

pub fn parse(json: &str) -> Result<Vec<FixtureRecord>, Error> {
    let entries: Vec<RawEntry> = serde_json::from_str(json).map_err(Error::FixtureParse)?;
    entries.into_iter().map(stage).collect()
}

fn stage(entry: RawEntry) -> Result<FixtureRecord, Error> {
    let RawEntry { model, pk, fields } = entry;
    let record = match model.as_str() {
        "publisher" => {
            let f: PublisherFields = decode(fields)?;
            FixtureRecord::Publisher(publisher::ActiveModel {
                id: Set(pk),
                name: Set(f.name),
            })
        }
        "book" => {
            let f: BookFields = decode(fields)?;
            FixtureRecord::Book(book::ActiveModel {
                id: Set(pk),
                title: Set(f.title),
                id_publisher: Set(f.id_publisher),
            })
        }
        "shop" => {
            let f: ShopFields = decode(fields)?;
            FixtureRecord::Shop(shop::ActiveModel {
                id: Set(pk),
                name: Set(f.name),
            })
        }
        "stock" => {
            let f: StockFields = decode(fields)?;
            FixtureRecord::Stock(stock::ActiveModel {
                id: Set(pk),
                id_book: Set(f.id_book),
                id_shop: Set(f.id_shop),
                count: Set(f.count),
            })
        }
        "sale" => {
            let f: SaleFields = decode(fields)?;
            FixtureRecord::Sale(sale::ActiveModel {
                id: Set(pk),
                price: Set(f.price),
                date_sale: Set(f.date_sale),
                id_stock: Set(f.id_stock),
                count: Set(f.count),
            })
        }
        other => return Err(Error::UnknownEntityKind(other.to_string())),
    };
    Ok(record)
}

fn decode<T: serde::de::DeserializeOwned>(fields: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(fields).map_err(Error::FixtureParse)
}

/// Inserts every staged record inside one transaction. All-or-nothing: a
/// constraint violation rolls the whole batch back.
pub async fn load(db: &DatabaseConnection, records: Vec<FixtureRecord>) -> Result<(), Error> {
    let txn = db.begin().await.map_err(Error::Database)?;

    for record in records {
        let inserted = match record {
            FixtureRecord::Publisher(m) => m.insert(&txn).await.map(|_| ()),
            FixtureRecord::Book(m) => m.insert(&txn).await.map(|_| ()),
            FixtureRecord::Shop(m) => m.insert(&txn).await.map(|_| ()),
            FixtureRecord::Stock(m) => m.insert(&txn).await.map(|_| ()),
            FixtureRecord::Sale(m) => m.insert(&txn).await.map(|_| ()),
        };
        if let Err(e) = inserted {
            let _ = txn.rollback().await;
            return Err(integrity_or_database(e));
        }
    }

    txn.commit().await.map_err(integrity_or_database)
}

fn integrity_or_database(e: DbErr) -> Error {
    match e.sql_err() {
        Some(_) => Error::Integrity(e),
        None => Error::Database(e),
    }
}
