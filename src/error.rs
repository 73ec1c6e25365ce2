//! Crate-wide error type.
//!
//! Every failure here is fatal: the program performs no retries and no
//! partial recovery, so errors only travel upward until `main` logs them
//! and exits.

use std::fmt;

use sea_orm::DbErr;

#[derive(Debug)]
pub enum Error {
    /// A required environment variable is missing.
    Config(String),
    /// The store is unreachable or refused the credentials.
    Connection(DbErr),
    /// DDL failure while dropping or creating tables.
    Schema(DbErr),
    /// The fixture document is not valid JSON, or a `fields` map does not
    /// match the shape of its declared entity.
    FixtureParse(serde_json::Error),
    /// A fixture entry declares a `model` tag outside the five known kinds.
    UnknownEntityKind(String),
    /// Foreign-key or not-null violation during the fixture load; the whole
    /// batch was rolled back.
    Integrity(DbErr),
    /// The lookup query failed to execute.
    Query(DbErr),
    /// Database failure outside the stages above.
    Database(DbErr),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(var) => write!(f, "missing environment variable {}", var),
            Error::Connection(e) => write!(f, "connection error: {}", e),
            Error::Schema(e) => write!(f, "schema reset failed: {}", e),
            Error::FixtureParse(e) => write!(f, "malformed fixture: {}", e),
            Error::UnknownEntityKind(tag) => write!(f, "unknown entity kind '{}'", tag),
            Error::Integrity(e) => write!(f, "integrity violation, batch rolled back: {}", e),
            Error::Query(e) => write!(f, "query error: {}", e),
            Error::Database(e) => write!(f, "database error: {}", e),
            Error::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
