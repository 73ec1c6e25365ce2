//! Connection handling and the destructive schema installer.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::Error;

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, Error> {
    Database::connect(database_url)
        .await
        .map_err(Error::Connection)
}

/// Drops and recreates the five tables. This is a deliberate reset, not a
/// migration: any data under the schema is destroyed. Safe to call on a
/// fresh or a previously populated database, and never invoked implicitly —
/// callers opt in.
pub async fn install_schema(db: &DatabaseConnection) -> Result<(), Error> {
    // Reverse dependency order so the drops never trip over foreign keys.
    for table in ["sale", "stock", "book", "shop", "publisher"] {
        execute(db, format!("DROP TABLE IF EXISTS {}", table)).await?;
    }

    execute(
        db,
        r#"
        CREATE TABLE publisher (
            id INTEGER PRIMARY KEY,
            name VARCHAR(40) NOT NULL
        )
        "#
        .to_owned(),
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE book (
            id INTEGER PRIMARY KEY,
            title VARCHAR(40) NOT NULL,
            id_publisher INTEGER NOT NULL,
            FOREIGN KEY (id_publisher) REFERENCES publisher(id)
        )
        "#
        .to_owned(),
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE shop (
            id INTEGER PRIMARY KEY,
            name VARCHAR(40) NOT NULL
        )
        "#
        .to_owned(),
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE stock (
            id INTEGER PRIMARY KEY,
            id_book INTEGER NOT NULL,
            id_shop INTEGER NOT NULL,
            count INTEGER,
            FOREIGN KEY (id_book) REFERENCES book(id),
            FOREIGN KEY (id_shop) REFERENCES shop(id)
        )
        "#
        .to_owned(),
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE sale (
            id INTEGER PRIMARY KEY,
            price DECIMAL(10, 2) NOT NULL,
            date_sale TIMESTAMP NOT NULL,
            id_stock INTEGER NOT NULL,
            count INTEGER,
            FOREIGN KEY (id_stock) REFERENCES stock(id)
        )
        "#
        .to_owned(),
    )
    .await?;

    Ok(())
}

async fn execute(db: &DatabaseConnection, sql: String) -> Result<(), Error> {
    db.execute(Statement::from_string(db.get_database_backend(), sql))
        .await
        .map_err(Error::Schema)?;
    Ok(())
}
