//! Publisher sales lookup.
//!
//! One five-way inner join: sale → stock → book → publisher plus
//! stock → shop, filtered on the publisher side.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait,
};

use crate::error::Error;
use crate::models::{book, publisher, sale, shop, stock};

/// How the raw CLI token filters publishers.
#[derive(Debug, Clone, PartialEq)]
pub enum PublisherQuery {
    /// Exact id match.
    ById(i64),
    /// Case-insensitive substring match against the publisher name.
    ByName(String),
}

impl PublisherQuery {
    /// A non-empty all-digit token selects by id; everything else falls
    /// through to the name match, including digit strings too long for an
    /// id (those can only ever yield an empty result anyway).
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = token.parse::<i64>() {
                return PublisherQuery::ById(id);
            }
        }
        PublisherQuery::ByName(token.to_owned())
    }
}

/// One row of the sales report, projected out of the join.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct SaleRow {
    pub book_title: String,
    pub shop_name: String,
    pub price: Decimal,
    pub date_sale: NaiveDateTime,
}

pub async fn find_sales_by_publisher(
    db: &DatabaseConnection,
    query: &PublisherQuery,
) -> Result<Vec<SaleRow>, Error> {
    let select = sale::Entity::find()
        .join(JoinType::InnerJoin, sale::Relation::Stock.def())
        .join(JoinType::InnerJoin, stock::Relation::Book.def())
        .join(JoinType::InnerJoin, book::Relation::Publisher.def())
        .join(JoinType::InnerJoin, stock::Relation::Shop.def())
        .select_only()
        .column_as(book::Column::Title, "book_title")
        .column_as(shop::Column::Name, "shop_name")
        .column_as(sale::Column::Price, "price")
        .column_as(sale::Column::DateSale, "date_sale");

    let select = match query {
        PublisherQuery::ById(id) => select.filter(publisher::Column::Id.eq(*id)),
        PublisherQuery::ByName(name) => select.filter(
            Expr::expr(Func::lower(Expr::col((
                publisher::Entity,
                publisher::Column::Name,
            ))))
            .like(format!("%{}%", name.to_lowercase())),
        ),
    };

    // No ORDER BY on purpose: rows come back in store-defined order.
    select
        .into_model::<SaleRow>()
        .all(db)
        .await
        .map_err(Error::Query)
}
