use bookmart::services::sale_service::{self, PublisherQuery};
use bookmart::{db, fixtures, report};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

// Helper to create a test database pre-loaded with the catalog below
async fn setup_catalog_db() -> DatabaseConnection {
    let db = db::connect("sqlite::memory:")
        .await
        .expect("Failed to connect");
    db::install_schema(&db).await.expect("Failed to install schema");
    let records = fixtures::parse(CATALOG_FIXTURE).expect("Failed to parse fixture");
    fixtures::load(&db, records).await.expect("Failed to load fixture");
    db
}

// Two books by Reed Elsevier stocked in the same shop, one sale each, plus
// an unrelated publisher whose name also contains "press".
const CATALOG_FIXTURE: &str = r#"[
  {"model": "publisher", "pk": 1, "fields": {"name": "Reed Elsevier"}},
  {"model": "publisher", "pk": 2, "fields": {"name": "No Starch Press"}},
  {"model": "book", "pk": 1, "fields": {"title": "Logic Programming", "id_publisher": 1}},
  {"model": "book", "pk": 2, "fields": {"title": "Graph Theory", "id_publisher": 1}},
  {"model": "book", "pk": 3, "fields": {"title": "The Rust Book", "id_publisher": 2}},
  {"model": "shop", "pk": 1, "fields": {"name": "Labyrinth"}},
  {"model": "stock", "pk": 1, "fields": {"id_book": 1, "id_shop": 1, "count": 5}},
  {"model": "stock", "pk": 2, "fields": {"id_book": 2, "id_shop": 1, "count": 5}},
  {"model": "stock", "pk": 3, "fields": {"id_book": 3, "id_shop": 1, "count": 5}},
  {"model": "sale", "pk": 1, "fields": {"price": "500.50", "date_sale": "2022-11-09T10:00:00", "id_stock": 1}},
  {"model": "sale", "pk": 2, "fields": {"price": "700.00", "date_sale": "2022-11-10T16:00:00", "id_stock": 2}},
  {"model": "sale", "pk": 3, "fields": {"price": "300.00", "date_sale": "2022-11-11T12:00:00", "id_stock": 3}}
]"#;

#[tokio::test]
async fn numeric_token_filters_by_publisher_id() {
    let db = setup_catalog_db().await;

    let rows = sale_service::find_sales_by_publisher(&db, &PublisherQuery::parse("2"))
        .await
        .expect("Query failed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book_title, "The Rust Book");
}

#[tokio::test]
async fn name_match_is_substring_not_prefix() {
    let db = setup_catalog_db().await;

    // "eed" only occurs mid-word in "Reed Elsevier".
    let rows = sale_service::find_sales_by_publisher(&db, &PublisherQuery::parse("eed"))
        .await
        .expect("Query failed");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.shop_name == "Labyrinth"));
}

#[tokio::test]
async fn name_match_is_case_insensitive() {
    let db = setup_catalog_db().await;

    for token in ["reed", "REED", "Reed"] {
        let rows = sale_service::find_sales_by_publisher(&db, &PublisherQuery::parse(token))
            .await
            .expect("Query failed");
        assert_eq!(rows.len(), 2, "token {:?}", token);
    }
}

#[tokio::test]
async fn multi_row_join_pairs_each_sale_with_its_own_book() {
    let db = setup_catalog_db().await;

    let rows = sale_service::find_sales_by_publisher(&db, &PublisherQuery::parse("Reed"))
        .await
        .expect("Query failed");
    assert_eq!(rows.len(), 2);

    let logic = rows
        .iter()
        .find(|r| r.book_title == "Logic Programming")
        .expect("missing row for Logic Programming");
    assert_eq!(logic.price, Decimal::new(50050, 2));
    assert_eq!(logic.date_sale.date().to_string(), "2022-11-09");

    let graph = rows
        .iter()
        .find(|r| r.book_title == "Graph Theory")
        .expect("missing row for Graph Theory");
    assert_eq!(graph.price, Decimal::new(70000, 2));
    assert_eq!(graph.date_sale.date().to_string(), "2022-11-10");
}

#[tokio::test]
async fn unmatched_id_yields_empty_result_not_an_error() {
    let db = setup_catalog_db().await;

    let rows = sale_service::find_sales_by_publisher(&db, &PublisherQuery::parse("99"))
        .await
        .expect("Query failed");
    assert!(rows.is_empty());

    // And the formatter still produces a header-only table.
    let table = report::render(&rows);
    assert!(table.contains("Book_title"));
    assert_eq!(table.lines().count(), 4);
}

#[tokio::test]
async fn unmatched_substring_yields_empty_result() {
    let db = setup_catalog_db().await;

    let rows = sale_service::find_sales_by_publisher(
        &db,
        &PublisherQuery::parse("does not exist"),
    )
    .await
    .expect("Query failed");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn sales_without_a_full_join_chain_are_excluded() {
    let db = setup_catalog_db().await;

    // A book with stock but no sales contributes nothing.
    let extra = r#"[
      {"model": "book", "pk": 4, "fields": {"title": "Unsold", "id_publisher": 1}},
      {"model": "stock", "pk": 4, "fields": {"id_book": 4, "id_shop": 1, "count": 1}}
    ]"#;
    let records = fixtures::parse(extra).expect("Failed to parse fixture");
    fixtures::load(&db, records).await.expect("Failed to load fixture");

    let rows = sale_service::find_sales_by_publisher(&db, &PublisherQuery::parse("Reed"))
        .await
        .expect("Query failed");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.book_title != "Unsold"));
}
