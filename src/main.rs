use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookmart::services::sale_service::{self, PublisherQuery};
use bookmart::{config, db, error::Error, fixtures, report};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookmart=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = config::Config::from_env()?;

    let db = db::connect(&config.database_url()).await?;
    db::install_schema(&db).await?;

    let records = fixtures::parse_file(fixtures::DEFAULT_FIXTURE_PATH)?;
    tracing::info!("loading {} fixture records", records.len());
    fixtures::load(&db, records).await?;

    print!("Введите id или имя автора: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let query = PublisherQuery::parse(&line);
    let rows = sale_service::find_sales_by_publisher(&db, &query).await?;
    print!("{}", report::render(&rows));

    Ok(())
}
