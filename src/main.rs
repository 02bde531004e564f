use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::{Context, Result};
use log::info;
use sqlx::postgres::PgPoolOptions;

use nbk_rates::config::Config;
use nbk_rates::feed_client::RateFeedClient;
use nbk_rates::handlers;
use nbk_rates::store::{PgRateStore, RateStore};
use nbk_rates::{IngestionPipeline, QueryService};

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().context("Could not load config")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.db_connection)
        .await
        .context("Could not connect to the database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Could not run migrations")?;

    let store: Arc<dyn RateStore> = Arc::new(PgRateStore::new(pool));
    let feed = RateFeedClient::new(&config.feed_url, config.feed_timeout())?;
    let pipeline = web::Data::new(IngestionPipeline::new(feed, Arc::clone(&store)));
    let query = web::Data::new(QueryService::new(store));

    info!("Server listening on port {}", config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(pipeline.clone())
            .app_data(query.clone())
            .configure(handlers::configure)
    })
    .bind(config.bind_address())
    .with_context(|| format!("Could not bind {}", config.bind_address()))?
    .run()
    .await?;

    Ok(())
}
