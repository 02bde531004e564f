use std::sync::Arc;

use chrono::NaiveDate;
use log::{error, info, warn};
use tokio::task::JoinHandle;

use crate::date_codec;
use crate::error::{RateError, Result};
use crate::feed_client::RateFeedClient;
use crate::rate_record::NewRate;
use crate::rates_xml::Item;
use crate::store::RateStore;

/// Accept-then-detach ingestion of one day of rates.
///
/// Only the date check is visible to the caller. Feed and storage failures
/// end up in the log and in the returned task's output, which the HTTP
/// layer never reads.
pub struct IngestionPipeline {
    feed: RateFeedClient,
    store: Arc<dyn RateStore>,
}

impl IngestionPipeline {
    pub fn new(feed: RateFeedClient, store: Arc<dyn RateStore>) -> Self {
        Self { feed, store }
    }

    /// Validates `external_date` and spawns the fetch-and-store task.
    /// Dropping the handle leaves the task running.
    pub fn save_for_date(&self, external_date: &str) -> Result<JoinHandle<Result<u64>>> {
        let as_of_date = date_codec::parse(external_date)?;

        let feed = self.feed.clone();
        let store = Arc::clone(&self.store);
        let external_date = external_date.to_owned();

        Ok(tokio::spawn(async move {
            let result = ingest(&feed, store.as_ref(), &external_date, as_of_date).await;
            match &result {
                Ok(count) => info!("Saved {} rates for {}", count, as_of_date),
                Err(e) => error!("Can't save rates for {}: {}", external_date, e),
            }
            result
        }))
    }
}

async fn ingest(
    feed: &RateFeedClient,
    store: &dyn RateStore,
    external_date: &str,
    as_of_date: NaiveDate,
) -> Result<u64> {
    let items = feed.fetch(external_date).await?;
    let rates = to_new_rates(items);
    store.insert_batch(as_of_date, &rates).await
}

/// Keeps the items whose value parses, logging and dropping the rest.
pub fn to_new_rates(items: Vec<Item>) -> Vec<NewRate> {
    items
        .into_iter()
        .filter_map(|item| match parse_value(&item) {
            Ok(value) => Some(NewRate {
                title: item.full_name,
                code: item.short_code,
                value,
            }),
            Err(e) => {
                warn!("Skipping feed item: {}", e);
                None
            }
        })
        .collect()
}

fn parse_value(item: &Item) -> Result<f64> {
    item.raw_value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RateError::RecordValueUnparsable {
            code: item.short_code.clone(),
            raw: item.raw_value.clone(),
        })
}
