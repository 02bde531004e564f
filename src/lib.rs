pub mod config;
pub mod date_codec;
pub mod error;
pub mod feed_client;
pub mod handlers;
pub mod ingestion;
pub mod query;
pub mod rate_record;
pub mod rates_xml;
pub mod store;

pub use error::{FeedError, RateError, Result};
pub use ingestion::IngestionPipeline;
pub use query::QueryService;
pub use rate_record::{NewRate, RateRecord};
