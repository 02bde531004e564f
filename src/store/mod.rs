use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::rate_record::{NewRate, RateRecord};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRateStore;
pub use postgres::PgRateStore;

/// Persistence boundary for rate records.
///
/// Rows are append-only: saving the same date twice stores every row twice.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Inserts the whole batch in one transaction and returns the row count.
    /// Either every row is committed or none is.
    async fn insert_batch(&self, as_of_date: NaiveDate, rates: &[NewRate]) -> Result<u64>;

    /// Records for `as_of_date`, narrowed to `code` when it is non-empty.
    async fn query(&self, as_of_date: NaiveDate, code: Option<&str>) -> Result<Vec<RateRecord>>;
}

pub(crate) fn code_filter(code: Option<&str>) -> Option<&str> {
    code.filter(|c| !c.is_empty())
}
