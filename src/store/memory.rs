use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{RateStore, code_filter};
use crate::error::Result;
use crate::rate_record::{NewRate, RateRecord};

/// In-process store with the same append-only semantics as Postgres.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    rows: RwLock<Vec<RateRecord>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn insert_batch(&self, as_of_date: NaiveDate, rates: &[NewRate]) -> Result<u64> {
        let mut rows = self.rows.write().await;
        let next_id = rows.last().map_or(1, |r| r.id + 1);

        rows.extend(rates.iter().zip(next_id..).map(|(rate, id)| RateRecord {
            id,
            title: rate.title.clone(),
            code: rate.code.clone(),
            value: rate.value,
            as_of_date,
        }));

        Ok(rates.len() as u64)
    }

    async fn query(&self, as_of_date: NaiveDate, code: Option<&str>) -> Result<Vec<RateRecord>> {
        let code = code_filter(code);
        let rows = self.rows.read().await;

        Ok(rows
            .iter()
            .filter(|r| r.as_of_date == as_of_date)
            .filter(|r| code.is_none_or(|c| r.code == c))
            .cloned()
            .collect())
    }
}
