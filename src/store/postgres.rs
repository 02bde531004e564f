use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sqlx::PgPool;

use super::{RateStore, code_filter};
use crate::error::Result;
use crate::rate_record::{NewRate, RateRecord};

const INSERT_RATE: &str =
    "INSERT INTO rate (title, code, value, as_of_date) VALUES ($1, $2, $3, $4)";
const SELECT_BY_DATE: &str =
    "SELECT id, title, code, value, as_of_date FROM rate WHERE as_of_date = $1";
const SELECT_BY_DATE_AND_CODE: &str =
    "SELECT id, title, code, value, as_of_date FROM rate WHERE as_of_date = $1 AND code = $2";

/// Postgres-backed store sharing one connection pool.
#[derive(Debug, Clone)]
pub struct PgRateStore {
    pool: PgPool,
}

impl PgRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateStore for PgRateStore {
    async fn insert_batch(&self, as_of_date: NaiveDate, rates: &[NewRate]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let mut inserted = 0;
        for rate in rates {
            // an error here drops `tx`, which rolls the batch back
            inserted += sqlx::query(INSERT_RATE)
                .bind(&rate.title)
                .bind(&rate.code)
                .bind(rate.value)
                .bind(as_of_date)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        debug!("Committed {} rates for {}", inserted, as_of_date);

        Ok(inserted)
    }

    async fn query(&self, as_of_date: NaiveDate, code: Option<&str>) -> Result<Vec<RateRecord>> {
        let records = match code_filter(code) {
            Some(code) => {
                sqlx::query_as::<_, RateRecord>(SELECT_BY_DATE_AND_CODE)
                    .bind(as_of_date)
                    .bind(code)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, RateRecord>(SELECT_BY_DATE)
                    .bind(as_of_date)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(records)
    }
}
