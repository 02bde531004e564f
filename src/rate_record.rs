use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub value: f64,
    pub as_of_date: NaiveDate,
}

/// A validated feed item waiting for an id from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRate {
    pub title: String,
    pub code: String,
    pub value: f64,
}
