use std::sync::Arc;

use log::error;

use crate::date_codec;
use crate::error::Result;
use crate::rate_record::RateRecord;
use crate::store::RateStore;

pub struct QueryService {
    store: Arc<dyn RateStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Stored rates for a `DD.MM.YYYY` date, optionally narrowed to one code.
    /// No matches is an empty list, not an error.
    pub async fn get_for_date(
        &self,
        external_date: &str,
        code: Option<&str>,
    ) -> Result<Vec<RateRecord>> {
        let as_of_date = date_codec::parse(external_date)?;

        self.store
            .query(as_of_date, code)
            .await
            .inspect_err(|e| error!("Can't query rates for {}: {}", as_of_date, e))
    }
}
