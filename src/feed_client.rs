use std::time::Duration;

use log::debug;
use reqwest::Client;

use crate::error::{FeedError, Result};
use crate::rates_xml::{self, Item};

pub const DEFAULT_FEED_URL: &str = "https://nationalbank.kz/rss/get_rates.cfm";

/// Downloads the National Bank daily rates feed.
#[derive(Debug, Clone)]
pub struct RateFeedClient {
    client: Client,
    base_url: String,
}

impl RateFeedClient {
    /// Without `timeout` the transport default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FeedError::from)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('?').to_owned(),
        })
    }

    /// `external_date` goes to the feed as is (`DD.MM.YYYY`).
    pub async fn fetch(&self, external_date: &str) -> Result<Vec<Item>> {
        let url = self.url(external_date);
        let text = self.load_xml(&url).await?;
        let rates = rates_xml::parse(&text).map_err(FeedError::from)?;
        debug!(
            "Feed for {} returned {} items",
            external_date,
            rates.items.len()
        );

        Ok(rates.items)
    }

    async fn load_xml(&self, url: &str) -> std::result::Result<String, FeedError> {
        debug!("Requesting rates from {}", url);
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status()));
        }

        Ok(resp.text().await?)
    }

    fn url(&self, external_date: &str) -> String {
        format!("{}?fdate={}", self.base_url, external_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RateError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED_PATH: &str = "/rss/get_rates.cfm";

    async fn feed_server(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FEED_PATH))
            .and(query_param("fdate", "01.01.2024"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn client_for(server: &MockServer) -> RateFeedClient {
        RateFeedClient::new(&format!("{}{}", server.uri(), FEED_PATH), None).unwrap()
    }

    #[tokio::test]
    async fn fetches_items_with_external_date() {
        let server = feed_server(
            200,
            "<rates><item><fullname>US Dollar</fullname><title>USD</title>\
             <description>450.5</description></item>\
             <item><fullname>Ruble</fullname><title>RUB</title>\
             <description>n/a</description></item></rates>",
        )
        .await;

        let items = client_for(&server).fetch("01.01.2024").await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].full_name, "US Dollar");
        assert_eq!(items[0].short_code, "USD");
        assert_eq!(items[0].raw_value, "450.5");
        // value text is not validated here
        assert_eq!(items[1].raw_value, "n/a");
    }

    #[tokio::test]
    async fn server_error_is_feed_unavailable() {
        let server = feed_server(503, "down").await;

        let err = client_for(&server).fetch("01.01.2024").await.unwrap_err();

        assert!(matches!(
            err,
            RateError::FeedUnavailable(FeedError::Status(status)) if status.as_u16() == 503
        ));
    }

    #[tokio::test]
    async fn undecodable_body_is_feed_unavailable() {
        let server = feed_server(200, "<html><body>maintenance").await;

        let err = client_for(&server).fetch("01.01.2024").await.unwrap_err();

        assert!(matches!(
            err,
            RateError::FeedUnavailable(FeedError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn connection_refused_is_feed_unavailable() {
        let client = RateFeedClient::new("http://127.0.0.1:1/rss", None).unwrap();

        let err = client.fetch("01.01.2024").await.unwrap_err();

        assert!(matches!(
            err,
            RateError::FeedUnavailable(FeedError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn honours_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<rates></rates>")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        let client = RateFeedClient::new(&server.uri(), Some(Duration::from_millis(100))).unwrap();

        let err = client.fetch("01.01.2024").await.unwrap_err();

        assert!(matches!(
            err,
            RateError::FeedUnavailable(FeedError::Transport(_))
        ));
    }
}
