use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RateError>;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Invalid date format: {0:?}, expected DD.MM.YYYY")]
    InvalidDateFormat(String),

    #[error("Rate feed unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    #[error("Can't parse value {raw:?} for currency {code}")]
    RecordValueUnparsable { code: String, raw: String },

    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] sqlx::Error),
}

/// Reasons a feed download is unusable. Any of them discards the whole fetch.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("can't download the feed: {0}")]
    Status(reqwest::StatusCode),

    #[error("can't decode the feed: {0}")]
    Decode(#[from] quick_xml::DeError),
}

impl ResponseError for RateError {
    fn status_code(&self) -> StatusCode {
        match self {
            RateError::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RateError::InvalidDateFormat(_) => "Invalid date format",
            _ => "Internal Server Error",
        };
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}
