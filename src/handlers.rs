use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::error::RateError;
use crate::ingestion::IngestionPipeline;
use crate::query::QueryService;

#[derive(Debug, Serialize)]
struct SaveResponse {
    success: bool,
}

/// Registers the routes. `save_rates` has to come first so that
/// `/currency/save/...` is not read as a `{date}/{code}` pair.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(save_rates)
        .service(get_rates_for_code)
        .service(get_rates);
}

#[get("/currency/save/{date}")]
async fn save_rates(
    pipeline: web::Data<IngestionPipeline>,
    date: web::Path<String>,
) -> Result<HttpResponse, RateError> {
    let ingestion = pipeline.save_for_date(&date)?;
    // detached: the response never waits for the feed
    drop(ingestion);

    Ok(HttpResponse::Ok().json(SaveResponse { success: true }))
}

#[get("/currency/{date}/{code}")]
async fn get_rates_for_code(
    service: web::Data<QueryService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, RateError> {
    let (date, code) = path.into_inner();
    let records = service.get_for_date(&date, Some(&code)).await?;

    Ok(HttpResponse::Ok().json(records))
}

#[get("/currency/{date}")]
async fn get_rates(
    service: web::Data<QueryService>,
    date: web::Path<String>,
) -> Result<HttpResponse, RateError> {
    let records = service.get_for_date(&date, None).await?;

    Ok(HttpResponse::Ok().json(records))
}
