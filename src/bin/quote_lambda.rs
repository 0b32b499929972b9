//! HTTP function serving drought cover quotes
//!
//! POST a JSON quote request, get back the historical payouts and premium.
//! The rainfall history is loaded once at cold start from
//! `RAINFALL_DATA_PATH`; product terms come from `PRODUCT_TERMS_PATH` when set.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use lambda_http::{run, service_fn, Body, Error, Request, Response};

use drought_cover::api::handle_quote;
use drought_cover::rainfall::load_rainfall_table;
use drought_cover::{PricingEngine, ProductTerms};

const DEFAULT_DATA_PATH: &str = "data/sample_rainfall.csv";

fn build_engine() -> anyhow::Result<PricingEngine> {
    let data_path = env::var("RAINFALL_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    let table = load_rainfall_table(&data_path)
        .with_context(|| format!("loading rainfall history from {}", data_path))?;

    let terms = match env::var("PRODUCT_TERMS_PATH") {
        Ok(path) => ProductTerms::from_json_file(&path)
            .with_context(|| format!("loading product terms from {}", path))?,
        Err(_) => ProductTerms::default(),
    };

    Ok(PricingEngine::with_terms(Arc::new(table), terms))
}

async fn function_handler(engine: &PricingEngine, event: Request) -> Result<Response<Body>, Error> {
    let response = handle_quote(engine, event.body().as_ref());
    let resp = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::from(response.body))?;
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let engine = build_engine()?;
    let engine = &engine;
    run(service_fn(move |event: Request| async move {
        function_handler(engine, event).await
    }))
    .await
}
