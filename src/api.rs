//! JSON request handling for the quote endpoint
//!
//! Kept free of any HTTP runtime so the status mapping can be tested directly.

use log::{info, warn};
use serde::Serialize;

use crate::error::PricingError;
use crate::pricing::{PricingEngine, QuoteRequest};

/// Status code and JSON body to send back
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, "internal", e.to_string()),
        }
    }

    fn error(status: u16, kind: &str, message: String) -> Self {
        let body = serde_json::to_string(&ErrorBody { error: kind, message })
            .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, kind));
        Self { status, body }
    }
}

/// Price a JSON-encoded `QuoteRequest`
///
/// An empty body quotes the default request. Malformed JSON is a 400;
/// requests the pricing core rejects are a 422.
pub fn handle_quote(engine: &PricingEngine, body: &[u8]) -> ApiResponse {
    let request: QuoteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        QuoteRequest::default()
    } else {
        match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Malformed quote request: {}", e);
                return ApiResponse::error(400, "bad_request", e.to_string());
            }
        }
    };

    match engine.quote(&request) {
        Ok(quote) => {
            info!(
                "Quote days {}..{} area {}: premium {}",
                request.period_start, request.period_end, request.area, quote.premium
            );
            ApiResponse::json(200, &quote)
        }
        Err(e) => {
            let kind = match e {
                PricingError::InvalidParameter(_) => "invalid_parameter",
                PricingError::Range(_) => "range",
            };
            ApiResponse::error(422, kind, e.to_string())
        }
    }
}
