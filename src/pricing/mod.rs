//! Pricing engine for quoting drought cover against rainfall history

mod request;
mod engine;
mod grid;

pub use request::QuoteRequest;
pub use engine::{PricingEngine, Quote};
pub use grid::{GridCell, ThresholdRange};
