//! halal-check adapters crate
//!
//! This crate contains infrastructure adapters around the domain:
//! - `open_food_facts`: product gateway backed by the Open Food Facts API
//! - `stub`: in-memory product gateway for tests and offline runs
//! - `http`: inbound axum server exposing the check endpoint

pub mod http;
pub mod open_food_facts;
pub mod stub;

/// Re-exports for product gateways
pub mod gateway {
    pub use crate::open_food_facts::{OpenFoodFactsConfig, OpenFoodFactsGateway};
    pub use crate::stub::StubProductGateway;
}
