//! Promotions

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod resolver;
pub mod service;

pub use errors::PricingError;
pub use service::*;
