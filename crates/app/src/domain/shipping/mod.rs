//! Shipping

pub mod client;
pub mod errors;
pub mod models;

pub use client::*;
pub use errors::ShippingError;
