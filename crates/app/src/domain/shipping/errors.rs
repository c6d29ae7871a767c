//! Shipping client errors.

use thiserror::Error;

/// Errors from the carrier-rate API.
///
/// All of these fail a checkout closed: a timeout or an empty result is
/// never treated as a zero-cost success.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Transport failure, including the bounded request timeout.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The carrier answered with a non-2xx status or a body that does
    /// not match the documented shape.
    #[error("unexpected response from rate API: {0}")]
    UnexpectedResponse(String),

    /// The carrier answered 2xx but quoted no services for the route.
    #[error("no services available for the requested route")]
    NoServices,
}
