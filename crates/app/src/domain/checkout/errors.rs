//! Checkout errors.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::shipping::ShippingError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The user's cart holds no items; there is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required input field is missing or malformed.
    #[error("invalid checkout input: {0}")]
    InvalidInput(String),

    /// A cart line asks for more units than the book has in stock.
    #[error("insufficient stock for book {book}")]
    InsufficientStock { book: Uuid },

    /// The carrier-rate lookup failed; no order draft is created.
    #[error("shipping rate unavailable")]
    ShippingUnavailable(#[source] ShippingError),

    #[error("sql error: {0}")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
