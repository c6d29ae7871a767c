//! Payment reconciliation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentsError {
    /// No order matches the notification's order id. The processor
    /// retries these, so callers surface it distinctly.
    #[error("order not found")]
    OrderNotFound,

    /// The signature does not match; the payload is not trusted and no
    /// state was changed.
    #[error("invalid notification signature")]
    SignatureInvalid,

    #[error("sql error: {0}")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for PaymentsError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::OrderNotFound,
            other => Self::Sql(other),
        }
    }
}
