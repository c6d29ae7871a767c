//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use pustaka_app::domain::checkout::CheckoutError;

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutError::InvalidInput(brief) => StatusError::bad_request().brief(brief),
        CheckoutError::InsufficientStock { book } => {
            StatusError::conflict().brief(format!("Insufficient stock for book {book}"))
        }
        CheckoutError::ShippingUnavailable(source) => {
            error!("shipping rate lookup failed: {source}");

            StatusError::bad_gateway().brief("Shipping rates are currently unavailable")
        }
        CheckoutError::Sql(source) => {
            error!("checkout failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
