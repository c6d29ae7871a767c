//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use pustaka_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::InvalidTransition => {
            StatusError::conflict().brief("Order is not in a state that allows this transition")
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Order belongs to another user")
        }
        OrdersServiceError::MissingTrackingNumber => {
            StatusError::bad_request().brief("Tracking number is required")
        }
        OrdersServiceError::Sql(source) => {
            error!("order operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
