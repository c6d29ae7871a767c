//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use pustaka_app::domain::payments::PaymentsError;

pub(crate) fn into_status_error(error: PaymentsError) -> StatusError {
    match error {
        // 404 tells the processor to retry later; the draft may not be
        // visible to it yet.
        PaymentsError::OrderNotFound => StatusError::not_found().brief("Unknown order"),
        PaymentsError::SignatureInvalid => {
            StatusError::bad_request().brief("Invalid notification signature")
        }
        PaymentsError::Sql(source) => {
            error!("failed to reconcile payment notification: {source}");

            StatusError::internal_server_error()
        }
    }
}
