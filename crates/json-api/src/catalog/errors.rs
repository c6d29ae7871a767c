//! Pricing Errors

use salvo::http::StatusError;
use tracing::error;

use pustaka_app::domain::promotions::PricingError;

pub(crate) fn into_status_error(error: PricingError) -> StatusError {
    match error {
        PricingError::NotFound => StatusError::not_found().brief("Unknown book"),
        PricingError::Sql(source) => {
            error!("failed to quote price: {source}");

            StatusError::internal_server_error()
        }
    }
}
