//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use pustaka_app::domain::orders::OrdersServiceError;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns one of the authenticated user's orders with its lines.
/// Orders belonging to other users are indistinguishable from missing
/// ones.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner())
        .await
        .map_err(into_status_error)?;

    if order.user_uuid != user {
        return Err(into_status_error(OrdersServiceError::NotFound));
    }

    Ok(Json(order.into()))
}
