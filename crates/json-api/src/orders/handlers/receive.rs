//! Receive Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Receive Order Handler
///
/// Lets the owning user confirm a shipped order arrived.
#[endpoint(tags("orders"), summary = "Confirm Order Received")]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let delivered = state
        .app
        .orders
        .confirm_received(order.into_inner(), user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(delivered.into()))
}
