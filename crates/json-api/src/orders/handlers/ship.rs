//! Ship Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::*},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Dispatch request payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShipRequest {
    /// The carrier's tracking number for the shipment
    pub tracking_number: String,
}

/// Ship Order Handler
///
/// Marks a paid order as shipped with the carrier's tracking number.
/// Back-office only.
#[endpoint(tags("orders"), summary = "Ship Order")]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    body: JsonBody<ShipRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let shipped = state
        .app
        .orders
        .mark_shipped(order.into_inner(), &body.into_inner().tracking_number)
        .await
        .map_err(into_status_error)?;

    Ok(Json(shipped.into()))
}
