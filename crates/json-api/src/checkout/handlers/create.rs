//! Create Checkout Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pustaka_app::domain::{checkout::NewCheckout, orders::models::Courier};

use crate::{
    checkout::errors::into_status_error, extensions::*, orders::models::OrderResponse,
    state::State,
};

/// Checkout request payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Free-form delivery address
    pub shipping_address: String,

    /// Carrier region code of the destination
    pub destination_id: String,

    /// Courier code (jne, tiki, pos, sicepat, jnt)
    pub courier: String,
}

/// Create Checkout Handler
///
/// Turns the authenticated user's cart into an order draft awaiting
/// payment. The priced order is returned with its captured lines.
#[endpoint(
    tags("checkout"),
    summary = "Checkout Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Order draft created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Shipping rates unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    body: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let request = body.into_inner();

    let courier = Courier::from_str(&request.courier).or_400("Unsupported courier")?;

    let order = state
        .app
        .checkout
        .checkout(
            user,
            NewCheckout {
                shipping_address: request.shipping_address,
                destination_id: request.destination_id,
                courier,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
