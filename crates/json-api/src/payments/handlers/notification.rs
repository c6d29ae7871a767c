//! Payment Notification Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pustaka_app::domain::payments::PaymentNotification;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Webhook payload posted by the payment processor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationRequest {
    /// The order identifier the draft was registered under
    pub order_id: String,

    /// Processor transaction status
    pub transaction_status: String,

    /// Processor fraud verdict; absent means accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_status: Option<String>,

    /// Processor status code
    pub status_code: String,

    /// Gross amount as a decimal string
    pub gross_amount: String,

    /// SHA-512 signature over the payload and server key
    pub signature_key: String,
}

/// Acknowledgement returned to the processor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    /// Always "OK" when the notification was consumed
    pub status: String,
}

impl From<NotificationRequest> for PaymentNotification {
    fn from(request: NotificationRequest) -> Self {
        Self {
            order_id: request.order_id,
            transaction_status: request.transaction_status,
            fraud_status: request.fraud_status,
            status_code: request.status_code,
            gross_amount: request.gross_amount,
            signature_key: request.signature_key,
        }
    }
}

/// Payment Notification Handler
///
/// Reconciles a processor webhook against the order it refers to. The
/// processor retries non-2xx responses, so no-op notifications are
/// still acknowledged with 200.
#[endpoint(tags("payments"), summary = "Payment Notification Webhook")]
pub(crate) async fn handler(
    body: JsonBody<NotificationRequest>,
    depot: &mut Depot,
) -> Result<Json<NotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .payments
        .handle_notification(body.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationResponse {
        status: "OK".to_string(),
    }))
}
