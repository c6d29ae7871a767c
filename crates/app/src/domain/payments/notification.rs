//! Processor notification payload and status mapping.

use serde::Deserialize;

use crate::domain::orders::status::OrderStatus;

/// Webhook payload the payment processor posts after a payment event.
///
/// Field names follow the processor's wire format; `gross_amount` is a
/// decimal string such as `"43000.00"` and is only used for signature
/// verification, never parsed as money.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentNotification {
    /// The order identifier the draft was registered under.
    pub order_id: String,
    pub transaction_status: String,
    /// Absent for processors without a fraud pipeline; treated as
    /// `accept` when missing.
    #[serde(default)]
    pub fraud_status: Option<String>,
    pub status_code: String,
    pub gross_amount: String,
    pub signature_key: String,
}

/// Map a processor transaction status to the order status it implies.
///
/// `None` means the status is unknown or carries no order-side effect;
/// callers acknowledge the notification and change nothing.
#[must_use]
pub fn map_status(transaction_status: &str, fraud_status: Option<&str>) -> Option<OrderStatus> {
    match transaction_status {
        "capture" | "settlement" => match fraud_status.unwrap_or("accept") {
            "accept" => Some(OrderStatus::Paid),
            // Flagged for manual review; the order parks until an
            // operator resolves it.
            "challenge" => Some(OrderStatus::Held),
            _ => None,
        },
        "pending" => Some(OrderStatus::Processing),
        "deny" => Some(OrderStatus::Rejected),
        "cancel" => Some(OrderStatus::Canceled),
        "expire" => Some(OrderStatus::Expired),
        _ => None,
    }
}
