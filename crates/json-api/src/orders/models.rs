//! Order response models.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pustaka_app::domain::orders::models::{Order, OrderLine};

/// One captured order line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The unique identifier of the line
    pub uuid: Uuid,

    /// The book this line is for
    pub book_uuid: Uuid,

    /// Number of units ordered
    pub quantity: u32,

    /// The promo-resolved unit price captured at checkout
    pub unit_price: u64,
}

/// An order as exposed over the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Identifier the payment processor reports notifications under
    pub processor_order_id: String,

    /// Current lifecycle status
    pub status: String,

    /// Goods total plus shipping cost
    pub total_price: u64,

    /// Total shipment weight in grams
    pub total_weight_grams: u64,

    /// Free-form delivery address
    pub shipping_address: String,

    /// Courier code
    pub courier: String,

    /// Shipping cost in the smallest currency unit
    pub shipping_cost: u64,

    /// Carrier region code of the destination
    pub destination_id: String,

    /// Carrier tracking number, set on dispatch
    pub tracking_number: Option<String>,

    /// When the order was dispatched
    pub shipped_at: Option<String>,

    /// When the buyer confirmed delivery
    pub delivered_at: Option<String>,

    /// Captured lines; empty in list responses
    pub lines: Vec<OrderLineResponse>,

    /// When the order was created
    pub created_at: String,

    /// When the order was last updated
    pub updated_at: String,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            uuid: line.uuid,
            book_uuid: line.book_uuid,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid,
            processor_order_id: order.processor_order_id,
            status: order.status.as_str().to_string(),
            total_price: order.total_price,
            total_weight_grams: order.total_weight_grams,
            shipping_address: order.shipping_address,
            courier: order.courier.as_str().to_string(),
            shipping_cost: order.shipping_cost,
            destination_id: order.destination_id,
            tracking_number: order.tracking_number,
            shipped_at: order.shipped_at.as_ref().map(ToString::to_string),
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
