//! Order Models

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::orders::status::OrderStatus;

/// Couriers the store can dispatch through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Courier {
    Jne,
    Tiki,
    Pos,
    Sicepat,
    Jnt,
}

/// Error returned when parsing a courier outside the allow-list.
#[derive(Debug, Error)]
#[error("unsupported courier {0:?}")]
pub struct UnsupportedCourier(String);

impl Courier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jne => "jne",
            Self::Tiki => "tiki",
            Self::Pos => "pos",
            Self::Sicepat => "sicepat",
            Self::Jnt => "jnt",
        }
    }
}

impl FromStr for Courier {
    type Err = UnsupportedCourier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "jne" => Ok(Self::Jne),
            "tiki" => Ok(Self::Tiki),
            "pos" => Ok(Self::Pos),
            "sicepat" => Ok(Self::Sicepat),
            "jnt" => Ok(Self::Jnt),
            other => Err(UnsupportedCourier(other.to_string())),
        }
    }
}

/// Order Model
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    /// Identifier the payment processor reports notifications under.
    pub processor_order_id: String,
    pub status: OrderStatus,
    /// Discounted goods total plus shipping cost.
    pub total_price: u64,
    pub total_weight_grams: u64,
    pub shipping_address: String,
    pub courier: Courier,
    pub shipping_cost: u64,
    pub destination_id: String,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub lines: Vec<OrderLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// OrderLine Model
///
/// Immutable once written; `unit_price` is the promo-resolved price
/// captured at checkout and is never recomputed.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub uuid: Uuid,
    pub book_uuid: Uuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub created_at: Timestamp,
}

/// New Order Model
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub processor_order_id: String,
    pub total_price: u64,
    pub total_weight_grams: u64,
    pub shipping_address: String,
    pub courier: Courier,
    pub shipping_cost: u64,
    pub destination_id: String,
}

/// New OrderLine Model
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub uuid: Uuid,
    pub book_uuid: Uuid,
    pub quantity: u32,
    pub unit_price: u64,
}
