//! Order lifecycle state machine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of an order.
///
/// An order is born `Prepared` at checkout. Payment notifications move
/// it through `Processing` into one of the settlement outcomes; the two
/// manual transitions take a `Paid` order through `Shipped` to
/// `Delivered`. `Held` (fraud challenge) is a dead end for automated
/// transitions and needs manual follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Prepared,
    Processing,
    Paid,
    Held,
    Rejected,
    Canceled,
    Expired,
    Shipped,
    Delivered,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatus(String);

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prepared => "prepared",
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Held => "held",
            Self::Rejected => "rejected",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }

    /// Whether moving from `self` to `to` is a legal transition.
    ///
    /// A same-status move is not a transition; callers treat it as a
    /// no-op rather than an error.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        use OrderStatus::{
            Canceled, Delivered, Expired, Held, Paid, Prepared, Processing, Rejected, Shipped,
        };

        match self {
            Prepared => matches!(to, Processing | Paid | Held | Rejected | Canceled | Expired),
            Processing => matches!(to, Paid | Held | Rejected | Canceled | Expired),
            Paid => matches!(to, Shipped),
            Shipped => matches!(to, Delivered),
            Held | Rejected | Canceled | Expired | Delivered => false,
        }
    }

    /// Whether no further transition can ever leave this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Canceled | Self::Expired | Self::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "prepared" => Ok(Self::Prepared),
            "processing" => Ok(Self::Processing),
            "paid" => Ok(Self::Paid),
            "held" => Ok(Self::Held),
            "rejected" => Ok(Self::Rejected),
            "canceled" => Ok(Self::Canceled),
            "expired" => Ok(Self::Expired),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
