//! Shipping Models

use serde::{Deserialize, Serialize};

use crate::domain::orders::models::Courier;

/// One carrier-rate lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    /// Warehouse region identifier, fixed per deployment.
    pub origin_id: String,
    /// Destination region identifier chosen by the buyer.
    pub destination_id: String,
    pub weight_grams: u64,
    pub courier: Courier,
}

/// One service option quoted by the carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRate {
    /// Carrier service code, e.g. `"REG"` or `"YES"`.
    pub service: String,
    /// Cost in the smallest currency unit.
    pub cost: u64,
    /// Estimated time of delivery, free text as the carrier reports it.
    pub etd: String,
}
