//! Promotion Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

/// One promotion-to-book link with its resolved active window.
///
/// The window bounds are materialised by the repository from the
/// promotion's date and optional time parts (missing start time means
/// 00:00:00, missing end time 23:59:59), interpreted in UTC. The window
/// is inclusive at both ends.
#[derive(Debug, Clone)]
pub struct PromoDiscount {
    pub promotion_uuid: Uuid,
    pub book_uuid: Uuid,
    pub name: String,
    /// Percentage off the face price. `None` or a non-positive value
    /// means the link grants no effective discount.
    pub discount_percent: Option<Decimal>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl PromoDiscount {
    /// Whether the promotion window contains `at`, inclusive at both
    /// ends.
    #[must_use]
    pub fn is_active_at(&self, at: Timestamp) -> bool {
        self.starts_at <= at && at <= self.ends_at
    }
}

/// The outcome of pricing one book at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    /// Price actually charged per unit, after any discount.
    pub unit_price: u64,
    /// Catalog price per unit.
    pub face_price: u64,
    /// Applied percentage, absent when no usable promotion was active.
    pub discount_percent: Option<Decimal>,
    /// Name of the applied promotion, absent when none applied.
    pub promo_name: Option<String>,
}

impl PriceQuote {
    /// A quote at face price with no promotion applied.
    #[must_use]
    pub fn face(face_price: u64) -> Self {
        Self {
            unit_price: face_price,
            face_price,
            discount_percent: None,
            promo_name: None,
        }
    }
}
