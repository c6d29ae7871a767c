//! Catalog Models

use jiff::Timestamp;
use uuid::Uuid;

/// Weight assumed for a book whose catalog entry carries no weight.
pub const DEFAULT_BOOK_WEIGHT_GRAMS: u64 = 500;

/// Book Model
///
/// Owned by catalog management; read-only to the order pipeline apart
/// from the atomic stock decrement on confirmed payment.
#[derive(Debug, Clone)]
pub struct Book {
    pub uuid: Uuid,
    pub title: String,
    pub author: String,
    /// Face price in the smallest currency unit.
    pub price: u64,
    pub stock: u32,
    pub weight_grams: Option<u32>,
    /// Comma-separated category tags.
    pub tags: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Book {
    /// Shipping weight of a single copy, applying the catalog default
    /// when the entry carries none.
    #[must_use]
    pub fn unit_weight_grams(&self) -> u64 {
        self.weight_grams
            .map_or(DEFAULT_BOOK_WEIGHT_GRAMS, u64::from)
    }
}
