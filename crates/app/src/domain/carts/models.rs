//! Cart Models

use jiff::Timestamp;
use uuid::Uuid;

/// CartItem Model
///
/// A snapshot of one cart line as read at checkout time. The cart itself
/// is owned by the cart collaborator; the pipeline only reads lines and
/// deletes the rows it snapshotted once the order is persisted.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: Uuid,
    pub book_uuid: Uuid,
    pub quantity: u32,
    pub created_at: Timestamp,
}
