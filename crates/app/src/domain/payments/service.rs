//! Payments Service
//!
//! Reconciles processor webhook notifications against orders. The
//! order row is locked for the duration of the update so duplicate and
//! out-of-order deliveries serialise; stock is consumed exactly once,
//! on the first entry into `paid`, in the same transaction as the
//! status write.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::{
    database::Db,
    domain::{
        catalog::repository::PgBooksRepository,
        orders::{repository::PgOrdersRepository, status::OrderStatus},
        payments::{
            errors::PaymentsError,
            notification::{PaymentNotification, map_status},
            signature,
        },
    },
};

pub struct PgPaymentsService {
    db: Db,
    orders: PgOrdersRepository,
    books: PgBooksRepository,
    /// Shared secret the processor signs notifications with.
    server_key: Zeroizing<String>,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, server_key: String) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            books: PgBooksRepository::new(),
            server_key: Zeroizing::new(server_key),
        }
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    #[tracing::instrument(
        name = "payments.service.handle_notification",
        skip(self, notification),
        fields(
            order_id = %notification.order_id,
            transaction_status = %notification.transaction_status,
        ),
        err
    )]
    async fn handle_notification(
        &self,
        notification: PaymentNotification,
    ) -> Result<(), PaymentsError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .get_order_by_processor_id_for_update(&mut tx, &notification.order_id)
            .await?;

        let expected = signature::expected_signature(
            &notification.order_id,
            &notification.status_code,
            &notification.gross_amount,
            &self.server_key,
        );

        if !signature::verify_signature(&notification.signature_key, &expected) {
            return Err(PaymentsError::SignatureInvalid);
        }

        let Some(next) = map_status(
            &notification.transaction_status,
            notification.fraud_status.as_deref(),
        ) else {
            warn!(
                transaction_status = %notification.transaction_status,
                "ignoring notification with unmapped transaction status"
            );

            tx.commit().await?;

            return Ok(());
        };

        // Redelivery of the status the order is already in.
        if next == order.status {
            tx.commit().await?;

            return Ok(());
        }

        if !order.status.can_transition(next) {
            warn!(
                order_uuid = %order.uuid,
                from = order.status.as_str(),
                to = next.as_str(),
                "ignoring notification implying an illegal transition"
            );

            tx.commit().await?;

            return Ok(());
        }

        if next == OrderStatus::Paid {
            let lines = self.orders.get_order_lines(&mut tx, order.uuid).await?;

            for line in &lines {
                self.books
                    .decrement_stock(&mut tx, line.book_uuid, line.quantity)
                    .await?;
            }
        }

        self.orders.update_status(&mut tx, order.uuid, next).await?;

        tx.commit().await?;

        info!(
            order_uuid = %order.uuid,
            from = order.status.as_str(),
            to = next.as_str(),
            "order status reconciled"
        );

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Apply one processor notification.
    ///
    /// `Ok(())` means the notification was consumed and must be
    /// acknowledged, including the no-op cases; errors mean it must
    /// not be.
    async fn handle_notification(
        &self,
        notification: PaymentNotification,
    ) -> Result<(), PaymentsError>;
}
