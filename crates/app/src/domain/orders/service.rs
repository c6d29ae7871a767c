//! Orders Service
//!
//! Read surface for the user-facing transaction list plus the two
//! manual lifecycle transitions: shipment dispatch and delivery
//! confirmation. Both transitions are single conditional updates so
//! concurrent attempts cannot double-fire.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError, models::Order, repository::PgOrdersRepository,
        status::OrderStatus,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(&self, order: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.orders.get_order(&mut tx, order).await?;
        let lines = self.orders.get_order_lines(&mut tx, order).await?;

        tx.commit().await?;

        record.lines = lines;

        Ok(record)
    }

    async fn list_orders(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.mark_shipped",
        skip(self, tracking_number),
        fields(order_uuid = %order),
        err
    )]
    async fn mark_shipped(
        &self,
        order: Uuid,
        tracking_number: &str,
    ) -> Result<Order, OrdersServiceError> {
        if tracking_number.trim().is_empty() {
            return Err(OrdersServiceError::MissingTrackingNumber);
        }

        let mut tx = self.db.begin().await?;

        let shipped = match self.orders.mark_shipped(&mut tx, order, tracking_number).await {
            Ok(shipped) => shipped,
            Err(sqlx::Error::RowNotFound) => {
                // Distinguish a missing order from one in the wrong state.
                self.orders.get_order(&mut tx, order).await?;

                return Err(OrdersServiceError::InvalidTransition);
            }
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        info!(order_uuid = %order, "order shipped");

        Ok(shipped)
    }

    #[tracing::instrument(
        name = "orders.service.confirm_received",
        skip(self),
        fields(order_uuid = %order, user_uuid = %user),
        err
    )]
    async fn confirm_received(&self, order: Uuid, user: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.orders.get_order(&mut tx, order).await?;

        if record.user_uuid != user {
            return Err(OrdersServiceError::Forbidden);
        }

        let delivered = match self.orders.confirm_received(&mut tx, order).await {
            Ok(delivered) => delivered,
            Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::InvalidTransition),
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        info!(order_uuid = %order, "order delivery confirmed");

        Ok(delivered)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve a single order with its lines.
    async fn get_order(&self, order: Uuid) -> Result<Order, OrdersServiceError>;

    /// List a user's orders, newest first. Lines are not attached.
    async fn list_orders(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Dispatch a paid order with the carrier's tracking number.
    async fn mark_shipped(
        &self,
        order: Uuid,
        tracking_number: &str,
    ) -> Result<Order, OrdersServiceError>;

    /// Let the owning user confirm a shipped order arrived.
    async fn confirm_received(&self, order: Uuid, user: Uuid) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn mark_shipped_from_paid_stamps_tracking_details() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();
        let order = ctx.seed_order(user, OrderStatus::Paid).await;

        let shipped = ctx.orders.mark_shipped(order, "JNE-0012345").await?;

        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(shipped.tracking_number.as_deref(), Some("JNE-0012345"));
        assert!(shipped.shipped_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn mark_shipped_from_prepared_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.seed_order(Uuid::now_v7(), OrderStatus::Prepared).await;

        let result = ctx.orders.mark_shipped(order, "JNE-0012345").await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidTransition)),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mark_shipped_requires_tracking_number() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.seed_order(Uuid::now_v7(), OrderStatus::Paid).await;

        let result = ctx.orders.mark_shipped(order, "   ").await;

        assert!(
            matches!(result, Err(OrdersServiceError::MissingTrackingNumber)),
            "expected MissingTrackingNumber, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mark_shipped_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.mark_shipped(Uuid::now_v7(), "JNE-1").await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn confirm_received_by_owner_from_shipped() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();
        let order = ctx.seed_order(user, OrderStatus::Shipped).await;

        let delivered = ctx.orders.confirm_received(order, user).await?;

        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert!(delivered.delivered_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn confirm_received_by_non_owner_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.seed_order(Uuid::now_v7(), OrderStatus::Shipped).await;

        let result = ctx.orders.confirm_received(order, Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn confirm_received_from_prepared_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();
        let order = ctx.seed_order(user, OrderStatus::Prepared).await;

        let result = ctx.orders.confirm_received(order, user).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidTransition)),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_is_scoped_to_the_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        ctx.seed_order(user, OrderStatus::Prepared).await;
        ctx.seed_order(user, OrderStatus::Paid).await;
        ctx.seed_order(Uuid::now_v7(), OrderStatus::Paid).await;

        let orders = ctx.orders.list_orders(user).await?;

        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|order| order.user_uuid == user));

        Ok(())
    }
}
