//! Checkout Service
//!
//! Turns a user's cart into an order draft: snapshots the cart, prices
//! every line against the promotions active right now, quotes shipping,
//! then writes the order and clears the snapshotted cart rows in a
//! single transaction. Stock is not reserved here; it is only consumed
//! when the payment settles.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::repository::PgCartsRepository,
        catalog::{models::Book, repository::PgBooksRepository},
        checkout::errors::CheckoutError,
        orders::{
            models::{Courier, NewOrder, NewOrderLine, Order, OrderLine},
            repository::PgOrdersRepository,
        },
        promotions::{models::PromoDiscount, repository::PgPromotionsRepository, resolver},
        shipping::{
            ShippingRateClient,
            models::{RateRequest, ServiceRate},
        },
    },
};

/// Checkout input supplied by the buyer.
#[derive(Debug, Clone)]
pub struct NewCheckout {
    pub shipping_address: String,
    /// Carrier region code for the delivery destination.
    pub destination_id: String,
    pub courier: Courier,
}

#[derive(Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartsRepository,
    books: PgBooksRepository,
    promotions: PgPromotionsRepository,
    orders: PgOrdersRepository,
    shipping: Arc<dyn ShippingRateClient>,
    /// Warehouse region code used as the origin of every shipment.
    origin_id: String,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, shipping: Arc<dyn ShippingRateClient>, origin_id: String) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            books: PgBooksRepository::new(),
            promotions: PgPromotionsRepository::new(),
            orders: PgOrdersRepository::new(),
            shipping,
            origin_id,
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, draft),
        fields(user_uuid = %user, courier = draft.courier.as_str()),
        err
    )]
    async fn checkout(&self, user: Uuid, draft: NewCheckout) -> Result<Order, CheckoutError> {
        if draft.shipping_address.trim().is_empty() {
            return Err(CheckoutError::InvalidInput(
                "shipping address must not be empty".to_string(),
            ));
        }

        if draft.destination_id.trim().is_empty() {
            return Err(CheckoutError::InvalidInput(
                "destination must not be empty".to_string(),
            ));
        }

        // Read snapshot: cart, books, and promotion links in one
        // transaction so the lines are priced against a consistent view.
        let mut tx = self.db.begin().await?;

        let cart_items = self.carts.get_cart_items(&mut tx, user).await?;

        if cart_items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let book_uuids: Vec<Uuid> = cart_items.iter().map(|item| item.book_uuid).collect();

        let books = self.books.get_books(&mut tx, &book_uuids).await?;
        let discounts = self.promotions.get_book_discounts(&mut tx, &book_uuids).await?;

        tx.commit().await?;

        let books: FxHashMap<Uuid, Book> =
            books.into_iter().map(|book| (book.uuid, book)).collect();

        let mut discounts_by_book: FxHashMap<Uuid, Vec<PromoDiscount>> = FxHashMap::default();

        for discount in discounts {
            discounts_by_book
                .entry(discount.book_uuid)
                .or_default()
                .push(discount);
        }

        // Price the snapshot at one explicit instant so every line sees
        // the same promotion window.
        let at = Timestamp::now();

        let mut goods_total: u64 = 0;
        let mut total_weight_grams: u64 = 0;
        let mut lines = Vec::with_capacity(cart_items.len());

        for item in &cart_items {
            let book = books
                .get(&item.book_uuid)
                .ok_or(sqlx::Error::RowNotFound)?;

            if item.quantity > book.stock {
                return Err(CheckoutError::InsufficientStock { book: book.uuid });
            }

            let book_discounts = discounts_by_book
                .get(&book.uuid)
                .map_or(&[][..], Vec::as_slice);

            let quote = resolver::resolve(book.price, book_discounts, at);

            goods_total += quote.unit_price * u64::from(item.quantity);
            total_weight_grams += u64::from(book.unit_weight_grams()) * u64::from(item.quantity);

            lines.push(NewOrderLine {
                uuid: Uuid::now_v7(),
                book_uuid: book.uuid,
                quantity: item.quantity,
                unit_price: quote.unit_price,
            });
        }

        // The rate lookup happens outside any transaction; a failure
        // here leaves the cart exactly as it was.
        let rate = self
            .quote_shipping(&draft, total_weight_grams)
            .await
            .map_err(CheckoutError::ShippingUnavailable)?;

        let order_uuid = Uuid::now_v7();

        let new_order = NewOrder {
            uuid: order_uuid,
            user_uuid: user,
            processor_order_id: format!("ORD-{order_uuid}"),
            total_price: goods_total + rate.cost,
            total_weight_grams,
            shipping_address: draft.shipping_address,
            courier: draft.courier,
            shipping_cost: rate.cost,
            destination_id: draft.destination_id,
        };

        // Write transaction: order, lines, and cart cleanup commit or
        // roll back together.
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.insert_order(&mut tx, new_order).await?;

        let mut inserted_lines: Vec<OrderLine> = Vec::with_capacity(lines.len());

        for line in lines {
            let inserted = self.orders.insert_order_line(&mut tx, order_uuid, line).await?;

            inserted_lines.push(inserted);
        }

        let snapshot_uuids: Vec<Uuid> = cart_items.iter().map(|item| item.uuid).collect();

        self.carts
            .delete_cart_items(&mut tx, user, &snapshot_uuids)
            .await?;

        tx.commit().await?;

        order.lines = inserted_lines;

        info!(
            order_uuid = %order.uuid,
            total_price = order.total_price,
            "checkout draft created"
        );

        Ok(order)
    }
}

impl PgCheckoutService {
    /// Quote shipping for the draft and pick the cheapest service.
    async fn quote_shipping(
        &self,
        draft: &NewCheckout,
        weight_grams: u64,
    ) -> Result<ServiceRate, crate::domain::shipping::ShippingError> {
        let rates = self
            .shipping
            .rates(RateRequest {
                origin_id: self.origin_id.clone(),
                destination_id: draft.destination_id.clone(),
                weight_grams,
                courier: draft.courier,
            })
            .await?;

        rates
            .into_iter()
            .min_by_key(|rate| rate.cost)
            .ok_or(crate::domain::shipping::ShippingError::NoServices)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Build an order draft from the user's cart.
    ///
    /// On success the snapshotted cart rows are gone and the returned
    /// order is in `prepared`, waiting for the payment processor.
    async fn checkout(&self, user: Uuid, draft: NewCheckout) -> Result<Order, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            orders::status::OrderStatus,
            shipping::{MockShippingRateClient, ShippingError, models::ServiceRate},
        },
        test::TestContext,
    };

    use super::*;

    fn draft() -> NewCheckout {
        NewCheckout {
            shipping_address: "Jl. Merdeka 17, Bandung".to_string(),
            destination_id: "23".to_string(),
            courier: Courier::Jne,
        }
    }

    #[tokio::test]
    async fn checkout_totals_cover_goods_and_shipping() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let novel = ctx.create_book("Laskar Pelangi", 10_000, 10, Some(400)).await;
        let tetralogy = ctx.create_book("Bumi Manusia", 18_000, 10, None).await;

        ctx.add_cart_item(user, novel, 2).await;
        ctx.add_cart_item(user, tetralogy, 1).await;

        let order = ctx.checkout.checkout(user, draft()).await?;

        // 2 x 10_000 + 1 x 18_000 goods, plus 5_000 shipping.
        assert_eq!(order.total_price, 43_000);
        assert_eq!(order.shipping_cost, 5_000);
        assert_eq!(order.status, OrderStatus::Prepared);
        assert_eq!(order.lines.len(), 2);
        // 2 x 400g plus 1 x 500g default weight.
        assert_eq!(order.total_weight_grams, 1_300);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_clears_only_the_snapshotted_cart_rows() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let book = ctx.create_book("Pulang", 15_000, 10, None).await;
        ctx.add_cart_item(user, book, 1).await;

        ctx.checkout.checkout(user, draft()).await?;

        assert_eq!(ctx.cart_item_count(user).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.checkout.checkout(Uuid::now_v7(), draft()).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn checkout_rejects_blank_shipping_address() {
        let ctx = TestContext::new().await;

        let mut input = draft();
        input.shipping_address = "   ".to_string();

        let result = ctx.checkout.checkout(Uuid::now_v7(), input).await;

        assert!(
            matches!(result, Err(CheckoutError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );
    }

    #[tokio::test]
    async fn checkout_fails_when_a_line_exceeds_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let book = ctx.create_book("Cantik Itu Luka", 12_000, 1, None).await;
        ctx.add_cart_item(user, book, 3).await;

        let result = ctx.checkout.checkout(user, draft()).await;

        assert!(
            matches!(result, Err(CheckoutError::InsufficientStock { book: b }) if b == book),
            "expected InsufficientStock, got {result:?}"
        );

        // Nothing was written: the cart survives and no order exists.
        assert_eq!(ctx.cart_item_count(user).await, 1);
        assert_eq!(ctx.order_count(user).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_does_not_touch_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let book = ctx.create_book("Perahu Kertas", 9_000, 7, None).await;
        ctx.add_cart_item(user, book, 2).await;

        ctx.checkout.checkout(user, draft()).await?;

        assert_eq!(ctx.book_stock(book).await, 7);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_applies_active_promotions_to_line_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let book = ctx.create_book("Bumi Manusia", 20_000, 10, None).await;
        ctx.create_promotion("Kemerdekaan", book, Some(rust_decimal::Decimal::from(10)), -1, 1)
            .await;
        ctx.add_cart_item(user, book, 1).await;

        let order = ctx.checkout.checkout(user, draft()).await?;

        assert_eq!(order.lines[0].unit_price, 18_000);
        assert_eq!(order.total_price, 18_000 + 5_000);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_fails_closed_when_shipping_is_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let book = ctx.create_book("Supernova", 11_000, 5, None).await;
        ctx.add_cart_item(user, book, 1).await;

        let mut shipping = MockShippingRateClient::new();
        shipping
            .expect_rates()
            .returning(|_| Err(ShippingError::NoServices));

        let checkout = ctx.checkout_with(Arc::new(shipping));

        let result = checkout.checkout(user, draft()).await;

        assert!(
            matches!(result, Err(CheckoutError::ShippingUnavailable(_))),
            "expected ShippingUnavailable, got {result:?}"
        );

        // The cart is untouched and no order draft leaked out.
        assert_eq!(ctx.cart_item_count(user).await, 1);
        assert_eq!(ctx.order_count(user).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_picks_the_cheapest_quoted_service() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let book = ctx.create_book("Negeri 5 Menara", 14_000, 5, None).await;
        ctx.add_cart_item(user, book, 1).await;

        let mut shipping = MockShippingRateClient::new();
        shipping.expect_rates().returning(|_| {
            Ok(vec![
                ServiceRate {
                    service: "YES".to_string(),
                    cost: 18_000,
                    etd: "1".to_string(),
                },
                ServiceRate {
                    service: "REG".to_string(),
                    cost: 9_000,
                    etd: "2-3".to_string(),
                },
            ])
        });

        let checkout = ctx.checkout_with(Arc::new(shipping));

        let order = checkout.checkout(user, draft()).await?;

        assert_eq!(order.shipping_cost, 9_000);
        assert_eq!(order.total_price, 14_000 + 9_000);

        Ok(())
    }
}
