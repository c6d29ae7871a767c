//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use pustaka_app::{
    context::AppContext,
    domain::{
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService, OrderStatus,
            models::{Courier, Order, OrderLine},
        },
        payments::MockPaymentsService,
        promotions::MockPricingService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: Uuid = Uuid::nil();

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_order(user: Uuid, status: OrderStatus) -> Order {
    let uuid = Uuid::now_v7();

    Order {
        uuid,
        user_uuid: user,
        processor_order_id: format!("ORD-{uuid}"),
        status,
        total_price: 43_000,
        total_weight_grams: 1_300,
        shipping_address: "Jl. Merdeka 17, Bandung".to_string(),
        courier: Courier::Jne,
        shipping_cost: 5_000,
        destination_id: "23".to_string(),
        tracking_number: None,
        shipped_at: None,
        delivered_at: None,
        lines: vec![OrderLine {
            uuid: Uuid::now_v7(),
            book_uuid: Uuid::now_v7(),
            quantity: 2,
            unit_price: 10_000,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_mark_shipped().never();
    orders.expect_confirm_received().never();

    orders
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_handle_notification().never();

    payments
}

fn strict_pricing_mock() -> MockPricingService {
    let mut pricing = MockPricingService::new();

    pricing.expect_quote_price().never();

    pricing
}

pub(crate) fn state_with_checkout(checkout: MockCheckoutService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        checkout: Arc::new(checkout),
        orders: Arc::new(strict_orders_mock()),
        payments: Arc::new(strict_payments_mock()),
        pricing: Arc::new(strict_pricing_mock()),
    }))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        checkout: Arc::new(strict_checkout_mock()),
        orders: Arc::new(orders),
        payments: Arc::new(strict_payments_mock()),
        pricing: Arc::new(strict_pricing_mock()),
    }))
}

pub(crate) fn state_with_payments(payments: MockPaymentsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        checkout: Arc::new(strict_checkout_mock()),
        orders: Arc::new(strict_orders_mock()),
        payments: Arc::new(payments),
        pricing: Arc::new(strict_pricing_mock()),
    }))
}

pub(crate) fn state_with_pricing(pricing: MockPricingService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        checkout: Arc::new(strict_checkout_mock()),
        orders: Arc::new(strict_orders_mock()),
        payments: Arc::new(strict_payments_mock()),
        pricing: Arc::new(pricing),
    }))
}

/// Service with the identity middleware replaced by a fixed test user.
pub(crate) fn user_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// Service without any identity, as the webhook route is mounted.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
