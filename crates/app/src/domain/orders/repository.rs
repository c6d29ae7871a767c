//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    catalog::repository::{try_get_amount, try_get_quantity},
    orders::{
        models::{Courier, NewOrder, NewOrderLine, Order, OrderLine},
        status::OrderStatus,
    },
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_LINE_SQL: &str = include_str!("sql/insert_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_FOR_UPDATE_SQL: &str = include_str!("sql/get_order_for_update.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const MARK_SHIPPED_SQL: &str = include_str!("sql/mark_shipped.sql");
const CONFIRM_RECEIVED_SQL: &str = include_str!("sql/confirm_received.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(order.uuid)
            .bind(order.user_uuid)
            .bind(&order.processor_order_id)
            .bind(bind_amount(order.total_price)?)
            .bind(bind_amount(order.total_weight_grams)?)
            .bind(&order.shipping_address)
            .bind(order.courier.as_str())
            .bind(bind_amount(order.shipping_cost)?)
            .bind(&order.destination_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        line: NewOrderLine,
    ) -> Result<OrderLine, sqlx::Error> {
        query_as::<Postgres, OrderLine>(INSERT_ORDER_LINE_SQL)
            .bind(line.uuid)
            .bind(order)
            .bind(line.book_uuid)
            .bind(i32::try_from(line.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
            .bind(bind_amount(line.unit_price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch the order a processor notification refers to, taking a row
    /// lock so concurrent deliveries for the same order serialise.
    pub(crate) async fn get_order_by_processor_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        processor_order_id: &str,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_FOR_UPDATE_SQL)
            .bind(processor_order_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_STATUS_SQL)
            .bind(order)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Conditional `paid -> shipped` update; `RowNotFound` means the
    /// order either does not exist or is not currently `paid`.
    pub(crate) async fn mark_shipped(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        tracking_number: &str,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_SHIPPED_SQL)
            .bind(order)
            .bind(tracking_number)
            .fetch_one(&mut **tx)
            .await
    }

    /// Conditional `shipped -> delivered` update.
    pub(crate) async fn confirm_received(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CONFIRM_RECEIVED_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }
}

fn bind_amount(value: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn try_get_status(row: &PgRow) -> sqlx::Result<OrderStatus> {
    let value: String = row.try_get("status")?;

    OrderStatus::from_str(&value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

fn try_get_courier(row: &PgRow) -> sqlx::Result<Courier> {
    let value: String = row.try_get("courier")?;

    Courier::from_str(&value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "courier".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            processor_order_id: row.try_get("processor_order_id")?,
            status: try_get_status(row)?,
            total_price: try_get_amount(row, "total_price")?,
            total_weight_grams: try_get_amount(row, "total_weight_grams")?,
            shipping_address: row.try_get("shipping_address")?,
            courier: try_get_courier(row)?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            destination_id: row.try_get("destination_id")?,
            tracking_number: row.try_get("tracking_number")?,
            shipped_at: row
                .try_get::<Option<SqlxTimestamp>, _>("shipped_at")?
                .map(SqlxTimestamp::to_jiff),
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            book_uuid: row.try_get("book_uuid")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
