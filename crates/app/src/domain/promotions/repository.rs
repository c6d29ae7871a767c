//! Promotion Links Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::promotions::models::PromoDiscount;

const GET_BOOK_DISCOUNTS_SQL: &str = include_str!("sql/get_book_discounts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load every promotion link for the given books, with the active
    /// window already materialised from the date and time parts. Window
    /// filtering happens in the resolver, not in SQL, so that pricing
    /// stays a pure function of an explicit instant.
    pub(crate) async fn get_book_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        books: &[Uuid],
    ) -> Result<Vec<PromoDiscount>, sqlx::Error> {
        query_as::<Postgres, PromoDiscount>(GET_BOOK_DISCOUNTS_SQL)
            .bind(books)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PromoDiscount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            promotion_uuid: row.try_get("promotion_uuid")?,
            book_uuid: row.try_get("book_uuid")?,
            name: row.try_get("name")?,
            discount_percent: row.try_get("discount_percent")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
        })
    }
}
