//! Books Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use uuid::Uuid;

use crate::domain::catalog::models::Book;

const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const GET_BOOKS_SQL: &str = include_str!("sql/get_books.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: Uuid,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(GET_BOOK_SQL)
            .bind(book)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        books: &[Uuid],
    ) -> Result<Vec<Book>, sqlx::Error> {
        query_as::<Postgres, Book>(GET_BOOKS_SQL)
            .bind(books)
            .fetch_all(&mut **tx)
            .await
    }

    /// Atomically decrement a book's stock, clamping at zero.
    ///
    /// The clamp mirrors the accepted oversell window: drafts are not
    /// reserved, so a late payment may settle against stock another
    /// order has already consumed.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: Uuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(DECREMENT_STOCK_SQL)
            .bind(book)
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_quantity(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let weight_grams = row
            .try_get::<Option<i32>, _>("weight_grams")?
            .map(|grams| {
                u32::try_from(grams).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "weight_grams".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_quantity(row, "stock")?,
            weight_grams,
            tags: row.try_get("tags")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
