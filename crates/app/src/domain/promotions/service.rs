//! Pricing Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        catalog::repository::PgBooksRepository,
        promotions::{
            errors::PricingError, models::PriceQuote, repository::PgPromotionsRepository, resolver,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPricingService {
    db: Db,
    books: PgBooksRepository,
    promotions: PgPromotionsRepository,
}

impl PgPricingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            books: PgBooksRepository::new(),
            promotions: PgPromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PricingService for PgPricingService {
    #[tracing::instrument(
        name = "promotions.service.quote_price",
        skip(self),
        fields(book_uuid = %book, at = %at),
        err
    )]
    async fn quote_price(&self, book: Uuid, at: Timestamp) -> Result<PriceQuote, PricingError> {
        let mut tx = self.db.begin().await?;

        let record = self.books.get_book(&mut tx, book).await?;
        let discounts = self.promotions.get_book_discounts(&mut tx, &[book]).await?;

        tx.commit().await?;

        Ok(resolver::resolve(record.price, &discounts, at))
    }
}

#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Quote the unit price of a book at a given instant, applying the
    /// single honoured promotion if one is active.
    async fn quote_price(&self, book: Uuid, at: Timestamp) -> Result<PriceQuote, PricingError>;
}
