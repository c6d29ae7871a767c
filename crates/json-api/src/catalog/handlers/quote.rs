//! Price Quote Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pustaka_app::domain::promotions::models::PriceQuote;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// A promo-resolved price quote.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceQuoteResponse {
    /// The effective unit price after the honoured promotion
    pub unit_price: u64,

    /// The undiscounted catalogue price
    pub face_price: u64,

    /// The applied discount percentage, if any
    pub discount_percent: Option<String>,

    /// The name of the honoured promotion, if any
    pub promo_name: Option<String>,
}

impl From<PriceQuote> for PriceQuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            unit_price: quote.unit_price,
            face_price: quote.face_price,
            discount_percent: quote.discount_percent.as_ref().map(ToString::to_string),
            promo_name: quote.promo_name,
        }
    }
}

/// Price Quote Handler
///
/// Quotes a book's unit price at a point in time, defaulting to now.
#[endpoint(tags("catalog"), summary = "Quote Book Price")]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PriceQuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let quote = state
        .app
        .pricing
        .quote_price(book.into_inner(), point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
