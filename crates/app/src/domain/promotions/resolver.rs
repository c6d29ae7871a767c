//! Promo-aware price resolution.
//!
//! Pure function of (face price, promo links, instant): no queries, no
//! clock reads, safe to call concurrently per line item. Every surface
//! that shows a price (cart view, book detail, checkout, order preview)
//! goes through [`resolve`] rather than re-implementing the active-promo
//! lookup.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};
use smallvec::SmallVec;

use crate::domain::promotions::models::{PriceQuote, PromoDiscount};

/// Resolve the unit price of a book at `at` against its promo links.
///
/// At most one promotion is honoured. When several are simultaneously
/// active the tie-break is deterministic: the latest-starting window
/// wins, then the larger percentage, then the lexically larger promotion
/// uuid. A link whose percentage is missing or non-positive is treated
/// as if no promotion were active at all.
#[must_use]
pub fn resolve(face_price: u64, discounts: &[PromoDiscount], at: Timestamp) -> PriceQuote {
    let mut active: SmallVec<[&PromoDiscount; 4]> = discounts
        .iter()
        .filter(|discount| discount.is_active_at(at))
        .filter(|discount| discount.discount_percent.is_some_and(|pct| pct > Decimal::ZERO))
        .collect();

    active.sort_by(|a, b| {
        b.starts_at
            .cmp(&a.starts_at)
            .then_with(|| b.discount_percent.cmp(&a.discount_percent))
            .then_with(|| b.promotion_uuid.cmp(&a.promotion_uuid))
    });

    let Some(winner) = active.first() else {
        return PriceQuote::face(face_price);
    };

    let Some(percent) = winner.discount_percent else {
        return PriceQuote::face(face_price);
    };

    PriceQuote {
        unit_price: discounted_unit_price(face_price, percent),
        face_price,
        discount_percent: Some(percent),
        promo_name: Some(winner.name.clone()),
    }
}

/// `round_half_up(face × (1 − pct/100))`, clamped to `[0, face]`.
#[must_use]
pub fn discounted_unit_price(face_price: u64, percent: Decimal) -> u64 {
    let face = Decimal::from(face_price);
    let factor = Decimal::ONE - percent / Decimal::ONE_HUNDRED;

    let discounted = (face * factor)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, face);

    // In range [0, face] after the clamp, so the conversion cannot fail.
    u64::try_from(discounted.trunc().mantissa()).unwrap_or(face_price)
}
