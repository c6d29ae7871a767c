//! Domain modules

pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod promotions;
pub mod shipping;
