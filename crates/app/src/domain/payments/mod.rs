//! Payments

pub mod errors;
pub mod notification;
pub mod service;
pub mod signature;

pub use errors::PaymentsError;
pub use notification::PaymentNotification;
pub use service::*;
