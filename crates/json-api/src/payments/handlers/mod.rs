//! Payment Handlers

pub(crate) mod notification;
