//! Catalog Handlers

pub(crate) mod quote;
