//! Catalog

pub mod models;
pub(crate) mod repository;
