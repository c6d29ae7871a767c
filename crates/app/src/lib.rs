//! Shared application domain and persistence modules for the Pustaka
//! bookstore order pipeline.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
