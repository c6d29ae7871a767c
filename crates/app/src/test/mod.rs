//! Shared test infrastructure: per-test databases and a service context.

mod db;

pub(crate) use context::{TEST_SERVER_KEY, TestContext};
