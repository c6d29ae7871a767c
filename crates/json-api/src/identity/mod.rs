//! Request identity.
//!
//! Authentication is delegated to the gateway in front of this service;
//! it forwards the authenticated user in the `X-User-Uuid` header and
//! flags back-office operators with `X-Admin`.

pub(crate) mod middleware;
