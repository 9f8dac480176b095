//! HTTP-level tests against the full router with in-memory stores.

mod helpers;

mod auth_test;
mod guard_test;
