//! Single test binary entry point.
//!
//! All tests are compiled into one binary to keep link times down.
//!
//! Structure:
//! - helpers: Fixtures and builders shared by the tests
//! - integration: Multi-component workflow tests
//! - unit: Single-component unit tests

mod integration;
mod unit;
