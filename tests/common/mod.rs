//! Common test utilities and helpers
//!
//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

pub mod assertion_helpers;
pub mod test_fixtures;
