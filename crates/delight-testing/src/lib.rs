//! Test utilities for the Delight wiki.
//!
//! Provides `MockSession` and an in-memory SQLite connection helper.
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod auth;
pub mod db;
