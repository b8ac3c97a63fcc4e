//! Domain types shared across the Delight wiki crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod catalog;
pub mod pagination;
pub mod user;
