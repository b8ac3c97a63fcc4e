//! Cross-cutting plumbing shared by the Delight wiki services: tracing and
//! the audit log, health handlers, request ids, and query helpers.

pub mod health;
pub mod middleware;
pub mod rotating;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
