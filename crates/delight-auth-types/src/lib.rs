//! Auth types for the Delight wiki.
//!
//! Provides JWT issuing and validation, the session cookie builders, password
//! hashing, and the `Session` extractor.

pub mod cookie;
pub mod identity;
pub mod password;
pub mod token;
