pub mod account;
pub mod admin;
pub mod catalog;
pub mod like;
pub mod profile;
pub mod ranking;
pub mod search;
pub mod seed;
