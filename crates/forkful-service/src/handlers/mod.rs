//! HTTP request handlers.

pub mod achievements;
pub mod health;
pub mod recipes;
pub mod users;
