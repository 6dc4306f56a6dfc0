//! Forkful HTTP API Service.
//!
//! This crate provides the HTTP API for the Forkful recipe-sharing backend,
//! including:
//!
//! - User registration and profile lookup
//! - The paginated recipe feed and multipart recipe upload
//! - Per-user recipe and achievement listings
//!
//! The service is a thin translation layer: every route maps onto one storage
//! operation, and the handlers hold no business state. Request authentication
//! is handled by an external collaborator; this layer takes the posting user
//! id as request data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for consistency

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
