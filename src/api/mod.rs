//! API Module
//!
//! HTTP handlers and routing for the inventory REST API.
//!
//! # Endpoints
//! - `GET /items/` - List all items
//! - `POST /items/` - Create an item
//! - `GET /items/:id/` - Read an item (cache-aware)
//! - `PUT /items/:id/` - Replace an item
//! - `DELETE /items/:id/` - Delete an item
//! - `POST /token/`, `POST /token/refresh/` - Bearer token issuance
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
