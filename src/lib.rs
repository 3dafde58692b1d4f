//! Inventory API - item CRUD over HTTP
//!
//! Bearer-token authentication in front of an item service that keeps a
//! read-through TTL cache over a SQLite item store.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use service::ItemService;
