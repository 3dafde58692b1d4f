//! Request and Response models for the inventory API
//!
//! This module defines the item record and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{Item, ItemFields};
pub use requests::{ItemPayload, RefreshRequest, TokenRequest};
pub use responses::{
    AccessTokenResponse, CacheStatsResponse, DeleteResponse, HealthResponse, TokenPairResponse,
};
