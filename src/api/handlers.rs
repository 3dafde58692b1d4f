//! API Handlers
//!
//! HTTP request handlers for the item, token and health endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, warn};

use crate::auth::{Accounts, Claims, TokenIssuer};
use crate::cache::MemoryCache;
use crate::config::Config;
use crate::db::{Database, SqliteItemStore, UserStore};
use crate::error::{ApiError, Result, StoreError};
use crate::models::{
    AccessTokenResponse, DeleteResponse, HealthResponse, Item, ItemPayload, RefreshRequest,
    TokenPairResponse, TokenRequest,
};
use crate::service::ItemService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemService>,
    pub tokens: Arc<TokenIssuer>,
    pub accounts: Accounts,
}

impl AppState {
    pub fn new(items: ItemService, tokens: TokenIssuer, accounts: Accounts) -> Self {
        Self {
            items: Arc::new(items),
            tokens: Arc::new(tokens),
            accounts,
        }
    }

    /// Wires the SQLite store, the in-process cache and the token issuer.
    ///
    /// The database must already be migrated.
    pub fn from_database(db: &Database, config: &Config) -> Self {
        let items = ItemService::new(
            Arc::new(SqliteItemStore::new(db.pool().clone())),
            Arc::new(MemoryCache::new()),
            Duration::from_secs(config.cache_ttl),
        );
        let accounts = Accounts::new(UserStore::new(db.pool().clone()), config.bcrypt_cost);
        Self::new(items, TokenIssuer::from_config(config), accounts)
    }

    /// Connects to `config.database_url`, migrates it and wires the state.
    pub async fn from_config(config: &Config) -> std::result::Result<(Self, Database), StoreError> {
        let db = Database::connect(&config.database_url).await?;
        db.migrate().await?;
        Ok((Self::from_database(&db, config), db))
    }
}

/// Turns body parsing failures into a 400 with the rejection text.
fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// An id segment that is not an integer cannot name an item.
fn item_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!("Unresolvable item path: {}", rejection.body_text());
        ApiError::item_not_found()
    })
}

// == Items ==

/// Handler for GET /items/
pub async fn list_items_handler(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    Ok(Json(state.items.list().await?))
}

/// Handler for POST /items/
pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: std::result::Result<Json<ItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let payload = parse_body(body)?;
    let item = state.items.create(payload).await?;
    info!("Item {} created by {}", item.id, claims.username);
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /items/{id}/
pub async fn get_item_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>> {
    Ok(Json(state.items.get(item_id(path)?).await?))
}

/// Handler for PUT /items/{id}/
pub async fn update_item_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>> {
    let id = item_id(path)?;
    let payload = parse_body(body)?;
    let item = state.items.update(id, payload).await?;
    info!("Item {} updated by {}", id, claims.username);
    Ok(Json(item))
}

/// Handler for DELETE /items/{id}/
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let id = item_id(path)?;
    state.items.delete(id).await?;
    info!("Item {} deleted by {}", id, claims.username);
    Ok(Json(DeleteResponse::deleted()))
}

// == Tokens ==

/// Handler for POST /token/
///
/// Exchanges a username/password pair for an access and a refresh token.
pub async fn obtain_token_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenPairResponse>> {
    let req = parse_body(body)?;
    let user = state
        .accounts
        .authenticate(&req.username, &req.password)
        .await
        .inspect_err(|_| warn!("Token request rejected for {}", req.username))?;

    let pair = state.tokens.issue_pair(&user)?;
    info!("Issued token pair for {}", user.username);
    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Handler for POST /token/refresh/
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>> {
    let req = parse_body(body)?;
    let access = state.tokens.refresh(&req.refresh)?;
    Ok(Json(AccessTokenResponse { access }))
}

// == Health ==

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.items.cache_stats().await))
}
