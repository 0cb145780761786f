use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::{block_handlers, district_handlers, handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Districts
        .route(
            "/districts",
            get(district_handlers::list_districts::<S>).post(district_handlers::create_district::<S>),
        )
        .route(
            "/districts/:id",
            get(district_handlers::get_district::<S>)
                .put(district_handlers::update_district::<S>)
                .delete(district_handlers::delete_district::<S>),
        )
        .route(
            "/districts/:id/blocks",
            get(district_handlers::list_district_blocks::<S>),
        )
        // Blocks
        .route(
            "/blocks",
            get(block_handlers::list_blocks::<S>).post(block_handlers::create_block::<S>),
        )
        .route(
            "/blocks/:id",
            get(block_handlers::get_block::<S>)
                .put(block_handlers::update_block::<S>)
                .delete(block_handlers::delete_block::<S>),
        )
}
