use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::api::envelope::Envelope;
use crate::api::error::{internal, write_failure, ApiError};
use crate::api::extract::UpdateBody;
use crate::api::handlers::{block_not_found, ensure_district_exists, AppState};
use crate::model::{parse_id, Block, BlockUpdate, Id, NewBlock};
use crate::store::traits::Store;

const DUPLICATE_BLOCK: &str = "Block with this name already exists in the district";

async fn load_block<S: Store>(
    store: &S,
    raw_id: &str,
    failure: &'static str,
) -> Result<Block, ApiError> {
    let Some(id) = parse_id(raw_id) else {
        return Err(block_not_found(raw_id));
    };

    store
        .find_block(id)
        .await
        .map_err(internal(failure))?
        .ok_or_else(|| block_not_found(raw_id))
}

async fn reload_joined<S: Store>(
    store: &S,
    id: Id,
    failure: &'static str,
) -> Result<Block, ApiError> {
    store
        .get_block(id)
        .await
        .map_err(internal(failure))?
        .ok_or_else(|| block_not_found(id))
}

pub async fn list_blocks<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<Block>>>, ApiError> {
    let blocks = store
        .list_blocks()
        .await
        .map_err(internal("Error fetching blocks"))?;

    Ok(Json(Envelope::list(blocks)))
}

pub async fn get_block<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Block>>, ApiError> {
    let Some(block_id) = parse_id(&id) else {
        return Err(block_not_found(&id));
    };

    let block = store
        .get_block(block_id)
        .await
        .map_err(internal("Error fetching block"))?
        .ok_or_else(|| block_not_found(&id))?;

    Ok(Json(Envelope::data(block)))
}

pub async fn create_block<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<Json<NewBlock>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Block>>), ApiError> {
    let Json(new_block) = payload?;
    let fields = new_block.into_fields().ok_or_else(|| {
        ApiError::Validation("Block name and district_id are required".to_string())
    })?;

    let failure = "Error creating block";
    ensure_district_exists(&*store, fields.district_id, failure).await?;

    let id = store
        .insert_block(&fields)
        .await
        .map_err(write_failure(DUPLICATE_BLOCK, failure))?;
    let block = reload_joined(&*store, id, failure).await?;

    log::info!(
        "Created block {} ({}) in district {}",
        block.id,
        block.name,
        block.district_id
    );
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Block created successfully", block)),
    ))
}

pub async fn update_block<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<UpdateBody<BlockUpdate>, ApiError>,
) -> Result<Json<Envelope<Block>>, ApiError> {
    let failure = "Error updating block";
    let stored = load_block(&*store, &id, failure).await?;
    let UpdateBody(update) = payload?;

    if let Some(district_id) = update.target_district() {
        ensure_district_exists(&*store, district_id, failure).await?;
    }

    let fields = update.merge_onto(&stored);
    store
        .update_block(stored.id, &fields)
        .await
        .map_err(write_failure(DUPLICATE_BLOCK, failure))?;
    let block = reload_joined(&*store, stored.id, failure).await?;

    Ok(Json(Envelope::with_message("Block updated successfully", block)))
}

pub async fn delete_block<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let failure = "Error deleting block";
    let block = load_block(&*store, &id, failure).await?;

    store
        .delete_block(block.id)
        .await
        .map_err(internal(failure))?;

    log::info!("Deleted block {} ({})", block.id, block.name);
    Ok(Json(Envelope::message(format!(
        "Block with ID {} deleted successfully",
        block.id
    ))))
}
