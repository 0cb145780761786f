use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::api::envelope::{DistrictBlocksEnvelope, Envelope};
use crate::api::error::{internal, write_failure, ApiError};
use crate::api::extract::UpdateBody;
use crate::api::handlers::{district_not_found, load_district, AppState};
use crate::model::{District, DistrictUpdate, NewDistrict};
use crate::store::traits::Store;

const DUPLICATE_DISTRICT: &str = "District with this name already exists";

pub async fn list_districts<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<District>>>, ApiError> {
    let districts = store
        .list_districts()
        .await
        .map_err(internal("Error fetching districts"))?;

    Ok(Json(Envelope::list(districts)))
}

pub async fn get_district<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<District>>, ApiError> {
    let district = load_district(&*store, &id, "Error fetching district").await?;
    Ok(Json(Envelope::data(district)))
}

pub async fn create_district<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<Json<NewDistrict>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<District>>), ApiError> {
    let Json(new_district) = payload?;
    let fields = new_district
        .into_fields()
        .ok_or_else(|| ApiError::Validation("District name is required".to_string()))?;

    let failure = "Error creating district";
    let id = store
        .insert_district(&fields)
        .await
        .map_err(write_failure(DUPLICATE_DISTRICT, failure))?;

    // Re-read so the response reflects what the database stored
    let district = store
        .get_district(id)
        .await
        .map_err(internal(failure))?
        .ok_or_else(|| district_not_found(id))?;

    log::info!("Created district {} ({})", district.id, district.name);
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("District created successfully", district)),
    ))
}

pub async fn update_district<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<UpdateBody<DistrictUpdate>, ApiError>,
) -> Result<Json<Envelope<District>>, ApiError> {
    let failure = "Error updating district";
    let stored = load_district(&*store, &id, failure).await?;
    let UpdateBody(update) = payload?;

    let fields = update.merge_onto(&stored);
    store
        .update_district(stored.id, &fields)
        .await
        .map_err(write_failure(DUPLICATE_DISTRICT, failure))?;

    let district = store
        .get_district(stored.id)
        .await
        .map_err(internal(failure))?
        .ok_or_else(|| district_not_found(stored.id))?;

    Ok(Json(Envelope::with_message(
        "District updated successfully",
        district,
    )))
}

pub async fn delete_district<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let failure = "Error deleting district";
    let district = load_district(&*store, &id, failure).await?;

    // Dependent blocks are left to the schema's foreign key rules
    store
        .delete_district(district.id)
        .await
        .map_err(internal(failure))?;

    log::info!("Deleted district {} ({})", district.id, district.name);
    Ok(Json(Envelope::message(format!(
        "District with ID {} deleted successfully",
        district.id
    ))))
}

pub async fn list_district_blocks<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<DistrictBlocksEnvelope>, ApiError> {
    let failure = "Error fetching district blocks";
    let district = load_district(&*store, &id, failure).await?;

    let blocks = store
        .list_blocks_in_district(district.id)
        .await
        .map_err(internal(failure))?;

    Ok(Json(DistrictBlocksEnvelope::new(district, blocks)))
}
