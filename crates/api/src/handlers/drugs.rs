//! Handlers for the `/drugs` resource.
//!
//! CRUD over drug reference data, name-prefix search, and blood-level
//! evaluation of an observed level against a drug's milligram ranges.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bloodlevel_core::classification::{classify, BloodLevel};
use bloodlevel_core::drug::{normalize_query, validate_observed_level, ENTITY_DRUG};
use bloodlevel_core::error::CoreError;
use bloodlevel_core::types::DbId;
use bloodlevel_db::models::drug::{CreateDrug, Drug, UpdateDrug};
use bloodlevel_db::repositories::DrugRepo;
use bloodlevel_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::DrugSearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

/// Body of `POST /drugs/evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub drug: String,
    pub observed_level: f64,
}

/// Result of evaluating an observed level against the first matching drug.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub drug_name: String,
    pub normal_level_mg: Option<String>,
    pub toxic_level_mg: Option<String>,
    pub lethal_level_mg: Option<String>,
    pub observed_level: f64,
    pub description: BloodLevel,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Search by name prefix, treating an empty result as 404.
async fn search_or_not_found(pool: &DbPool, query: &str) -> AppResult<Vec<Drug>> {
    let drugs = DrugRepo::search_by_name_prefix(pool, query).await?;
    if drugs.is_empty() {
        return Err(AppError::NotFound(format!(
            "No drugs found matching '{query}'."
        )));
    }
    Ok(drugs)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_DRUG,
        id,
    })
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /api/v1/drugs
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let drugs = DrugRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: drugs }))
}

/// GET /api/v1/drugs/search?drug=
///
/// Case-insensitive name-prefix search; `%` acts as a wildcard. A blank
/// query returns an empty list rather than every drug.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<DrugSearchParams>,
) -> AppResult<impl IntoResponse> {
    let Some(query) = normalize_query(&params.drug) else {
        return Ok(Json(DataResponse { data: Vec::<Drug>::new() }));
    };

    let drugs = search_or_not_found(&state.pool, query).await?;
    tracing::debug!(query, matches = drugs.len(), "Drug search");

    Ok(Json(DataResponse { data: drugs }))
}

/// POST /api/v1/drugs/evaluate
///
/// Classify an observed blood level against the first drug whose name
/// starts with `drug`. Malformed stored ranges are reported as 400.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(input): Json<EvaluateRequest>,
) -> AppResult<impl IntoResponse> {
    let query = normalize_query(&input.drug).ok_or_else(|| {
        AppError::BadRequest("Drug name is required for evaluation.".to_string())
    })?;
    validate_observed_level(input.observed_level)?;

    let drugs = search_or_not_found(&state.pool, query).await?;
    let drug = drugs
        .into_iter()
        .next()
        .ok_or_else(|| AppError::InternalError("search returned no rows".to_string()))?;

    let description = classify(&drug.mg_ranges(), input.observed_level).map_err(|err| {
        tracing::warn!(drug_id = drug.id, error = %err, "Stored range failed to parse");
        AppError::from(err)
    })?;

    tracing::info!(
        drug_id = drug.id,
        observed_level = input.observed_level,
        description = %description,
        "Blood level evaluated",
    );

    Ok(Json(DataResponse {
        data: EvaluateResponse {
            drug_name: drug.drug_name,
            normal_level_mg: drug.normal_level_mg,
            toxic_level_mg: drug.toxic_level_mg,
            lethal_level_mg: drug.lethal_level_mg,
            observed_level: input.observed_level,
            description,
        },
    }))
}

/// POST /api/v1/drugs
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDrug>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let drug = DrugRepo::create(&state.pool, &input).await?;

    tracing::info!(drug_id = drug.id, drug_name = %drug.drug_name, "Drug created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: drug })))
}

/// GET /api/v1/drugs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let drug = DrugRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: drug }))
}

/// PUT /api/v1/drugs/{id}
///
/// Partial update: missing keys are left unchanged, `null` clears a
/// nullable column.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDrug>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let drug = DrugRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(drug_id = id, "Drug updated");

    Ok(Json(DataResponse { data: drug }))
}

/// DELETE /api/v1/drugs/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !DrugRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(drug_id = id, "Drug deleted");

    Ok(StatusCode::NO_CONTENT)
}
