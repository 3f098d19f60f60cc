use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::models::FranchiseModel;
use crate::shared::{AppError, AppState};
use crate::user::models::UserModel;

/// Request payload for creating a franchise
#[derive(Debug, Deserialize, Default)]
pub struct FranchiseCreateRequest {
    #[serde(default)]
    pub name: String,
}

/// A franchise as returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct FranchiseResponse {
    pub id: String,
    pub name: String,
}

impl From<FranchiseModel> for FranchiseResponse {
    fn from(franchise: FranchiseModel) -> Self {
        Self {
            id: franchise.id,
            name: franchise.name,
        }
    }
}

/// HTTP handler for creating a franchise
///
/// POST /franchises
#[instrument(name = "create_franchise", skip(state, user, request))]
pub async fn create_franchise(
    State(state): State<AppState>,
    Extension(user): Extension<UserModel>,
    Json(request): Json<FranchiseCreateRequest>,
) -> Result<Json<FranchiseResponse>, AppError> {
    if request.name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let franchise = FranchiseModel::new(user.id.clone(), request.name);
    state.franchise_repository.create_franchise(&franchise).await?;

    info!(franchise_id = %franchise.id, "Franchise created successfully");

    Ok(Json(FranchiseResponse::from(franchise)))
}

/// HTTP handler for listing the authenticated user's franchises
///
/// GET /franchises
#[instrument(name = "list_franchises", skip(state, user))]
pub async fn list_franchises(
    State(state): State<AppState>,
    Extension(user): Extension<UserModel>,
) -> Result<Json<Vec<FranchiseResponse>>, AppError> {
    let franchises = state.franchise_repository.list_franchises(&user.id).await?;

    Ok(Json(
        franchises.into_iter().map(FranchiseResponse::from).collect(),
    ))
}
