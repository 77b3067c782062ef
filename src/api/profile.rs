//! Profile API endpoints.

use axum::extract::State;

use super::{created, ok, ApiJson, ApiResult, OrEmpty};
use crate::models::{CreateProfileRequest, Profile};
use crate::AppState;

/// POST /profile - Create the profile. Refused once one exists.
pub async fn create_profile(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProfileRequest>,
) -> ApiResult<Profile> {
    request.validate()?;

    let profile = state.repo.create_profile(&request).await?;
    tracing::info!("Created profile {}", profile.id);
    created(profile)
}

/// GET /profile - Get the profile, or `[]` if none has been created.
pub async fn get_profile(State(state): State<AppState>) -> ApiResult<OrEmpty<Profile>> {
    let profile = state.repo.get_profile().await?;
    ok(OrEmpty(profile))
}
