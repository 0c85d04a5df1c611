use serde_json::json;
use shared_types::{AppError, Collection, Profile, Session, UpdateProfileRequest};

use crate::error_convert::{GatewayErrorExt, ValidateRequest};
use crate::gateway::{decode_rows, Filter, Gateway};

/// Write a new display name to the caller's own `profiles` row.
#[tracing::instrument(skip(gateway, session, auth), fields(user_id = %session.user_id))]
pub async fn update_display_name(
    gateway: &dyn Gateway,
    session: &Session,
    request: UpdateProfileRequest,
    auth: &str,
) -> Result<Profile, AppError> {
    request.validate_request()?;

    let patch = json!({ "display_name": request.display_name.trim() });
    let rows = gateway
        .update(
            Collection::Profiles,
            &patch,
            &Filter::eq("id", session.user_id),
            Some(auth),
        )
        .await
        .map_err(|e| e.into_app_error())?;

    decode_rows::<Profile>(rows)
        .map_err(|e| e.into_app_error())?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("Profile not found"))
}
