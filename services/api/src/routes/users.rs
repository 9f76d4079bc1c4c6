//! User registration
//!
//! The one engineered flow of the service: extract the multipart form,
//! validate it, reject duplicates, upload media, persist the record, and
//! answer with the sanitized projection inside the uniform envelope. Every
//! step either advances or short-circuits into an [`ApiError`]; nothing in
//! here shapes its own error response.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::media::StagedFile;
use crate::models::user::{NewUser, PublicUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// The registration input after multipart extraction.
///
/// Text fields default to empty when absent; the validation step treats
/// absent and empty identically. Files are staged to temp paths and carry
/// their own cleanup.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar: Option<StagedFile>,
    pub cover_image: Option<StagedFile>,
}

/// `POST /api/v1/users/register`
pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<ApiResponse<PublicUser>> {
    let form = extract_form(multipart).await?;
    register_user(&state, form).await
}

/// Pull the registration fields out of the multipart stream.
///
/// Only the first file part under each of `avatar` and `coverImage` is used;
/// file parts with an empty filename count as absent.
async fn extract_form(mut multipart: Multipart) -> ApiResult<RegistrationForm> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => form.username = field.text().await.map_err(malformed_multipart)?,
            "email" => form.email = field.text().await.map_err(malformed_multipart)?,
            "fullName" => form.full_name = field.text().await.map_err(malformed_multipart)?,
            "password" => form.password = field.text().await.map_err(malformed_multipart)?,
            "avatar" | "coverImage" => {
                let taken = match name.as_str() {
                    "avatar" => form.avatar.is_some(),
                    _ => form.cover_image.is_some(),
                };
                let file_name = field.file_name().unwrap_or_default().to_string();
                if taken || file_name.is_empty() {
                    continue;
                }

                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed_multipart)?;
                let staged = StagedFile::stage(&bytes, file_name, content_type)
                    .map_err(|e| ApiError::internal("Internal server error").with_cause(e))?;

                match name.as_str() {
                    "avatar" => form.avatar = Some(staged),
                    _ => form.cover_image = Some(staged),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn malformed_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::bad_request("Malformed multipart request").with_cause(err.into())
}

/// Run the registration pipeline against the given state.
///
/// Separate from the extractor so the whole flow can be exercised with
/// in-memory stores.
pub async fn register_user(
    state: &AppState,
    form: RegistrationForm,
) -> ApiResult<ApiResponse<PublicUser>> {
    // Validate: all four text fields non-empty after trimming, avatar staged.
    let required = [&form.username, &form.email, &form.full_name, &form.password];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::bad_request("All fields are required"));
    }
    if form.avatar.is_none() {
        return Err(ApiError::bad_request("Avatar file is required"));
    }

    // Duplicate check. Not atomic with the create below; the unique
    // constraints in the store catch whatever slips through.
    let existing = state
        .user_store
        .find_by_username_or_email(&form.username, &form.email)
        .await?;
    if existing.is_some() {
        return Err(ApiError::conflict(
            "User with email or username already exists",
        ));
    }

    // Mandatory avatar upload; a failed transfer reads the same as a
    // missing file.
    let avatar = state
        .media
        .upload(form.avatar)
        .await
        .ok_or_else(|| ApiError::bad_request("Avatar file is required"))?;

    // Optional cover image; absence or failure maps to an empty URL.
    let cover_image_url = state
        .media
        .upload(form.cover_image)
        .await
        .map(|media| media.url)
        .unwrap_or_default();

    let record = state
        .user_store
        .create(NewUser {
            username: form.username.to_lowercase(),
            email: form.email,
            full_name: form.full_name,
            password: form.password,
            avatar_url: avatar.url,
            cover_image_url,
        })
        .await?;

    // Read the record back through the sanitized projection. Failing to
    // find it now means the create lied; that is a defect, not user error.
    let created = state
        .user_store
        .find_public_by_id(record.id)
        .await?
        .ok_or_else(|| ApiError::internal("Something went wrong while registering"))?;

    info!(user_id = %created.id, username = %created.username, "user registered");

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        created,
        "User registered successfully",
    ))
}
