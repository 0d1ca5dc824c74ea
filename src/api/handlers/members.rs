use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    api::{
        extract::{JsonBody, PathParam},
        state::AppState,
    },
    domain::{CreateMemberRequest, Member, UpdateMemberRequest},
    error::{AppError, Result},
    web::uploads::save_member_image,
};

/// Name of the multipart field carrying the avatar bytes.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct MemberDto {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    role: Option<String>,
    join_date: Option<String>,
    image_url: String,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            email: member.email,
            phone: member.phone,
            address: member.address,
            role: member.role,
            join_date: member.join_date.map(|dt| dt.to_rfc3339()),
            image_url: member.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    filename: String,
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberDto>>> {
    let members = state.service_context.member_service
        .list_members()
        .await?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<MemberDto>> {
    let member = state.service_context.member_service
        .get_member(id)
        .await?;

    Ok(Json(member.into()))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberDto>)> {
    let member = state.service_context.member_service
        .create_member(request)
        .await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(update): JsonBody<UpdateMemberRequest>,
) -> Result<Json<MemberDto>> {
    let member = state.service_context.member_service
        .update_member(id, update)
        .await?;

    Ok(Json(member.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>> {
    state.service_context.member_service
        .delete_member(id)
        .await?;

    Ok(Json(json!({ "status": "deleted" })))
}

/// Stores the `file` field as `<images_dir>/<id>.png`.
///
/// The member's `image_url` is left as it is and the id is not required to
/// belong to an existing member.
pub async fn upload(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = save_member_image(&state.settings.storage.images_dir, id, field).await?;
        tracing::info!(member_id = id, path = %filename, "Stored member image");

        return Ok(Json(UploadResponse { filename }));
    }

    Err(AppError::Validation(format!("Missing multipart field '{}'", UPLOAD_FIELD)))
}
