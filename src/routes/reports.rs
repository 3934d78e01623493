use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::media;
use crate::models::{NewReport, Report, ReportStatus};
use crate::store;
use crate::AppState;

// --- GET /api/reports ---

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "onlyOpen", default)]
    pub only_open: bool,
}

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Report>>> {
    let rows = store::list_reports(&state.db, query.only_open)?;
    Ok(Json(rows))
}

// --- POST /api/reports ---

#[derive(Debug, Default)]
struct CreateForm {
    description: Option<String>,
    reporter_name: Option<String>,
    reporter_phone: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    photo: Option<(String, Vec<u8>)>,
}

async fn read_form(mut multipart: Multipart) -> AppResult<CreateForm> {
    let mut form = CreateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "description" => form.description = Some(read_text(field).await?),
            "reporter_name" => form.reporter_name = Some(read_text(field).await?),
            "reporter_phone" => form.reporter_phone = Some(read_text(field).await?),
            "latitude" => form.latitude = Some(read_text(field).await?),
            "longitude" => form.longitude = Some(read_text(field).await?),
            "photo" => {
                let file_name = field.file_name().unwrap_or("photo").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("failed to read photo: {e}")))?;
                if !data.is_empty() {
                    form.photo = Some((file_name, data.to_vec()));
                }
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("failed to read field: {e}")))
}

fn parse_coordinate(value: Option<String>, name: &str) -> AppResult<Option<f64>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<f64>()
                .map(Some)
                .map_err(|_| AppError::validation(format!("{name} must be numeric")))
        }
    }
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Report>)> {
    let form = read_form(multipart).await?;

    // Validation mirrors the public form and runs before anything is
    // persisted, including the photo.
    let description = form.description.unwrap_or_default().trim().to_string();
    if description.is_empty() {
        return Err(AppError::validation("description is required"));
    }

    let reporter_name = form.reporter_name.unwrap_or_default().trim().to_string();
    if reporter_name.is_empty() {
        return Err(AppError::validation("reporter_name is required"));
    }

    let reporter_phone = form.reporter_phone.unwrap_or_default().trim().to_string();
    if reporter_phone.len() < 8 {
        return Err(AppError::validation(
            "reporter_phone must be at least 8 characters",
        ));
    }

    let latitude = parse_coordinate(form.latitude, "latitude")?;
    let longitude = parse_coordinate(form.longitude, "longitude")?;

    let image_path = match form.photo {
        Some((file_name, data)) => {
            Some(media::store_upload(&state.config.upload_dir, &file_name, &data).await?)
        }
        None => None,
    };

    let report = store::insert_report(
        &state.db,
        NewReport {
            description,
            reporter_name,
            reporter_phone,
            image_path,
            latitude,
            longitude,
        },
    )?;

    Ok((StatusCode::CREATED, Json(report)))
}

// --- PATCH /api/reports/:id/status ---

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<StatusCode> {
    // Membership in the enum is checked before any store access. Backward
    // transitions are deliberately allowed; the responder UI only offers
    // forward ones.
    let status: ReportStatus = req
        .status
        .parse()
        .map_err(|()| AppError::validation(format!("invalid status: {}", req.status)))?;

    if !store::update_status(&state.db, id, status)? {
        return Err(AppError::not_found(format!("report {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
