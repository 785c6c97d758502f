use axum::extract::{Multipart, State};
use menuscan_core::domain::menu_analysis::{
    entities::{AnalyzeResult, Preferences},
    ports::MenuAnalysisService,
    value_objects::{AnalyzeImageInput, ImageUpload},
};
use tracing::error;

use crate::application::http::{
    menu_analysis::validators::AnalyzeImageForm,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[utoipa::path(
    post,
    path = "/analyze-image",
    tag = "menu-analysis",
    summary = "Analyze a food photo",
    description = "Describes the photo with a vision model, extracts dishes and ingredients, and flags conflicts with the given preferences.",
    responses(
        (status = 200, body = AnalyzeResult),
        (status = 400, description = "Missing, empty or non-image upload", body = ApiErrorResponse),
        (status = 501, description = "Upstream API key is not configured", body = ApiErrorResponse),
        (status = 502, description = "Every upstream attempt failed", body = ApiErrorResponse)
    ),
    request_body(content = AnalyzeImageForm, content_type = "multipart/form-data")
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeResult>, ApiError> {
    let mut image: Option<ImageUpload> = None;
    let mut preferences = Preferences::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let mime_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image = Some(ImageUpload {
                    data: data.to_vec(),
                    mime_type,
                });
            }
            "preferences" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read preferences: {}", e))
                })?;
                preferences = Preferences::from_json_lenient(&value);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let result = state
        .service
        .analyze_image(AnalyzeImageInput { image, preferences })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
