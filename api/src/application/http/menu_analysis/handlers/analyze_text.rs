use axum::extract::State;
use menuscan_core::domain::menu_analysis::{
    entities::AnalyzeResult, ports::MenuAnalysisService, value_objects::AnalyzeTextInput,
};

use crate::application::http::{
    menu_analysis::validators::AnalyzeTextRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "menu-analysis",
    summary = "Analyze menu text",
    description = "Extracts menu items from OCR'd menu text and flags ingredients that conflict with the given preferences. Falls back to a local parser when the model is unavailable.",
    responses(
        (status = 200, body = AnalyzeResult),
        (status = 400, description = "Empty or invalid text", body = ApiErrorResponse)
    ),
    request_body = AnalyzeTextRequest
)]
pub async fn analyze_text(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeTextRequest>,
) -> Result<Response<AnalyzeResult>, ApiError> {
    let result = state
        .service
        .analyze_text(AnalyzeTextInput {
            text: payload.text,
            preferences: payload.preferences,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
