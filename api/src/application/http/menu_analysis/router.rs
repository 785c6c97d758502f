use super::handlers::{
    analyze_image::{__path_analyze_image, MAX_IMAGE_SIZE, analyze_image},
    analyze_text::{__path_analyze_text, analyze_text},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

/// Headroom for multipart framing and the preferences field.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_text, analyze_image))]
pub struct MenuAnalysisApiDoc;

pub fn menu_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/analyze", state.args.server.root_path),
            post(analyze_text),
        )
        .route(
            &format!("{}/analyze-image", state.args.server.root_path),
            post(analyze_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD)),
        )
}
