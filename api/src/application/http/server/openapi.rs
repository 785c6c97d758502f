use crate::application::http::{health::HealthApiDoc, menu_analysis::router::MenuAnalysisApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MenuScan API",
        description = "Flags menu items and dishes that conflict with dietary preferences"
    ),
    tags(
        (name = "menu-analysis", description = "Menu text and food photo analysis"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The full document, including every routed module.
    pub fn build() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
            .merge_from(MenuAnalysisApiDoc::openapi())
            .merge_from(HealthApiDoc::openapi())
    }
}
