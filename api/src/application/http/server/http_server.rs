use std::sync::Arc;

use crate::application::http::health::health_routes;
use crate::application::http::menu_analysis::router::menu_analysis_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use menuscan_core::{application::create_service, domain::common::MenuScanConfig};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, info_span, warn};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config: MenuScanConfig = MenuScanConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    Ok(AppState::new(args, service))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        debug!("Allowed origins: {:?}", origins);
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(allow_origin)
        .allow_credentials(false)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let cors = cors_layer(&state.args.server.allowed_origins);

    let mut openapi = ApiDoc::build();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let mut router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(menu_analysis_routes(state.clone()))
        .merge(health_routes(&root_path));

    if !state.args.server.disable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route(
                &format!("{}/metrics", root_path),
                get(|| async move { metric_handle.render() }),
            )
            .layer(prometheus_layer);
    }

    let router = router.layer(trace_layer).layer(cors).with_state(state);
    Ok(router)
}
