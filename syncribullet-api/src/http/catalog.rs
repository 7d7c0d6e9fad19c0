//! Catalog endpoint
//!
//! The config segment is taken from the raw request path: it must be
//! percent-decoded exactly once, by the config codec.

use axum::{
    extract::State,
    http::Uri,
    Json,
};
use syncribullet_core::catalog::{degrade, CatalogResponse};

use super::{AppError, AppResult, AppState};

/// `GET /{config}/catalog/{resourceType}/{catalogId}[/{params}].json`
pub async fn get_catalog(State(state): State<AppState>, uri: Uri) -> AppResult<Json<CatalogResponse>> {
    match state.handler.try_resolve_path(uri.path(), state.env.as_ref()).await {
        Ok(response) => Ok(Json(response)),
        Err(e) if e.is_upstream() && state.catalog_config.surface_upstream_errors => {
            tracing::warn!(error = %e, "catalog provider failed");
            Err(AppError::bad_gateway(e.to_string()))
        }
        Err(e) => Ok(Json(degrade(&e))),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use syncribullet_core::Config;
    use tower::ServiceExt;

    use crate::http::create_router;
    use crate::http::test_support::{body_json, state};

    async fn get(config: &Config, fail: bool, uri: &str) -> axum::response::Response {
        create_router(state(config, fail))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_route() {
        let response = get(
            &Config::default(),
            false,
            "/simkl_accesstoken-=-abc%7Csimkl_clientid-=-xyz/catalog/series/syncribullet-simkl-shows-watching/skip=0&genre=Comedy.json",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let metas = json["metas"].as_array().unwrap();
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0]["id"], "tt0000002");
        assert_eq!(metas[0]["type"], "series");
    }

    #[tokio::test]
    async fn test_catalog_without_config_segment() {
        let response = get(
            &Config::default(),
            false,
            "/catalog/series/syncribullet-simkl-shows-watching/skip=1.json",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["metas"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_catalog_is_empty() {
        let response = get(&Config::default(), false, "/cfg/catalog/series/not-ours.json").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({ "metas": [] }));
    }

    #[tokio::test]
    async fn test_upstream_failure_policy() {
        let uri = "/catalog/series/syncribullet-simkl-shows-watching.json";

        let response = get(&Config::default(), true, uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({ "metas": [] }));

        let mut config = Config::default();
        config.catalog.surface_upstream_errors = true;
        let response = get(&config, true, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
