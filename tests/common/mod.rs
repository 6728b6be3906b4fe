//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use preauth_sim::config::ServerConfig;

/// Config with simulation enabled using the documented example values.
#[allow(dead_code)]
pub fn example_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.preauth.enabled = true;
    config.preauth.remote_user = Some("someusername".into());
    config.preauth.header_names = Some("header1;header2;header3".into());
    config.preauth.header_values = Some("value1;mvalue2a,mvalue2b;value3".into());
    config
}

/// Send `request` through `router` in-process and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(router: Router, request: Request<Body>) -> T {
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// GET `path` with the given headers.
pub fn get(path: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}
