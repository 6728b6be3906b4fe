use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::buildinfo::Build;
use crate::http::server::AppState;
use crate::preauth::PreAuthRequest;

/// One header name with every value the request view reports for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub values: Vec<String>,
}

/// The request as downstream code observes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmI {
    pub simulated: bool,
    pub remote_user: Option<String>,
    /// In view order; an overridden name also sent by the client appears twice.
    pub headers: Vec<HeaderEntry>,
}

pub async fn get_build(State(state): State<AppState>) -> Json<Build> {
    Json(state.build.build())
}

pub async fn get_active_profiles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.profiles.as_slice().to_vec())
}

pub async fn whoami(request: PreAuthRequest) -> Json<WhoAmI> {
    let view = request.view();

    let headers = view
        .header_names()
        .map(|name| HeaderEntry {
            name: name.to_string(),
            values: view.header_values(name).map(str::to_string).collect(),
        })
        .collect();

    tracing::debug!(
        simulated = request.is_simulated(),
        remote_user = ?view.identity(),
        "Reporting request view"
    );

    Json(WhoAmI {
        simulated: request.is_simulated(),
        remote_user: view.identity().map(str::to_string),
        headers,
    })
}
