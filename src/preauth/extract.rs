//! Request extensions and the handler-side extractor.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap, Request};

use crate::preauth::overrides::OverrideTable;
use crate::preauth::view::{HttpRequestView, RequestView, SimulatedRequest};

/// Identity established by an upstream authentication stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteUser(pub String);

/// Attached by `PreAuthSimulationLayer` when simulation is enabled.
#[derive(Clone, Debug)]
pub struct PreAuthOverlay(pub Arc<OverrideTable>);

/// The view downstream code should observe for `request`: decorated when a
/// `PreAuthOverlay` is attached, plain otherwise. Borrows without copying.
pub fn request_view<B>(request: &Request<B>) -> Box<dyn RequestView + '_> {
    let plain = HttpRequestView::from_request(request);
    match request.extensions().get::<PreAuthOverlay>() {
        Some(overlay) => Box::new(SimulatedRequest::new(plain, &overlay.0)),
        None => Box::new(plain),
    }
}

/// Snapshot of the request as downstream handlers should observe it.
///
/// Owns a copy of the request's header map, so capturing one costs a clone
/// of every header. Middleware that only borrows the request can use
/// `request_view` instead.
///
/// ```ignore
/// async fn handler(request: PreAuthRequest) -> String {
///     request.view().identity().unwrap_or("anonymous").to_string()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PreAuthRequest {
    headers: HeaderMap,
    remote_user: Option<String>,
    overlay: Option<Arc<OverrideTable>>,
}

impl PreAuthRequest {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            headers: parts.headers.clone(),
            remote_user: parts.extensions.get::<RemoteUser>().map(|u| u.0.clone()),
            overlay: parts.extensions.get::<PreAuthOverlay>().map(|o| o.0.clone()),
        }
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self {
            headers: request.headers().clone(),
            remote_user: request.extensions().get::<RemoteUser>().map(|u| u.0.clone()),
            overlay: request.extensions().get::<PreAuthOverlay>().map(|o| o.0.clone()),
        }
    }

    /// Whether simulated pre-authentication applies to this request.
    pub fn is_simulated(&self) -> bool {
        self.overlay.is_some()
    }

    /// The decorated view when simulation applies, the plain request otherwise.
    pub fn view(&self) -> Box<dyn RequestView + '_> {
        let plain = HttpRequestView::new(&self.headers, self.remote_user.as_deref());
        match &self.overlay {
            Some(table) => Box::new(SimulatedRequest::new(plain, table)),
            None => Box::new(plain),
        }
    }
}

impl<S> FromRequestParts<S> for PreAuthRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
