//! Tower layer that installs simulated pre-authentication on requests.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::config::PreAuthConfig;
use crate::error::Result;
use crate::preauth::extract::{PreAuthOverlay, RemoteUser};
use crate::preauth::overrides::OverrideTable;

/// Attaches a shared `OverrideTable` to every request when enabled, and
/// replaces the `RemoteUser` extension when an identity is configured.
///
/// Disabled layers forward requests untouched.
#[derive(Clone, Debug)]
pub struct PreAuthSimulationLayer {
    overlay: Option<Arc<OverrideTable>>,
}

impl PreAuthSimulationLayer {
    pub fn new(table: OverrideTable, enabled: bool) -> Self {
        Self {
            overlay: enabled.then(|| Arc::new(table)),
        }
    }

    /// Build from configuration. The override table is parsed even when
    /// simulation is disabled so misconfiguration surfaces at startup.
    pub fn from_config(config: &PreAuthConfig) -> Result<Self> {
        let table = config.override_table()?;

        if config.enabled {
            tracing::warn!(
                remote_user = ?table.identity(),
                headers = table.header_count(),
                "Pre-authentication simulation enabled; do not run this in production"
            );
        } else {
            tracing::info!("Pre-authentication simulation disabled");
        }

        Ok(Self::new(table, config.enabled))
    }

    pub fn is_enabled(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn overrides(&self) -> Option<&OverrideTable> {
        self.overlay.as_deref()
    }
}

impl<S> Layer<S> for PreAuthSimulationLayer {
    type Service = PreAuthSimulationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PreAuthSimulationService {
            inner,
            overlay: self.overlay.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PreAuthSimulationService<S> {
    inner: S,
    overlay: Option<Arc<OverrideTable>>,
}

impl<S, B> Service<Request<B>> for PreAuthSimulationService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if let Some(overlay) = &self.overlay {
            tracing::debug!(
                method = %req.method(),
                path = %req.uri().path(),
                "Simulating pre-authentication"
            );
            if let Some(identity) = overlay.identity() {
                req.extensions_mut().insert(RemoteUser(identity.to_string()));
            }
            req.extensions_mut().insert(PreAuthOverlay(overlay.clone()));
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn has_overlay(req: Request<Body>) -> std::result::Result<bool, Infallible> {
        Ok(req.extensions().get::<PreAuthOverlay>().is_some())
    }

    #[tokio::test]
    async fn test_enabled_attaches_overlay() {
        let layer = PreAuthSimulationLayer::new(OverrideTable::new().with_identity("bob"), true);
        let svc = layer.layer(service_fn(has_overlay));

        let attached = svc.oneshot(Request::new(Body::empty())).await.unwrap();
        assert!(attached);
    }

    #[tokio::test]
    async fn test_disabled_forwards_untouched() {
        let layer = PreAuthSimulationLayer::new(OverrideTable::new().with_identity("bob"), false);
        assert!(!layer.is_enabled());
        assert!(layer.overrides().is_none());

        let svc = layer.layer(service_fn(has_overlay));
        let attached = svc.oneshot(Request::new(Body::empty())).await.unwrap();
        assert!(!attached);
    }

    #[tokio::test]
    async fn test_identity_replaces_upstream_remote_user() {
        let read_user = |req: Request<Body>| async move {
            Ok::<_, Infallible>(req.extensions().get::<RemoteUser>().cloned())
        };
        let upstream = || {
            let mut req = Request::new(Body::empty());
            req.extensions_mut().insert(RemoteUser("upstream".into()));
            req
        };

        let with_identity =
            PreAuthSimulationLayer::new(OverrideTable::new().with_identity("simulated"), true);
        let user = with_identity
            .layer(service_fn(read_user))
            .oneshot(upstream())
            .await
            .unwrap();
        assert_eq!(user, Some(RemoteUser("simulated".into())));

        let without_identity = PreAuthSimulationLayer::new(OverrideTable::new(), true);
        let user = without_identity
            .layer(service_fn(read_user))
            .oneshot(upstream())
            .await
            .unwrap();
        assert_eq!(user, Some(RemoteUser("upstream".into())));
    }

    #[test]
    fn test_from_config_rejects_mismatch_even_when_disabled() {
        let config = PreAuthConfig {
            enabled: false,
            remote_user: None,
            header_names: Some("a;b".into()),
            header_values: Some("1".into()),
        };
        assert!(PreAuthSimulationLayer::from_config(&config).is_err());
    }
}
