//! Layer that applies a delegate layer only when required profiles are active.

use tower::util::Either;
use tower::Layer;

use crate::profiles::ActiveProfiles;

/// Wraps `delegate` so that it is skipped unless all required profiles are
/// active. Skipped delegates leave the inner service reachable directly.
#[derive(Debug, Clone)]
pub struct ProfileConditionalLayer<L> {
    delegate: L,
    active: ActiveProfiles,
    required: Vec<String>,
}

impl<L> ProfileConditionalLayer<L> {
    /// A gate with no requirements; the delegate always applies.
    pub fn new(delegate: L, active: ActiveProfiles) -> Self {
        Self {
            delegate,
            active,
            required: Vec::new(),
        }
    }

    pub fn required_profile(self, profile: impl Into<String>) -> Self {
        self.required_profiles([profile])
    }

    pub fn required_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = profiles.into_iter().map(Into::into).collect();
        self
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn required_profiles_are_active(&self) -> bool {
        self.active.accepts_all(self.required.as_slice())
    }
}

impl<S, L> Layer<S> for ProfileConditionalLayer<L>
where
    L: Layer<S>,
{
    type Service = Either<L::Service, S>;

    fn layer(&self, inner: S) -> Self::Service {
        if self.required_profiles_are_active() {
            Either::Left(self.delegate.layer(inner))
        } else {
            tracing::debug!(
                required = ?self.required,
                active = ?self.active.as_slice(),
                "Required profiles not active, skipping delegate layer"
            );
            Either::Right(inner)
        }
    }
}
