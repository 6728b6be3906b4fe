//! Read-only request views.
//!
//! # Responsibilities
//! - `RequestView`: the accessors downstream code uses for identity and headers
//! - `HttpRequestView`: passthrough over an `http` header map and `RemoteUser`
//! - `SimulatedRequest`: prefers override values, falls back to the inner view
//!
//! # Design Decisions
//! - Every accessor makes its override-or-delegate decision explicitly
//! - Multi-value lookups and name enumeration merge lazily, overrides first
//! - No deduplication: an overridden name present on the request is listed twice

use axum::http::{request::Parts, HeaderMap, HeaderName, Request};

use crate::error::{Error, Result};
use crate::preauth::extract::RemoteUser;
use crate::preauth::merged::Merged;
use crate::preauth::overrides::OverrideTable;

/// Lazily produced header names or values.
pub type Values<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

/// Identity and header accessors of an incoming request.
pub trait RequestView {
    /// The authenticated principal, if any.
    fn identity(&self) -> Option<&str>;

    /// First value of header `name`.
    fn header(&self, name: &str) -> Option<&str>;

    /// Every value of header `name`, in order.
    fn header_values<'a>(&'a self, name: &str) -> Values<'a>;

    /// Every header name on the request.
    fn header_names<'a>(&'a self) -> Values<'a>;

    /// Header `name` parsed as a base-10 integer. `Ok(None)` when absent.
    fn int_header(&self, name: &str) -> Result<Option<i32>>;
}

impl<T: RequestView + ?Sized> RequestView for &T {
    fn identity(&self) -> Option<&str> {
        (**self).identity()
    }

    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }

    fn header_values<'a>(&'a self, name: &str) -> Values<'a> {
        (**self).header_values(name)
    }

    fn header_names<'a>(&'a self) -> Values<'a> {
        (**self).header_names()
    }

    fn int_header(&self, name: &str) -> Result<Option<i32>> {
        (**self).int_header(name)
    }
}

pub(crate) fn parse_int(name: &str, value: &str) -> Result<i32> {
    value.parse().map_err(|source| Error::NumberFormat {
        name: name.to_string(),
        value: value.to_string(),
        source,
    })
}

/// Passthrough view over a request's header map.
///
/// Values that are not visible ASCII are skipped.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequestView<'a> {
    headers: &'a HeaderMap,
    remote_user: Option<&'a str>,
}

impl<'a> HttpRequestView<'a> {
    pub fn new(headers: &'a HeaderMap, remote_user: Option<&'a str>) -> Self {
        Self {
            headers,
            remote_user,
        }
    }

    /// View a request, taking the identity from its `RemoteUser` extension.
    pub fn from_request<B>(request: &'a Request<B>) -> Self {
        let remote_user = request
            .extensions()
            .get::<RemoteUser>()
            .map(|user| user.0.as_str());
        Self::new(request.headers(), remote_user)
    }

    pub fn from_parts(parts: &'a Parts) -> Self {
        let remote_user = parts
            .extensions
            .get::<RemoteUser>()
            .map(|user| user.0.as_str());
        Self::new(&parts.headers, remote_user)
    }
}

impl RequestView for HttpRequestView<'_> {
    fn identity(&self) -> Option<&str> {
        self.remote_user
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn header_values<'a>(&'a self, name: &str) -> Values<'a> {
        Box::new(
            self.headers
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        )
    }

    fn header_names<'a>(&'a self) -> Values<'a> {
        Box::new(self.headers.keys().map(HeaderName::as_str))
    }

    fn int_header(&self, name: &str) -> Result<Option<i32>> {
        self.header(name).map(|value| parse_int(name, value)).transpose()
    }
}

/// Request view that reports configured overrides ahead of the inner view.
#[derive(Debug, Clone)]
pub struct SimulatedRequest<'t, V> {
    inner: V,
    overrides: &'t OverrideTable,
}

impl<'t, V: RequestView> SimulatedRequest<'t, V> {
    pub fn new(inner: V, overrides: &'t OverrideTable) -> Self {
        Self { inner, overrides }
    }

    /// The undecorated view.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn overrides(&self) -> &'t OverrideTable {
        self.overrides
    }
}

impl<V: RequestView> RequestView for SimulatedRequest<'_, V> {
    fn identity(&self) -> Option<&str> {
        self.overrides.identity().or_else(|| self.inner.identity())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.overrides
            .first_value(name)
            .or_else(|| self.inner.header(name))
    }

    fn header_values<'a>(&'a self, name: &str) -> Values<'a> {
        match self.overrides.values(name) {
            Some(values) => Box::new(Merged::new(
                values.iter().map(String::as_str),
                self.inner.header_values(name),
            )),
            None => self.inner.header_values(name),
        }
    }

    fn header_names<'a>(&'a self) -> Values<'a> {
        Box::new(Merged::new(self.overrides.names(), self.inner.header_names()))
    }

    fn int_header(&self, name: &str) -> Result<Option<i32>> {
        match self.overrides.first_value(name) {
            Some(value) => parse_int(name, value).map(Some),
            None => self.inner.int_header(name),
        }
    }
}
