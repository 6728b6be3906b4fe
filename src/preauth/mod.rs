//! Simulated pre-authentication.
//!
//! # Data Flow
//! ```text
//! [preauth] config / init params
//!     → overrides.rs (parse names/values into OverrideTable, once)
//!     → layer.rs (attach Arc<OverrideTable> to each request when enabled)
//!     → extract.rs (PreAuthRequest captured by handlers)
//!     → view.rs (SimulatedRequest over HttpRequestView)
//!     → merged.rs (override values first, then the request's own)
//! ```
//!
//! # Design Decisions
//! - Local development aid only: nothing here authenticates anyone
//! - The table is read-only after startup and shared without locking
//! - Views are request-scoped and never outlive the captured request

pub mod extract;
pub mod layer;
pub mod merged;
pub mod overrides;
pub mod view;

pub use extract::{request_view, PreAuthOverlay, PreAuthRequest, RemoteUser};
pub use layer::{PreAuthSimulationLayer, PreAuthSimulationService};
pub use merged::Merged;
pub use overrides::OverrideTable;
pub use view::{HttpRequestView, RequestView, SimulatedRequest, Values};
