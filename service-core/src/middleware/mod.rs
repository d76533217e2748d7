pub mod errors;
pub mod metrics;
pub mod permission;
pub mod tracing;

pub use self::errors::{method_not_allowed_middleware, not_found_fallback};
pub use self::metrics::metrics_middleware;
pub use self::permission::{Claims, ScopeGate, require_scope};
pub use self::tracing::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
