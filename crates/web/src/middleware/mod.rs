//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with `request_id` and `tenant` fields)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//! 5. Dispatcher (tenant resolution, not a layer)
//! 6. Session gate (gated console routes only)

pub mod gate;
pub mod request_id;
pub mod session;

pub use gate::{GateRejection, Operator, session_gate};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
