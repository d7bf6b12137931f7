//! Layout server - JSON-RPC over stdio front end for the site planner
//!
//! One JSON request per line in, one JSON response per line out. Presentation
//! layers use it to pick rules, run the optimizer and fetch layouts to draw.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Session state (rules, RNG, last result)
//! - `handlers` - Request handlers organized by functionality

pub mod handlers;
pub mod protocol;
pub mod state;

pub use protocol::{error_codes, ErrorResponse, Request, Response};
pub use state::ServerState;

use handlers::*;

/// Method that ends the session after its response is written
pub const SHUTDOWN_METHOD: &str = "Shutdown";

/// Route one request to its handler
pub fn dispatch(state: &mut ServerState, request: Request) -> Response {
    let Request { id, method, params } = request;
    match method.as_str() {
        "GetRules" => handle_get_rules(state, id),
        "SetRules" => handle_set_rules(state, id, params),
        "LoadRules" => handle_load_rules(state, id, params),
        "GetSitePlan" => handle_get_site_plan(state, id),
        "SetSeed" => handle_set_seed(state, id, params),
        "GenerateLayout" => handle_generate_layout(state, id, params),
        "Optimize" => handle_optimize(state, id, params),
        "GetLayout" => handle_get_layout(state, id),
        "AuditLayout" => handle_audit_layout(state, id, params),
        SHUTDOWN_METHOD => Response::success(id, serde_json::json!({ "status": "ok" })),
        _ => Response::error(id, error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method)),
    }
}
